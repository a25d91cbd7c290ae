//! Terminal presentation: slash commands, markup rendering, navigation.

use std::sync::LazyLock;

use regex::Regex;

use lectern_assistant::Navigator;
use lectern_core::Page;

/// `[label](action:id)` affordances.
static ACTION_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(action:([a-z_]+)\)").unwrap());

/// `**bold**` spans.
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());

pub const HELP: &str = "\
Commands:
  /help                 show this help
  /clear                start a fresh conversation
  /stats                show assistant statistics
  /personality <name>   switch to professional, friendly or expert
  /action <id>          activate an action, e.g. /action run_forecast
  /quit                 leave";

/// A line of input starting with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Stats,
    Personality(String),
    Action(String),
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse a slash command. Returns `None` for ordinary messages.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match (name.to_lowercase().as_str(), arg) {
            ("help" | "h" | "?", _) => Self::Help,
            ("clear", _) => Self::Clear,
            ("stats", _) => Self::Stats,
            ("personality", a) if !a.is_empty() => Self::Personality(a.to_string()),
            ("action", a) if !a.is_empty() => Self::Action(a.to_string()),
            ("quit" | "exit" | "q", _) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// Render assistant markup for a plain terminal.
///
/// Affordances become `[label → /action id]` so the user can type them.
pub fn render(text: &str) -> String {
    let linked = ACTION_LINK_RE.replace_all(text, "[$1 → /action $2]");
    BOLD_RE.replace_all(&linked, "$1").into_owned()
}

/// Navigator that tells the user where the portfolio would take them.
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&mut self, page: Page) {
        println!("  ↪ navigating to /{}", page);
        tracing::debug!(page = %page, "Navigation requested");
    }
}
