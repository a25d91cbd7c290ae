//! Shared vocabulary for Lectern: configuration, errors, and the domain
//! types exchanged between the assistant and its host.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AssistantConfig, GeneralConfig, LecternConfig};
pub use error::{LecternError, Result};
pub use types::*;
