//! Eventure Core Library
//!
//! Typed requests, response envelopes, configuration and the error
//! taxonomy shared by the recommendation engine and the CLI.

pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use config::{EngineConfig, GraphConfig, SourceConfig};
pub use error::{EngineError, EngineResult, ErrorKind};
pub use request::{EventUpsert, Interaction, UserUpsert};
pub use response::{Response, Status};
