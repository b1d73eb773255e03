//! Namespace inference for C#-style projects.
//!
//! A document's namespace is the project's root identifier followed by the
//! folders between the project descriptor and the document.

pub mod config;
pub mod error;
pub mod inference;
pub mod logging;
pub mod naming;
pub mod project;
pub mod trigger;

pub use config::InferenceConfig;
pub use error::{NsfillError, Result};
pub use inference::{Inference, NamespaceEngine, Suggestion};
