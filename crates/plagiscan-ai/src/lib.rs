//! Analysis adapter around a remote generative model, plus the check pipeline
//! that turns its output into a report.

mod analyzer;
mod client;
mod error;
pub mod pipeline;
pub mod prompt;
pub mod reply;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use analyzer::{Analysis, Analyzer};
pub use client::{CredentialSource, Generation, GenerativeClient, StaticCredentials};
pub use error::AnalyzeError;
pub use pipeline::{Checker, Report};
pub use reply::ReplyPolicy;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiConfig, GeminiError};
