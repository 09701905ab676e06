#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod agent;
mod config;
pub mod document;
mod error;
pub mod prompt;
pub mod provider;
pub mod session;

pub use config::ProviderConfig;
pub use error::{Error, Result};

/// Tracing target for the main library.
pub const TRACING_TARGET: &str = "askpdf_core";
