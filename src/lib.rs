pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{AirtableClient, DocsCredentials, GoogleDocsClient, LocalStorage, OpenAiClient};
pub use config::{Cli, Config};
pub use core::{engine::ReportEngine, pipeline::SummaryPipeline};
pub use utils::error::{ReportError, Result};
