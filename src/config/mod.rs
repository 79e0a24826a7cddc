use crate::utils::error::{ReportError, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GOOGLE_API_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Clone, Parser)]
#[command(name = "tree-reports")]
#[command(about = "Generate tree risk assessment summaries and export them as a PDF report")]
pub struct Cli {
    /// Override the output directory (OUTPUT_DIR).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Override the output filename (OUTPUT_PDF_FILENAME).
    #[arg(long)]
    pub output_filename: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Resolved process configuration, built once at startup and passed by
/// reference to each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub table_name: String,
    pub openai_api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub doc_template_id: String,
    pub service_account_file: PathBuf,
    pub output_dir: PathBuf,
    pub output_filename: String,
    pub airtable_api_url: String,
    pub openai_api_url: String,
    pub google_api_url: String,
}

impl Config {
    pub fn from_env(cli: &Cli) -> Result<Self> {
        Self::from_lookup(cli, |name| env::var(name).ok())
    }

    fn from_lookup<F>(cli: &Cli, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ReportError::ConfigError {
                    message: format!("missing required environment variable: {}", name),
                })
        };
        let optional =
            |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let max_tokens = optional("OPENAI_MAX_TOKENS", "400")
            .parse::<u32>()
            .map_err(|e| ReportError::ConfigError {
                message: format!("OPENAI_MAX_TOKENS must be an integer: {}", e),
            })?;

        let output_dir = cli
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(optional("OUTPUT_DIR", "outputs")));
        let output_filename = cli
            .output_filename
            .clone()
            .unwrap_or_else(|| optional("OUTPUT_PDF_FILENAME", "generated_report.pdf"));

        Ok(Self {
            airtable_api_key: required("AIRTABLE_API_KEY")?,
            airtable_base_id: required("AIRTABLE_BASE_ID")?,
            table_name: optional("AIRTABLE_TABLE_NAME", "Trees"),
            openai_api_key: required("OPENAI_API_KEY")?,
            model: optional("OPENAI_MODEL", "gpt-4o-mini"),
            max_tokens,
            doc_template_id: required("GOOGLE_DOC_TEMPLATE_ID")?,
            service_account_file: PathBuf::from(optional(
                "GOOGLE_SERVICE_ACCOUNT_FILE",
                "credentials.json",
            )),
            output_dir,
            output_filename,
            airtable_api_url: optional("AIRTABLE_API_URL", DEFAULT_AIRTABLE_API_URL),
            openai_api_url: optional("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
            google_api_url: optional("GOOGLE_API_URL", DEFAULT_GOOGLE_API_URL),
        })
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }
}
