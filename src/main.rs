use clap::Parser;
use tree_reports::utils::logger;
use tree_reports::{
    AirtableClient, Cli, Config, DocsCredentials, GoogleDocsClient, LocalStorage, OpenAiClient,
    ReportEngine, SummaryPipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting tree-reports");

    let config = match Config::from_env(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if cli.verbose {
        tracing::debug!("Resolved table: {}, model: {}", config.table_name, config.model);
    }

    // Credentials are loaded up front so a bad file aborts the run
    // before any remote call is made.
    let credentials = match DocsCredentials::from_file(&config.service_account_file) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let engine = match build_engine(&config, credentials) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    match engine.run().await {
        Ok(Some(output_path)) => {
            let resolved = output_path
                .canonicalize()
                .unwrap_or_else(|_| output_path.clone());
            tracing::info!("✅ Report successfully written to {}", resolved.display());
            println!("✅ Report successfully written to {}", resolved.display());
        }
        Ok(None) => {
            // Nothing to report; warnings were already logged.
        }
        Err(e) => {
            tracing::error!("❌ Report run failed: {}", e);
            eprintln!("❌ Report run failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn build_engine(
    config: &Config,
    credentials: DocsCredentials,
) -> tree_reports::Result<
    ReportEngine<
        SummaryPipeline<AirtableClient, OpenAiClient, GoogleDocsClient, GoogleDocsClient, LocalStorage>,
    >,
> {
    let source = AirtableClient::new(
        &config.airtable_api_url,
        &config.airtable_api_key,
        &config.airtable_base_id,
        &config.table_name,
    )?;
    let completions = OpenAiClient::new(
        &config.openai_api_url,
        &config.openai_api_key,
        &config.model,
        config.max_tokens,
    )?;
    let editor = GoogleDocsClient::new(&config.google_api_url, credentials.clone())?;
    let exporter = GoogleDocsClient::new(&config.google_api_url, credentials)?;

    let pipeline = SummaryPipeline::new(
        source,
        completions,
        editor,
        exporter,
        LocalStorage::new(),
        config.doc_template_id.clone(),
        config.output_path(),
    );

    Ok(ReportEngine::new(pipeline))
}
