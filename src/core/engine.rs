use crate::core::pipeline::ReportPipeline;
use crate::utils::error::Result;
use std::path::PathBuf;

pub struct ReportEngine<P: ReportPipeline> {
    pipeline: P,
}

impl<P: ReportPipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Run the full fetch → summarize → publish → export sequence.
    /// Returns `None` when there was nothing to report (no records or
    /// no usable summaries); both cases are a successful run.
    pub async fn run(&self) -> Result<Option<PathBuf>> {
        tracing::info!("Starting report run");

        let records = self.pipeline.fetch().await?;
        tracing::info!("📥 Fetched {} records", records.len());
        if records.is_empty() {
            tracing::warn!("No records retrieved; nothing to report");
            return Ok(None);
        }

        let summaries = self.pipeline.summarize(records).await?;
        tracing::info!("🔄 Generated {} summaries", summaries.len());
        if summaries.is_empty() {
            tracing::warn!("No summaries were generated; aborting document update");
            return Ok(None);
        }

        self.pipeline.publish(&summaries).await?;
        tracing::info!("💾 Summaries inserted into template document");

        let output_path = self.pipeline.export().await?;
        tracing::info!("📁 Report exported to {}", output_path.display());

        Ok(Some(output_path))
    }
}
