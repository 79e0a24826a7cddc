use crate::domain::model::TreeRecord;
use crate::domain::ports::{
    CompletionClient, DocumentEditor, DocumentExporter, RecordSource, Storage,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// The four stages of one report run, executed strictly in order
/// by the engine.
#[async_trait]
pub trait ReportPipeline: Send + Sync {
    async fn fetch(&self) -> Result<Vec<TreeRecord>>;
    async fn summarize(&self, records: Vec<TreeRecord>) -> Result<Vec<String>>;
    async fn publish(&self, summaries: &[String]) -> Result<()>;
    async fn export(&self) -> Result<PathBuf>;
}

/// Render the fixed assessment prompt for one record.
pub fn build_prompt(record: &TreeRecord) -> String {
    format!(
        "You are a consulting arborist. Write a Tree Risk Assessment summary:\n\n\
         Species: {}\n\
         DBH: {}\n\
         Height: {}\n\
         Condition: {}\n\
         Risk Rating: {}\n\n\
         Requirements:\n\
         - Professional tone\n\
         - 2 short paragraphs\n\
         - Clear risk statement + management recommendation\n",
        record.species, record.dbh, record.height, record.condition, record.risk_rating
    )
}

/// Join summaries with a blank line between each, trailing whitespace
/// trimmed and two newlines appended.
pub fn join_summaries(summaries: &[String]) -> String {
    let mut text = summaries.join("\n\n").trim_end().to_string();
    text.push_str("\n\n");
    text
}

pub struct SummaryPipeline<R, C, E, X, S> {
    source: R,
    completions: C,
    editor: E,
    exporter: X,
    storage: S,
    doc_id: String,
    output_path: PathBuf,
}

impl<R, C, E, X, S> SummaryPipeline<R, C, E, X, S>
where
    R: RecordSource,
    C: CompletionClient,
    E: DocumentEditor,
    X: DocumentExporter,
    S: Storage,
{
    pub fn new(
        source: R,
        completions: C,
        editor: E,
        exporter: X,
        storage: S,
        doc_id: String,
        output_path: PathBuf,
    ) -> Self {
        Self {
            source,
            completions,
            editor,
            exporter,
            storage,
            doc_id,
            output_path,
        }
    }
}

#[async_trait]
impl<R, C, E, X, S> ReportPipeline for SummaryPipeline<R, C, E, X, S>
where
    R: RecordSource,
    C: CompletionClient,
    E: DocumentEditor,
    X: DocumentExporter,
    S: Storage,
{
    async fn fetch(&self) -> Result<Vec<TreeRecord>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        // Follow the continuation token until the store stops returning one.
        loop {
            let page = self.source.fetch_page(offset.as_deref()).await?;
            tracing::debug!("📡 Received page with {} records", page.records.len());
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    async fn summarize(&self, records: Vec<TreeRecord>) -> Result<Vec<String>> {
        let total = records.len();
        let mut summaries = Vec::new();
        let mut skipped = 0usize;

        for record in &records {
            tracing::info!(
                "📝 Generating summary for record {} ({})",
                record.record_id,
                record.species
            );

            let prompt = build_prompt(record);
            let completion = self.completions.complete(&prompt).await?;
            let content = completion.trim();

            if content.is_empty() {
                let label = if record.record_id.is_empty() {
                    &record.species
                } else {
                    &record.record_id
                };
                tracing::warn!("Model returned an empty response for record {}; skipping", label);
                skipped += 1;
                continue;
            }

            summaries.push(content.to_string());
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} of {} records with empty completions", skipped, total);
        }

        Ok(summaries)
    }

    async fn publish(&self, summaries: &[String]) -> Result<()> {
        if summaries.is_empty() {
            tracing::warn!("No summaries to insert into the document");
            return Ok(());
        }

        let text = join_summaries(summaries);
        self.editor.insert_text(&self.doc_id, &text).await
    }

    async fn export(&self) -> Result<PathBuf> {
        let bytes = self.exporter.export_pdf(&self.doc_id).await?;
        self.storage.write_file(&self.output_path, &bytes).await?;
        Ok(self.output_path.clone())
    }
}
