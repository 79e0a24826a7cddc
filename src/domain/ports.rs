use crate::domain::model::RecordPage;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// One page of rows from the tabular store. `offset` is the continuation
/// token from the previous page, `None` for the first request.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_page(&self, offset: Option<&str>) -> Result<RecordPage>;
}

/// One text completion for one prompt.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// A single plain-text insertion into the remote template document.
#[async_trait]
pub trait DocumentEditor: Send + Sync {
    async fn insert_text(&self, doc_id: &str, text: &str) -> Result<()>;
}

/// Full-document export to PDF bytes.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    async fn export_pdf(&self, doc_id: &str) -> Result<Vec<u8>>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
