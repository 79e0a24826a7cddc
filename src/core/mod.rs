pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{RecordPage, TreeRecord};
pub use crate::domain::ports::{
    CompletionClient, DocumentEditor, DocumentExporter, RecordSource, Storage,
};
pub use crate::utils::error::Result;
