pub mod airtable;
pub mod gdocs;
pub mod openai;
pub mod storage;

pub use airtable::AirtableClient;
pub use gdocs::{DocsCredentials, GoogleDocsClient};
pub use openai::OpenAiClient;
pub use storage::LocalStorage;
