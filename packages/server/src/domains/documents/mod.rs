//! Documents domain - verification paperwork uploaded by parents

pub mod actions;
pub mod models;

pub use actions::{upload_document, UploadedFile, MAX_DOCUMENT_BYTES};
pub use models::{Document, DocumentStatus, DocumentType};
