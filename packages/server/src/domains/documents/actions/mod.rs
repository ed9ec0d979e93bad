//! Documents domain actions

mod upload_document;

pub use upload_document::{
    sanitize_file_name, upload_document, UploadedFile, MAX_DOCUMENT_BYTES,
};
