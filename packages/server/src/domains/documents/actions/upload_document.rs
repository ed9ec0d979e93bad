//! Upload document action - write the file, then record it

use std::path::Path;

use sqlx::PgPool;
use tracing::{info, warn};

use crate::common::{DocumentId, DomainError, ParentId};
use crate::domains::documents::models::{Document, DocumentType};

/// Largest accepted upload
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// File part of a multipart upload, already read into memory
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// Keep only the final path component and a conservative character set.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Store an uploaded document under `upload_dir` and record it as `uploaded`.
///
/// Files are named `<document id>-<sanitized name>` so two uploads never collide.
/// If the database insert fails the file is removed again.
pub async fn upload_document(
    parent_id: ParentId,
    document_type: &str,
    file: UploadedFile,
    upload_dir: &Path,
    pool: &PgPool,
) -> Result<Document, DomainError> {
    let document_type: DocumentType = document_type
        .parse()
        .map_err(|e: anyhow::Error| DomainError::invalid(e.to_string()))?;
    if file.bytes.is_empty() {
        return Err(DomainError::invalid("Uploaded file is empty"));
    }
    if file.bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(DomainError::invalid("Uploaded file is too large"));
    }

    let id = DocumentId::new();
    let file_name = sanitize_file_name(&file.original_name);
    let path = upload_dir.join(format!("{}-{}", id, file_name));

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| DomainError::Internal(e.into()))?;
    tokio::fs::write(&path, &file.bytes)
        .await
        .map_err(|e| DomainError::Internal(e.into()))?;

    let path_str = path.to_string_lossy().to_string();
    match Document::insert(id, parent_id, document_type, &file.original_name, &path_str, pool).await
    {
        Ok(document) => {
            info!(
                document_id = %document.id,
                parent_id = %parent_id,
                document_type = ?document_type,
                bytes = file.bytes.len(),
                "Document uploaded"
            );
            Ok(document)
        }
        Err(e) => {
            if let Err(remove_error) = tokio::fs::remove_file(&path).await {
                warn!(path = %path_str, error = %remove_error, "Failed to remove orphaned upload");
            }
            Err(DomainError::Internal(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\id card.pdf"), "id_card.pdf");
    }

    #[test]
    fn test_sanitize_never_returns_empty_or_hidden() {
        assert_eq!(sanitize_file_name(""), "document");
        assert_eq!(sanitize_file_name("..."), "document");
        assert_eq!(sanitize_file_name(".env"), "env");
    }
}
