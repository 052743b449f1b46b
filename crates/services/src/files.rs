//! # File Metadata
//!
//! Upload bookkeeping for the admin console. Only metadata is stored; blob
//! durability is out of scope by design. Validation mirrors the uploader:
//! at most ten files per batch, 10 MiB each, images plus the common office
//! document types.

use std::sync::Arc;

use chrono::Utc;
use domains::error::{DomainError, Result};
use domains::models::FileMeta;
use domains::ports::KeyValueStore;
use mime::Mime;
use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::loaders;
use crate::permissions::PermissionService;

pub const MAX_FILES_PER_UPLOAD: usize = 10;
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Non-image types accepted by the uploader: PDF, Word and Excel, in both
/// their legacy and OOXML spellings. Images are matched by top-level type.
static ALLOWED_DOCUMENT_TYPES: Lazy<Vec<Mime>> = Lazy::new(|| {
    [
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "application/vnd.ms-excel",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ]
    .iter()
    .map(|raw| raw.parse().expect("static mime list parses"))
    .collect()
});

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadRequest {
    pub name: String,
    pub size: u64,
    /// Content type as sent by the client; guessed from the name when empty.
    #[serde(rename = "type", default)]
    pub content_type: String,
}

pub struct FileService {
    store: Arc<dyn KeyValueStore>,
    permissions: Arc<PermissionService>,
}

impl FileService {
    pub fn new(store: Arc<dyn KeyValueStore>, permissions: Arc<PermissionService>) -> Self {
        Self { store, permissions }
    }

    pub async fn list(&self, project_id: &str) -> Result<Vec<FileMeta>> {
        self.permissions.require_management(project_id).await?;
        loaders::load_files(&*self.store, project_id).await
    }

    /// Validates and records a batch of uploads. The batch is all-or-
    /// nothing: one bad file rejects the whole request before anything is
    /// written.
    pub async fn register(
        &self,
        project_id: &str,
        uploads: &[FileUploadRequest],
    ) -> Result<Vec<FileMeta>> {
        self.permissions.require_management(project_id).await?;
        if uploads.is_empty() {
            return Err(DomainError::Validation("at least one file is required".into()));
        }
        if uploads.len() > MAX_FILES_PER_UPLOAD {
            return Err(DomainError::Validation(format!(
                "at most {MAX_FILES_PER_UPLOAD} files can be uploaded at once"
            )));
        }

        let now = Utc::now();
        let mut created = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let content_type = validate_upload(upload)?;
            created.push(FileMeta {
                id: Uuid::now_v7().to_string(),
                name: upload.name.clone(),
                size: upload.size,
                content_type,
                uploaded_at: now,
                project_id: project_id.into(),
            });
        }

        let mut files = loaders::load_files(&*self.store, project_id).await?;
        files.extend(created.iter().cloned());
        loaders::save_files(&*self.store, project_id, &files).await?;
        info!(project_id, count = created.len(), "registered uploads");
        Ok(created)
    }

    pub async fn remove(&self, project_id: &str, file_id: &str) -> Result<()> {
        self.permissions.require_management(project_id).await?;
        let mut files = loaders::load_files(&*self.store, project_id).await?;
        let before = files.len();
        files.retain(|file| file.id != file_id);
        if files.len() == before {
            return Err(DomainError::not_found("File", file_id));
        }
        loaders::save_files(&*self.store, project_id, &files).await?;
        info!(project_id, file_id, "removed upload");
        Ok(())
    }
}

/// Checks size and content type, returning the resolved type.
fn validate_upload(upload: &FileUploadRequest) -> Result<String> {
    if upload.size > MAX_FILE_SIZE {
        return Err(DomainError::Validation(format!(
            "{}: file exceeds the 10 MB limit",
            upload.name
        )));
    }
    let raw = if upload.content_type.is_empty() {
        mime_guess::from_path(&upload.name)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default()
    } else {
        upload.content_type.clone()
    };
    let mime: Mime = raw.parse().map_err(|_| {
        DomainError::Validation(format!("{}: unsupported file type", upload.name))
    })?;

    let allowed = mime.type_() == mime::IMAGE
        || ALLOWED_DOCUMENT_TYPES
            .iter()
            .any(|candidate| candidate.essence_str() == mime.essence_str());
    if allowed {
        Ok(mime.essence_str().to_string())
    } else {
        Err(DomainError::Validation(format!(
            "{}: unsupported file type",
            upload.name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, size: u64, content_type: &str) -> FileUploadRequest {
        FileUploadRequest {
            name: name.into(),
            size,
            content_type: content_type.into(),
        }
    }

    #[test]
    fn test_any_image_type_is_allowed() {
        assert_eq!(
            validate_upload(&upload("a.png", 1024, "image/png")).unwrap(),
            "image/png"
        );
        assert_eq!(
            validate_upload(&upload("a.webp", 1024, "image/webp")).unwrap(),
            "image/webp"
        );
    }

    #[test]
    fn test_documents_are_matched_exactly() {
        assert!(validate_upload(&upload("a.pdf", 1024, "application/pdf")).is_ok());
        assert!(validate_upload(&upload("a.zip", 1024, "application/zip")).is_err());
        assert!(validate_upload(&upload("a.mp4", 1024, "video/mp4")).is_err());
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        assert!(validate_upload(&upload("big.png", MAX_FILE_SIZE + 1, "image/png")).is_err());
        assert!(validate_upload(&upload("ok.png", MAX_FILE_SIZE, "image/png")).is_ok());
    }

    #[test]
    fn test_missing_type_is_guessed_from_the_name() {
        assert_eq!(
            validate_upload(&upload("photo.jpg", 1024, "")).unwrap(),
            "image/jpeg"
        );
        assert!(validate_upload(&upload("mystery.bin", 1024, "")).is_err());
    }
}
