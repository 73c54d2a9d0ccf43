//! Document upload flow.
//!
//! Validates the selected file on the client side, then posts it to the
//! Document Service. Every outcome, including validation failures, is
//! reported as an [`UploadNotice`] rather than an error.
//!
//! A file counts as a PDF when its extension is `.pdf` (any case) and its
//! contents start with the `%PDF-` header.

use std::path::Path;
use tracing::{instrument, warn};

use crate::models::UploadNotice;
use crate::service::DocumentService;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Upload `path` to the Document Service.
///
/// `None` means no file was selected. Validation failures never reach the
/// network.
#[instrument(skip(service))]
pub async fn upload_document(service: &dyn DocumentService, path: Option<&Path>) -> UploadNotice {
    let Some(path) = path else {
        return UploadNotice::NoFile;
    };

    if !has_pdf_extension(path) {
        return UploadNotice::NotPdf;
    }

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read document");
            return UploadNotice::Failed;
        }
    };

    if !bytes.starts_with(PDF_MAGIC) {
        return UploadNotice::NotPdf;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    match service.upload_pdf(&file_name, bytes).await {
        Ok(resp) => UploadNotice::from_response(resp),
        Err(e) => {
            warn!(error = %e, "failed to upload document");
            UploadNotice::Failed
        }
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
