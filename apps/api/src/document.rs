//! Document-text provider: turns an uploaded CV into plain text.
//!
//! Extraction never fails outright: unreadable documents yield an empty
//! string, which downstream reads as "no skills found".

use tracing::warn;

/// Extracts plain text from an uploaded document.
///
/// `text/plain` or `.txt` uploads are decoded as UTF-8 (lossy); everything
/// else is treated as a PDF.
pub fn extract_document_text(bytes: &[u8], content_type: Option<&str>, filename: Option<&str>) -> String {
    let is_text = content_type.is_some_and(|ct| ct.starts_with("text/plain"))
        || filename.is_some_and(|name| name.to_lowercase().ends_with(".txt"));

    if is_text {
        return String::from_utf8_lossy(bytes).into_owned();
    }

    // pdf-extract panics on some malformed documents.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF text extraction failed: {e:?}");
            String::new()
        }
        Err(_) => {
            warn!("PDF text extraction panicked; treating document as empty");
            String::new()
        }
    }
}
