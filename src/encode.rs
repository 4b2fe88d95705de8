// Resume encoding: file bytes -> data URL -> bare base64 payload.

use crate::error::SubmitError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io;
use std::path::Path;
use tracing::debug;

/// Name sent when the path has no usable final component.
pub const DEFAULT_FILE_NAME: &str = "resume.pdf";

/// Read the whole file and return its base64 payload, without the
/// `data:<mime>;base64,` prefix.
pub fn encode(file: &Path) -> Result<String, SubmitError> {
    let read_err = |source: io::Error| SubmitError::Read {
        path: file.to_path_buf(),
        source,
    };

    let bytes = std::fs::read(file).map_err(read_err)?;
    if bytes.is_empty() {
        return Err(read_err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "file is empty",
        )));
    }

    let data_url = to_data_url(mime_for(file), &bytes);
    let payload = payload_from_data_url(&data_url).to_string();
    debug!(
        "Encoded {} ({} bytes) -> {} bytes base64",
        file.display(),
        bytes.len(),
        payload.len()
    );
    Ok(payload)
}

/// `data:<mime>;base64,<data>`
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Everything after the first comma. Input without a comma is returned as is.
pub fn payload_from_data_url(data_url: &str) -> &str {
    match data_url.split_once(',') {
        Some((_, data)) => data,
        None => data_url,
    }
}

/// MIME type guessed from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// The file name reported to the endpoint.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string()
}
