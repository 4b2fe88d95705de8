// Pre-flight check run before the controller touches any state.

use crate::error::ValidationError;
use std::path::Path;
use tracing::debug;

/// Both a resume file and a job description are required.
///
/// An empty path counts as no file; whitespace-only text counts as no text.
pub fn validate(file: Option<&Path>, text: Option<&str>) -> Result<(), ValidationError> {
    let has_file = file.map_or(false, |p| !p.as_os_str().is_empty());
    let has_text = text.map_or(false, |t| !t.trim().is_empty());

    if !has_file || !has_text {
        debug!(has_file, has_text, "resume file or job description is missing");
        return Err(ValidationError::MissingInput);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_file_and_text() {
        assert_eq!(validate(Some(Path::new("cv.pdf")), Some("Rust dev")), Ok(()));
    }

    #[test]
    fn rejects_absent_file() {
        assert_eq!(
            validate(None, Some("Rust dev")),
            Err(ValidationError::MissingInput)
        );
        assert_eq!(
            validate(Some(Path::new("")), Some("Rust dev")),
            Err(ValidationError::MissingInput)
        );
    }

    #[test]
    fn rejects_absent_or_empty_text() {
        let file = Some(Path::new("cv.pdf"));
        assert_eq!(validate(file, None), Err(ValidationError::MissingInput));
        assert_eq!(validate(file, Some("")), Err(ValidationError::MissingInput));
        assert_eq!(
            validate(file, Some("  \n\t")),
            Err(ValidationError::MissingInput)
        );
    }
}
