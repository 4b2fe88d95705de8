// Data shapes exchanged with the scoring endpoint and the display state
// owned by the submission controller.

use crate::error::SubmitError;
use serde::{Deserialize, Deserializer, Serialize};

/// Payload POSTed to the endpoint. Built fresh for every submission.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    #[serde(rename = "resume_b64")]
    pub file_content_base64: String,
    #[serde(rename = "resume_filename")]
    pub file_name: String,
    #[serde(rename = "job_description_text")]
    pub job_description_text: String,
}

/// Successful match returned by the endpoint.
///
/// `matched_skills` is only sent by some endpoint versions, so it stays
/// optional; `missing_skills` is tolerated absent or null and read as empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub match_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub missing_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body sent alongside a rejecting status.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// What the error panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    pub message: String,
    pub http_status: Option<u16>,
}

impl From<&SubmitError> for SubmissionFailure {
    fn from(err: &SubmitError) -> Self {
        SubmissionFailure {
            message: err.user_message(),
            http_status: err.http_status(),
        }
    }
}

/// Controller state. Exactly one variant is active, so a loading spinner
/// and an error panel can never be shown together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success(SubmissionResult),
    Error(SubmissionFailure),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Success(_) => "success",
            UiState::Error(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_wire_field_names() {
        let req = SubmissionRequest {
            file_content_base64: "AAEC".into(),
            file_name: "cv.pdf".into(),
            job_description_text: "Rust engineer".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "resume_b64": "AAEC",
                "resume_filename": "cv.pdf",
                "job_description_text": "Rust engineer",
            })
        );
    }

    #[test]
    fn result_tolerates_missing_optional_fields() {
        let result: SubmissionResult =
            serde_json::from_value(json!({ "match_percentage": 73 })).unwrap();
        assert_eq!(result.match_percentage, 73.0);
        assert!(result.matched_skills.is_none());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn null_missing_skills_read_as_empty() {
        let result: SubmissionResult = serde_json::from_value(json!({
            "match_percentage": 40,
            "missing_skills": null,
        }))
        .unwrap();
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn result_requires_percentage() {
        let parsed: Result<SubmissionResult, _> =
            serde_json::from_value(json!({ "missing_skills": ["SQL"] }));
        assert!(parsed.is_err());
    }

    #[test]
    fn failure_from_server_error() {
        let err = SubmitError::Server {
            status: 415,
            message: Some("Unsupported file type".into()),
        };
        let failure = SubmissionFailure::from(&err);
        assert_eq!(failure.message, "Unsupported file type");
        assert_eq!(failure.http_status, Some(415));
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(UiState::default(), UiState::Idle);
        assert!(UiState::Loading.is_loading());
        assert_eq!(UiState::Idle.label(), "idle");
    }
}
