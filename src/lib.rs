// Library root
// -----------
// This crate exposes the submission workflow behind the `resume-match`
// CLI: pick a resume, paste a job description, send both to the matching
// endpoint and show the score.
//
// Module responsibilities:
// - `validate`: pre-flight check that both inputs are present.
// - `encode`: reads the resume and produces its base64 payload.
// - `api`: the `MatchEndpoint` seam, the reqwest-backed `ApiClient` and
//   reply interpretation.
// - `controller`: the Idle/Loading/Success/Error state machine.
// - `render`: percentage and skill-list formatting.
// - `model`, `error`, `config`: shared types, error taxonomy and layered
//   configuration.
// - `ui`: terminal view and interactive menu.
pub mod api;
pub mod config;
pub mod controller;
pub mod encode;
pub mod error;
pub mod model;
pub mod render;
pub mod ui;
pub mod validate;

pub use api::{ApiClient, EndpointReply, MatchEndpoint};
pub use config::AppConfig;
pub use controller::{SubmissionController, SubmissionView};
pub use error::{SubmitError, ValidationError};
pub use model::{SubmissionFailure, SubmissionRequest, SubmissionResult, UiState};
pub use render::{DisplayOptions, RenderedResult};
