// Submission controller: validate, load, encode, POST, render.
//
// The controller owns the `UiState` and drives a `SubmissionView` (the
// notice, submit control, progress indicator and the two panels). The busy
// state is held by `BusyGuard`, whose `Drop` re-enables submission and hides
// the progress indicator on every exit path, unwinding included.

use crate::api::{interpret_reply, MatchEndpoint};
use crate::encode;
use crate::error::SubmitError;
use crate::model::{SubmissionFailure, SubmissionRequest, SubmissionResult, UiState};
use crate::render::{render_result, DisplayOptions, RenderedResult};
use crate::validate::validate;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// The external display collaborators, addressed by role.
pub trait SubmissionView {
    /// Blocking notice for input the user must fix before submitting.
    fn notify(&mut self, message: &str);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_progress_visible(&mut self, visible: bool);
    /// Hide both the result and the error panel.
    fn clear_panels(&mut self);
    fn show_result(&mut self, rendered: &RenderedResult);
    fn show_error(&mut self, message: &str);
}

/// Puts the view into its busy state and restores it when dropped.
struct BusyGuard<'a, V: SubmissionView> {
    view: &'a mut V,
}

impl<'a, V: SubmissionView> BusyGuard<'a, V> {
    fn engage(view: &'a mut V) -> Self {
        view.set_submit_enabled(false);
        view.clear_panels();
        view.set_progress_visible(true);
        BusyGuard { view }
    }

    fn view(&mut self) -> &mut V {
        self.view
    }
}

impl<V: SubmissionView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_progress_visible(false);
        self.view.set_submit_enabled(true);
        debug!("UI restored from loading state");
    }
}

pub struct SubmissionController<E: MatchEndpoint, V: SubmissionView> {
    endpoint: E,
    view: V,
    options: DisplayOptions,
    state: UiState,
}

impl<E: MatchEndpoint, V: SubmissionView> SubmissionController<E, V> {
    pub fn new(endpoint: E, view: V, options: DisplayOptions) -> Self {
        SubmissionController {
            endpoint,
            view,
            options,
            state: UiState::Idle,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Run one submission. On missing input the view gets a notice and the
    /// state is left untouched; otherwise the state ends in `Success` or
    /// `Error` with the submit control enabled again.
    pub fn submit(&mut self, file: Option<&Path>, text: Option<&str>) -> &UiState {
        let (file, text) = match (validate(file, text), file, text) {
            (Ok(()), Some(file), Some(text)) => (file, text),
            (Err(e), ..) => {
                warn!("Submission blocked: {e}");
                self.view.notify(&e.to_string());
                return &self.state;
            }
            _ => return &self.state,
        };

        let Self {
            endpoint,
            view,
            options,
            state,
        } = self;

        *state = UiState::Loading;
        info!("Submitting {}", file.display());
        let mut busy = BusyGuard::engage(view);

        *state = match run_submission(&*endpoint, file, text) {
            Ok(result) => {
                if let Some(msg) = &result.message {
                    debug!("Endpoint message: {msg}");
                }
                let rendered = render_result(&result, &*options);
                busy.view().show_result(&rendered);
                info!("Match result: {}", rendered.percentage);
                UiState::Success(result)
            }
            Err(err) => {
                error!("Submission failed: {err}");
                let failure = SubmissionFailure::from(&err);
                busy.view().show_error(&failure.message);
                UiState::Error(failure)
            }
        };
        drop(busy);

        &self.state
    }
}

/// Encode, post and interpret. Encoding failures never reach the network.
fn run_submission<E: MatchEndpoint>(
    endpoint: &E,
    file: &Path,
    text: &str,
) -> Result<SubmissionResult, SubmitError> {
    let request = SubmissionRequest {
        file_content_base64: encode::encode(file)?,
        file_name: encode::file_name(file),
        job_description_text: text.to_string(),
    };
    let reply = endpoint.post_submission(&request)?;
    interpret_reply(&reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EndpointReply;
    use std::cell::Cell;
    use std::io::Write;

    #[derive(Default)]
    struct Flags {
        enabled: Vec<bool>,
        progress: Vec<bool>,
        notices: usize,
        panic_on_result: bool,
    }

    impl SubmissionView for Flags {
        fn notify(&mut self, _message: &str) {
            self.notices += 1;
        }
        fn set_submit_enabled(&mut self, enabled: bool) {
            self.enabled.push(enabled);
        }
        fn set_progress_visible(&mut self, visible: bool) {
            self.progress.push(visible);
        }
        fn clear_panels(&mut self) {}
        fn show_result(&mut self, _rendered: &RenderedResult) {
            if self.panic_on_result {
                panic!("result panel failed to render");
            }
        }
        fn show_error(&mut self, _message: &str) {}
    }

    struct Canned {
        status: u16,
        body: &'static str,
        calls: Cell<usize>,
    }

    impl MatchEndpoint for Canned {
        fn post_submission(&self, _req: &SubmissionRequest) -> Result<EndpointReply, SubmitError> {
            self.calls.set(self.calls.get() + 1);
            Ok(EndpointReply {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    fn canned(status: u16, body: &'static str) -> Canned {
        Canned {
            status,
            body,
            calls: Cell::new(0),
        }
    }

    #[test]
    fn guard_restores_view_on_drop() {
        let mut flags = Flags::default();
        {
            let _busy = BusyGuard::engage(&mut flags);
        }
        assert_eq!(flags.enabled, vec![false, true]);
        assert_eq!(flags.progress, vec![true, false]);
    }

    #[test]
    fn validation_failure_leaves_state_idle() {
        let mut c = SubmissionController::new(canned(200, "{}"), Flags::default(), DisplayOptions::default());
        assert_eq!(c.submit(None, Some("jd")), &UiState::Idle);
        assert_eq!(c.view().notices, 1);
        assert!(c.view().enabled.is_empty());
        assert_eq!(c.endpoint().calls.get(), 0);
    }

    #[test]
    fn success_sets_state_and_restores_view() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0, 1, 2]).unwrap();

        let mut c = SubmissionController::new(
            canned(200, r#"{"match_percentage": 73, "missing_skills": []}"#),
            Flags::default(),
            DisplayOptions::default(),
        );
        let state = c.submit(Some(file.path()), Some("jd")).clone();
        assert!(matches!(state, UiState::Success(ref r) if r.match_percentage == 73.0));
        assert_eq!(c.view().enabled.last(), Some(&true));
        assert_eq!(c.view().progress.last(), Some(&false));
    }

    #[test]
    fn view_restored_when_rendering_panics() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"resume").unwrap();

        let view = Flags {
            panic_on_result: true,
            ..Flags::default()
        };
        let mut c = SubmissionController::new(
            canned(200, r#"{"match_percentage": 73, "missing_skills": []}"#),
            view,
            DisplayOptions::default(),
        );

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            c.submit(Some(file.path()), Some("jd"));
        }));
        assert!(outcome.is_err());
        assert_eq!(c.view().enabled, vec![false, true]);
        assert_eq!(c.view().progress, vec![true, false]);
    }
}
