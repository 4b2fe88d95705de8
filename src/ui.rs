// UI layer: a terminal `SubmissionView` and an interactive menu built on
// `dialoguer`. Everything is synchronous; the spinner ticks on indicatif's
// own thread while the request blocks.

use crate::api::MatchEndpoint;
use crate::controller::{SubmissionController, SubmissionView};
use crate::model::UiState;
use crate::render::{format_percentage, RenderedResult};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Editor, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

/// Prints panels to stdout and shows an indicatif spinner while loading.
pub struct TerminalView {
    spinner: Option<ProgressBar>,
    submit_enabled: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        TerminalView {
            spinner: None,
            submit_enabled: true,
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionView for TerminalView {
    fn notify(&mut self, message: &str) {
        println!("{} {}", "!".yellow().bold(), message.yellow());
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_progress_visible(&mut self, visible: bool) {
        if visible {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Analyzing resume...");
            spinner.enable_steady_tick(Duration::from_millis(80));
            self.spinner = Some(spinner);
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn clear_panels(&mut self) {
        // Printed panels scroll away; a separator marks the new attempt.
        println!();
    }

    fn show_result(&mut self, rendered: &RenderedResult) {
        let out = format_result(rendered);
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| print!("{out}")),
            None => print!("{out}"),
        }
    }

    fn show_error(&mut self, message: &str) {
        let line = format!("{} {}", "✗".red().bold(), message.red());
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
}

fn format_result(rendered: &RenderedResult) -> String {
    let mut out = format!(
        "{} {}\n",
        "Match:".bold(),
        rendered.percentage.as_str().green().bold()
    );
    if let Some(matched) = &rendered.matched_skills {
        out.push_str(&format!("{}\n", "Matched skills".bold()));
        for skill in matched {
            out.push_str(&format!("  • {skill}\n"));
        }
    }
    out.push_str(&format!("{}\n", "Missing skills".bold()));
    for skill in &rendered.missing_skills {
        out.push_str(&format!("  • {skill}\n"));
    }
    out
}

/// Inputs collected by the menu, kept between submissions.
#[derive(Default, Debug)]
struct Draft {
    resume: Option<PathBuf>,
    job_description: Option<String>,
}

enum Action {
    ChooseResume,
    EnterJobDescription,
    LoadJobDescription,
    Submit,
    ShowState,
    Exit,
}

/// Interactive loop. The Submit entry is only offered while the view's
/// submit control is enabled.
pub fn main_menu<E: MatchEndpoint>(
    controller: &mut SubmissionController<E, TerminalView>,
) -> Result<()> {
    let mut draft = Draft::default();
    loop {
        let mut items: Vec<(String, Action)> = vec![
            (
                format!("Choose resume file [{}]", describe_resume(&draft)),
                Action::ChooseResume,
            ),
            (
                format!("Enter job description [{}]", describe_job(&draft)),
                Action::EnterJobDescription,
            ),
            ("Load job description from file".into(), Action::LoadJobDescription),
        ];
        if controller.view().submit_enabled() {
            items.push(("Submit".into(), Action::Submit));
        }
        items.push(("Show last result".into(), Action::ShowState));
        items.push(("Exit".into(), Action::Exit));

        let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();
        let selection = Select::new()
            .with_prompt("Resume match")
            .items(&labels)
            .default(0)
            .interact()?;

        match items[selection].1 {
            Action::ChooseResume => {
                if let Some(path) = pick_resume()? {
                    draft.resume = Some(path);
                }
            }
            Action::EnterJobDescription => {
                let current = draft.job_description.as_deref().unwrap_or("");
                if let Some(text) = Editor::new()
                    .edit(current)
                    .context("Failed to open editor")?
                {
                    draft.job_description = Some(text);
                }
            }
            Action::LoadJobDescription => {
                let path: String = Input::new()
                    .with_prompt("Job description file")
                    .interact_text()?;
                match std::fs::read_to_string(&path) {
                    Ok(text) => draft.job_description = Some(text),
                    Err(e) => println!("Could not read {path}: {e}"),
                }
            }
            Action::Submit => {
                controller.submit(draft.resume.as_deref(), draft.job_description.as_deref());
            }
            Action::ShowState => print_state(controller.state()),
            Action::Exit => break,
        }
    }
    Ok(())
}

fn describe_resume(draft: &Draft) -> String {
    draft
        .resume
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "none".into())
}

fn describe_job(draft: &Draft) -> String {
    match &draft.job_description {
        Some(text) => format!("{} chars", text.chars().count()),
        None => "empty".into(),
    }
}

fn print_state(state: &UiState) {
    match state {
        UiState::Success(result) => println!(
            "Last result: {} match, {} missing skills",
            format_percentage(result.match_percentage),
            result.missing_skills.len()
        ),
        UiState::Error(failure) => println!("Last error: {}", failure.message),
        other => println!("No result yet ({}).", other.label()),
    }
}

#[cfg(feature = "file-dialog")]
fn pick_resume() -> Result<Option<PathBuf>> {
    Ok(rfd::FileDialog::new()
        .set_title("Select resume")
        .add_filter("Resume", &["pdf", "docx", "doc", "txt"])
        .pick_file())
}

#[cfg(not(feature = "file-dialog"))]
fn pick_resume() -> Result<Option<PathBuf>> {
    let path: String = Input::new()
        .with_prompt("Resume file path")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read resume path")?;
    let path = path.trim();
    Ok((!path.is_empty()).then(|| PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_text_lists_items_in_order() {
        let rendered = RenderedResult {
            percentage: "73%".into(),
            matched_skills: Some(vec!["Rust".into()]),
            missing_skills: vec!["SQL".into(), "Docker".into()],
        };
        let out = format_result(&rendered);
        assert!(out.contains("73%"));
        let sql = out.find("• SQL").unwrap();
        let docker = out.find("• Docker").unwrap();
        assert!(sql < docker);
        assert!(out.contains("• Rust"));
    }

    #[test]
    fn result_text_omits_matched_when_absent() {
        let rendered = RenderedResult {
            percentage: "10%".into(),
            matched_skills: None,
            missing_skills: vec!["SQL".into()],
        };
        assert!(!format_result(&rendered).contains("Matched skills"));
    }

    #[test]
    fn view_tracks_submit_control() {
        let mut view = TerminalView::new();
        assert!(view.submit_enabled());
        view.set_submit_enabled(false);
        assert!(!view.submit_enabled());
        view.set_progress_visible(true);
        view.set_progress_visible(false);
        assert!(view.spinner.is_none());
    }
}
