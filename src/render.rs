// Display formatting for a successful match. Pure functions, no terminal IO.

use crate::model::SubmissionResult;

pub const NO_MATCHED_SKILLS: &str = "No matched skills identified.";
pub const NO_MISSING_SKILLS: &str = "No significant missing skills identified.";

/// Display knobs that differ between deployments of the same workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Render the matched-skills list when the endpoint returns one.
    pub show_matched_skills: bool,
    /// Cap on rendered missing skills; `None` shows all.
    pub missing_skills_limit: Option<usize>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            show_matched_skills: true,
            missing_skills_limit: Some(5),
        }
    }
}

/// Result panel contents, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResult {
    pub percentage: String,
    /// `None` when matched skills are disabled or absent from the response.
    pub matched_skills: Option<Vec<String>>,
    pub missing_skills: Vec<String>,
}

/// `"<int>%"`, rounded and clamped to 0..=100.
pub fn format_percentage(value: f64) -> String {
    let pct = if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    };
    format!("{pct}%")
}

/// One item per skill in order, truncated to `limit` (a zero limit means no
/// cap). An empty list yields exactly one placeholder item.
pub fn skill_items(skills: &[String], limit: Option<usize>, placeholder: &str) -> Vec<String> {
    if skills.is_empty() {
        return vec![placeholder.to_string()];
    }
    let take = limit.filter(|&n| n > 0).unwrap_or(skills.len());
    skills.iter().take(take).cloned().collect()
}

pub fn render_result(result: &SubmissionResult, options: &DisplayOptions) -> RenderedResult {
    let matched_skills = if options.show_matched_skills {
        result
            .matched_skills
            .as_deref()
            .map(|skills| skill_items(skills, None, NO_MATCHED_SKILLS))
    } else {
        None
    };

    RenderedResult {
        percentage: format_percentage(result.match_percentage),
        matched_skills,
        missing_skills: skill_items(
            &result.missing_skills,
            options.missing_skills_limit,
            NO_MISSING_SKILLS,
        ),
    }
}
