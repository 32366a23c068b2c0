use serde::{Deserialize, Serialize};

/// Slug used whenever a repository name normalizes to nothing.
pub const DEFAULT_REPO_NAME: &str = "apprentice-project";
/// Placeholder for any field the generator left out.
pub const NOT_AVAILABLE: &str = "N/A";
/// Title carried by both error-indicator briefs.
pub const PARSE_ERROR_TITLE: &str = "Parse error";
/// Most briefs a batch will ever carry.
pub const MAX_BRIEFS: usize = 3;

/// Effort level attached to a brief.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Difficulty {
    /// Case-insensitive parse; anything unrecognised becomes `NotAvailable`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::NotAvailable,
        }
    }
}

/// A structured project recommendation aimed at one or more skill gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectBrief {
    pub title: String,
    pub summary: String,
    pub objectives: Vec<String>,
    pub key_skills: Vec<String>,
    pub tools: Vec<String>,
    pub difficulty: Difficulty,
    pub github_repo_name: String,
    pub acceptance_criteria: Vec<String>,
    pub starter_tasks: Vec<String>,
}

impl ProjectBrief {
    /// Shared shape of the error-indicator briefs: neutral defaults plus
    /// a single acceptance criterion and starter task.
    fn error_indicator(summary: String, criterion: &str, task: &str) -> Self {
        Self {
            title: PARSE_ERROR_TITLE.to_string(),
            summary,
            objectives: vec![],
            key_skills: vec![],
            tools: vec![],
            difficulty: Difficulty::NotAvailable,
            github_repo_name: DEFAULT_REPO_NAME.to_string(),
            acceptance_criteria: vec![criterion.to_string()],
            starter_tasks: vec![task.to_string()],
        }
    }

    /// Stand-in for a completion that could not be parsed at all.
    /// The raw text is echoed so a person can inspect it.
    pub fn malformed_completion(raw: &str) -> Self {
        Self::error_indicator(
            format!("Returned text:\n{raw}"),
            "Manual validation required.",
            "Inspect output and re-run.",
        )
    }

    /// Stand-in for a completion that parsed but held no usable records.
    pub fn empty_result() -> Self {
        Self::error_indicator(
            "Empty result after parsing.".to_string(),
            "Project builds successfully.",
            "Initialize repository.",
        )
    }
}

/// Between one and three briefs, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectBriefBatch(Vec<ProjectBrief>);

impl ProjectBriefBatch {
    /// Keeps the first three briefs. An empty input becomes the
    /// empty-result indicator so a batch is never blank.
    pub fn from_briefs(mut briefs: Vec<ProjectBrief>) -> Self {
        if briefs.is_empty() {
            return Self(vec![ProjectBrief::empty_result()]);
        }
        briefs.truncate(MAX_BRIEFS);
        Self(briefs)
    }

    pub fn single(brief: ProjectBrief) -> Self {
        Self(vec![brief])
    }

    pub fn briefs(&self) -> &[ProjectBrief] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when any brief is a parse-error stand-in.
    pub fn has_error_indicator(&self) -> bool {
        self.briefs().iter().any(|b| b.title == PARSE_ERROR_TITLE)
    }
}
