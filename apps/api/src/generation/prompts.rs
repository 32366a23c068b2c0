//! Prompt assembly for project-brief generation.

use crate::models::job::{JobContext, JobContextSnippet};

/// Max job postings quoted in the prompt.
const MAX_POSTINGS: usize = 5;
/// Max bare skills quoted when no postings are available.
const MAX_CONTEXT_SKILLS: usize = 10;
/// Description characters kept per posting.
const DESCRIPTION_CHARS: usize = 150;

/// Project generation prompt template.
/// Replace: {cv_skills}, {gaps}, {job_context}
pub const PROJECT_PROMPT_TEMPLATE: &str = r#"Generate exactly 3 JSON objects describing apprenticeship-ready projects.

User skills: {cv_skills}
Skill gaps: {gaps}
Job context:
{job_context}

Each project MUST include:
- title
- summary (2 sentences)
- objectives (array of 3)
- key_skills (include one of the gaps)
- tools
- difficulty (Easy|Medium|Hard)
- github_repo_name (kebab-case)
- acceptance_criteria (array of 3)
- starter_tasks (array of 3)

Return ONLY a valid JSON array of the 3 objects (no markdown, no prose)."#;

/// Fills the generation template with the candidate's skills, gaps and job context.
pub fn build_project_prompt(cv_skills: &[String], gaps: &[String], context: &JobContext) -> String {
    PROJECT_PROMPT_TEMPLATE
        .replace("{cv_skills}", &cv_skills.join(", "))
        .replace("{gaps}", &gaps.join(", "))
        .replace("{job_context}", &render_job_context(context))
}

fn render_job_context(context: &JobContext) -> String {
    match context {
        JobContext::Postings(jobs) => jobs
            .iter()
            .take(MAX_POSTINGS)
            .map(|job| {
                let snippet = JobContextSnippet::from_record(job, DESCRIPTION_CHARS);
                format!("- {}: {}...", snippet.title, snippet.description)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        JobContext::Skills(skills) => skills
            .iter()
            .take(MAX_CONTEXT_SKILLS)
            .map(|s| format!("- {s}"))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
