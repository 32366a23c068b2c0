use serde::Deserialize;

/// One record from the job-postings corpus. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl JobRecord {
    /// True when the record carries a title or description worth quoting.
    pub fn has_snippet(&self) -> bool {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        present(&self.title) || present(&self.description)
    }
}

/// What the generator is told about the job market.
#[derive(Debug, Clone)]
pub enum JobContext {
    /// Structured postings, quoted as title plus truncated description.
    Postings(Vec<JobRecord>),
    /// Bare demanded skills, used when no postings carry text.
    Skills(Vec<String>),
}

/// A posting reduced to what fits in a prompt line.
#[derive(Debug, Clone, PartialEq)]
pub struct JobContextSnippet {
    pub title: String,
    pub description: String,
}

impl JobContextSnippet {
    /// Title (or a generic label) and the first `max_chars` characters of the description.
    pub fn from_record(job: &JobRecord, max_chars: usize) -> Self {
        let title = job
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("Apprentice role")
            .to_string();
        let description = job
            .description
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(max_chars)
            .collect();
        Self { title, description }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_record_tolerates_missing_fields() {
        let job: JobRecord = serde_json::from_str(r#"{"company": "Acme"}"#).unwrap();
        assert!(job.skills.is_empty());
        assert!(!job.has_snippet());
    }

    #[test]
    fn test_job_record_with_description_has_snippet() {
        let job: JobRecord =
            serde_json::from_str(r#"{"description": "Build ETL jobs", "skills": ["SQL"]}"#)
                .unwrap();
        assert!(job.has_snippet());
        assert_eq!(job.skills, vec!["SQL"]);
    }

    #[test]
    fn test_snippet_truncates_by_characters() {
        let job = JobRecord {
            title: Some("  ".to_string()),
            description: Some("é".repeat(10)),
            skills: vec![],
        };
        let snippet = JobContextSnippet::from_record(&job, 4);
        assert_eq!(snippet.title, "Apprentice role");
        assert_eq!(snippet.description, "éééé");
    }
}
