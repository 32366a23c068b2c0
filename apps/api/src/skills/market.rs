//! Market reference data: the skill vocabulary and the job-postings corpus,
//! loaded once at startup and read-only afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::models::job::{JobContext, JobRecord};
use crate::skills::extractor::SkillMatcher;

/// Process-wide reference data shared by every request.
pub struct ReferenceData {
    pub matcher: SkillMatcher,
    pub jobs: Vec<JobRecord>,
    /// Top-N most demanded skills across `jobs`.
    pub market_skills: Vec<String>,
}

impl ReferenceData {
    pub fn load(skills_path: &Path, jobs_path: &Path, top_n: usize) -> Result<Self> {
        let vocabulary: Vec<String> = load_json(skills_path)?;
        let jobs: Vec<JobRecord> = load_json(jobs_path)?;
        let data = Self::from_parts(vocabulary, jobs, top_n)?;

        info!(
            "Reference data loaded: {} vocabulary skills, {} job records, {} market skills",
            data.matcher.len(),
            data.jobs.len(),
            data.market_skills.len()
        );
        Ok(data)
    }

    pub fn from_parts(vocabulary: Vec<String>, jobs: Vec<JobRecord>, top_n: usize) -> Result<Self> {
        let matcher = SkillMatcher::new(&vocabulary)?;
        let market_skills = top_skills_from_jobs(&jobs, top_n);
        Ok(Self {
            matcher,
            jobs,
            market_skills,
        })
    }

    /// Structured snippets when the corpus has any titles or descriptions,
    /// otherwise the bare market skills.
    pub fn job_context(&self) -> JobContext {
        if self.jobs.iter().any(JobRecord::has_snippet) {
            JobContext::Postings(self.jobs.clone())
        } else {
            JobContext::Skills(self.market_skills.clone())
        }
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference data file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse reference data file {}", path.display()))
}

/// The `n` most frequent skills across all job records.
///
/// Counting is case-insensitive and keeps the first-seen casing. Ties are
/// broken by first-encountered order.
pub fn top_skills_from_jobs(jobs: &[JobRecord], n: usize) -> Vec<String> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for skill in jobs.iter().flat_map(|j| j.skills.iter()) {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        match index.get(&trimmed.to_lowercase()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(trimmed.to_lowercase(), counts.len());
                counts.push((trimmed.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-encountered order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(skill, _)| skill).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn job(skills: &[&str]) -> JobRecord {
        JobRecord {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_top_skills_ranked_by_frequency() {
        let jobs = vec![job(&["SQL", "Python"]), job(&["Python"]), job(&["Docker", "Python", "SQL"])];
        assert_eq!(top_skills_from_jobs(&jobs, 20), vec!["Python", "SQL", "Docker"]);
    }

    #[test]
    fn test_top_skills_ties_keep_first_encountered_order() {
        let jobs = vec![job(&["Git", "Excel"]), job(&["Linux"])];
        assert_eq!(top_skills_from_jobs(&jobs, 20), vec!["Git", "Excel", "Linux"]);
    }

    #[test]
    fn test_top_skills_counts_case_insensitively() {
        let jobs = vec![job(&["aws", "Git"]), job(&["AWS"]), job(&["Aws"])];
        assert_eq!(top_skills_from_jobs(&jobs, 20), vec!["aws", "Git"]);
    }

    #[test]
    fn test_top_skills_truncates_to_n() {
        let jobs = vec![job(&["A", "B", "C", "D"])];
        assert_eq!(top_skills_from_jobs(&jobs, 2), vec!["A", "B"]);
    }

    #[test]
    fn test_job_context_prefers_postings_when_present() {
        let mut posting = job(&["SQL"]);
        posting.title = Some("Data Apprentice".to_string());
        let data = ReferenceData::from_parts(vec!["SQL".to_string()], vec![posting], 20).unwrap();
        assert!(matches!(data.job_context(), JobContext::Postings(ref p) if p.len() == 1));
    }

    #[test]
    fn test_job_context_falls_back_to_skills() {
        let data = ReferenceData::from_parts(vec![], vec![job(&["SQL", "Git"])], 20).unwrap();
        match data.job_context() {
            JobContext::Skills(skills) => assert_eq!(skills, vec!["SQL", "Git"]),
            other => panic!("expected skills context, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reads_both_files() {
        let mut skills = tempfile::NamedTempFile::new().unwrap();
        write!(skills, r#"["Python", "SQL", "Docker"]"#).unwrap();
        let mut jobs = tempfile::NamedTempFile::new().unwrap();
        write!(
            jobs,
            r#"[{{"title": "Junior Analyst", "skills": ["SQL", "Excel"]}}, {{"skills": ["SQL"]}}]"#
        )
        .unwrap();

        let data = ReferenceData::load(skills.path(), jobs.path(), 20).unwrap();
        assert_eq!(data.matcher.len(), 3);
        assert_eq!(data.market_skills, vec!["SQL", "Excel"]);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = ReferenceData::load(
            Path::new("/nonexistent/skills.json"),
            Path::new("/nonexistent/jobs.json"),
            20,
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("/nonexistent/skills.json"));
    }
}
