//! Deterministic template briefs, used when the language model is unavailable.

use crate::generation::normalizer::slugify;
use crate::models::brief::{Difficulty, ProjectBrief, ProjectBriefBatch, MAX_BRIEFS};

/// Gaps assumed when the candidate has none.
pub const DEFAULT_GAPS: [&str; 3] = ["APIs", "Power BI", "Linux"];

/// One brief per gap, for the first three gaps.
pub fn fallback_projects(gaps: &[String]) -> ProjectBriefBatch {
    let briefs = if gaps.is_empty() {
        DEFAULT_GAPS.iter().map(|g| practice_brief(g)).collect()
    } else {
        gaps.iter()
            .take(MAX_BRIEFS)
            .map(|g| practice_brief(g))
            .collect()
    };
    ProjectBriefBatch::from_briefs(briefs)
}

fn practice_brief(gap: &str) -> ProjectBrief {
    ProjectBrief {
        title: format!("{gap} Practice Project"),
        summary: format!("Build a hands-on mini project to strengthen {gap} skills."),
        objectives: vec![
            format!("Implement a small feature using {gap}."),
            "Document progress and key learnings.".to_string(),
            "Add screenshots or a short demo.".to_string(),
        ],
        key_skills: vec![gap.to_string()],
        tools: vec!["Python".to_string()],
        difficulty: Difficulty::Medium,
        github_repo_name: slugify(&format!("{gap}-practice")),
        acceptance_criteria: vec![
            "All main features function correctly.".to_string(),
            "Project runs without errors.".to_string(),
            "README clearly documents setup and usage.".to_string(),
        ],
        starter_tasks: vec![
            "Set up project folder and virtual environment.".to_string(),
            "Initialize a GitHub repository.".to_string(),
            format!("Implement one basic {gap}-related feature."),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_gaps_use_default_triple() {
        let batch = fallback_projects(&[]);
        let titles: Vec<&str> = batch.briefs().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["APIs Practice Project", "Power BI Practice Project", "Linux Practice Project"]
        );
        assert_eq!(batch.briefs()[1].github_repo_name, "power-bi-practice");
    }

    #[test]
    fn test_one_brief_per_gap_up_to_three() {
        let gaps: Vec<String> = ["AWS", "CI/CD", "Docker", "SQL"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let batch = fallback_projects(&gaps);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.briefs()[1].github_repo_name, "ci-cd-practice");
        assert_eq!(batch.briefs()[2].key_skills, vec!["Docker"]);
    }

    #[test]
    fn test_single_gap_gives_single_brief() {
        let batch = fallback_projects(&["Git".to_string()]);
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_fallback_briefs_are_fully_populated() {
        for brief in fallback_projects(&[]).briefs() {
            assert_eq!(brief.objectives.len(), 3);
            assert_eq!(brief.acceptance_criteria.len(), 3);
            assert_eq!(brief.starter_tasks.len(), 3);
            assert_eq!(brief.tools, vec!["Python"]);
            assert_eq!(brief.difficulty, Difficulty::Medium);
            assert_eq!(slugify(&brief.github_repo_name), brief.github_repo_name);
        }
    }
}
