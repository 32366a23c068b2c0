use serde::Serialize;
use tracing::info;

use crate::skills::gaps::find_gaps;
use crate::skills::market::ReferenceData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Ok,
    /// Nothing in the document matched the vocabulary. Generation should stop here.
    NoSkills,
}

/// Skills found in a CV and how they compare with the market.
#[derive(Debug, Clone, Serialize)]
pub struct SkillAnalysis {
    pub status: AnalysisStatus,
    pub cv_skills: Vec<String>,
    pub market_skills: Vec<String>,
    pub gaps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Extracts skills from document text and computes gaps against the market list.
pub fn analyze_cv_text(text: &str, reference: &ReferenceData) -> SkillAnalysis {
    let cv_skills = reference.matcher.extract(text);

    if cv_skills.is_empty() {
        info!("No known skills found in document ({} chars)", text.len());
        return SkillAnalysis {
            status: AnalysisStatus::NoSkills,
            cv_skills,
            market_skills: reference.market_skills.clone(),
            gaps: vec![],
            message: Some(
                "No known skills found. Try another CV or update the skill list.".to_string(),
            ),
        };
    }

    let gaps = find_gaps(&cv_skills, &reference.market_skills);
    info!("Found {} CV skills and {} gaps", cv_skills.len(), gaps.len());

    let message = gaps
        .is_empty()
        .then(|| "No skill gaps detected against the current market list.".to_string());

    SkillAnalysis {
        status: AnalysisStatus::Ok,
        cv_skills,
        market_skills: reference.market_skills.clone(),
        gaps,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobRecord;

    fn reference() -> ReferenceData {
        let vocabulary = ["Python", "SQL", "Docker", "Excel"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let jobs = vec![JobRecord {
            title: None,
            description: None,
            skills: vec!["Python".to_string(), "SQL".to_string(), "Docker".to_string()],
        }];
        ReferenceData::from_parts(vocabulary, jobs, 20).unwrap()
    }

    #[test]
    fn test_analysis_reports_gaps() {
        let analysis = analyze_cv_text("Wrote python scripts for reporting.", &reference());
        assert_eq!(analysis.status, AnalysisStatus::Ok);
        assert_eq!(analysis.cv_skills, vec!["Python"]);
        assert_eq!(analysis.gaps, vec!["Docker", "SQL"]);
        assert!(analysis.message.is_none());
    }

    #[test]
    fn test_analysis_without_skills_stops() {
        let analysis = analyze_cv_text("Gardening and cooking.", &reference());
        assert_eq!(analysis.status, AnalysisStatus::NoSkills);
        assert!(analysis.gaps.is_empty());
        assert!(analysis.message.is_some());
    }

    #[test]
    fn test_full_coverage_has_no_gaps() {
        let analysis = analyze_cv_text("Python, SQL and Docker daily.", &reference());
        assert!(analysis.gaps.is_empty());
        assert!(analysis.message.unwrap().contains("No skill gaps"));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let value = serde_json::to_value(AnalysisStatus::NoSkills).unwrap();
        assert_eq!(value, "no_skills");
    }
}
