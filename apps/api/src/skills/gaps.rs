use std::collections::HashSet;

/// Market skills the candidate does not have, compared case-insensitively.
///
/// Gaps keep the casing used in `market_skills`, are deduplicated and come
/// back in ascending order.
pub fn find_gaps(candidate_skills: &[String], market_skills: &[String]) -> Vec<String> {
    let owned: HashSet<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();
    let mut emitted = HashSet::new();

    let mut gaps: Vec<String> = market_skills
        .iter()
        .filter(|skill| !skill.trim().is_empty())
        .filter(|skill| !owned.contains(&skill.to_lowercase()))
        .filter(|skill| emitted.insert(skill.to_lowercase()))
        .cloned()
        .collect();
    gaps.sort();
    gaps
}
