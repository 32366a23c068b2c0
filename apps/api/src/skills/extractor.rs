//! Skill extraction: literal, word-bounded, case-insensitive keyword matching
//! of a fixed vocabulary against raw document text.

use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;

/// A vocabulary compiled once into one matcher per entry.
pub struct SkillMatcher {
    entries: Vec<(String, Regex)>,
}

impl SkillMatcher {
    /// Compiles every non-blank vocabulary entry. Entries are escaped, so
    /// metacharacters like `+` or `.` are matched literally.
    pub fn new(vocabulary: &[String]) -> Result<Self> {
        let mut entries = Vec::with_capacity(vocabulary.len());
        for skill in vocabulary {
            let trimmed = skill.trim();
            if trimmed.is_empty() {
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", regex::escape(trimmed));
            let re = Regex::new(&pattern)
                .with_context(|| format!("Failed to compile matcher for skill '{trimmed}'"))?;
            entries.push((trimmed.to_string(), re));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the distinct vocabulary entries found in `text`, in their
    /// vocabulary casing, sorted ascending.
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return vec![];
        }

        let mut seen = HashSet::new();
        let mut found: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .filter(|(skill, _)| seen.insert(skill.to_lowercase()))
            .map(|(skill, _)| skill.clone())
            .collect();
        found.sort();
        found
    }
}
