//! Response normalization: turns an unreliable free-form completion into a
//! validated `ProjectBriefBatch`.
//!
//! Pipeline: `repair_structure` → `parse_completion` → `into_records` →
//! `repair_record` → batch sizing. Every stage is a plain function so each can
//! be tested on its own. `normalize` never fails: unparseable or empty input
//! resolves to an error-indicator brief.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::generation::policies::{default_acceptance_criteria, default_starter_tasks};
use crate::models::brief::{
    Difficulty, ProjectBrief, ProjectBriefBatch, DEFAULT_REPO_NAME, NOT_AVAILABLE,
};

/// Entries kept for each capped list field.
const LIST_CAP: usize = 3;
/// Gap used for template lookup when no gaps are known.
const GENERAL_GAP: &str = "general";

static ADJACENT_OBJECTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\}\s*\{").expect("adjacent-object pattern is valid"));
static ADJACENT_BRACKETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([}\]])\s*([{\[])").expect("adjacent-bracket pattern is valid"));

/// Normalizes a raw completion into between one and three briefs.
pub fn normalize(raw: &str, gaps: &[String]) -> ProjectBriefBatch {
    let raw = raw.trim();
    let cleaned = repair_structure(raw);

    let Some(parsed) = parse_completion(&cleaned) else {
        warn!("Completion could not be parsed as JSON; returning parse-error brief");
        debug!("Unparsed completion:\n{raw}");
        return ProjectBriefBatch::single(ProjectBrief::malformed_completion(raw));
    };

    let records = into_records(parsed);
    if records.is_empty() {
        warn!("Completion parsed but held no project records");
    }

    ProjectBriefBatch::from_briefs(
        records
            .into_iter()
            .map(|record| repair_record(record, gaps))
            .collect(),
    )
}

/// Stage 1: strips code fences and wraps bare sibling objects in an array.
pub fn repair_structure(raw: &str) -> String {
    let clean = raw.replace("```json", "").replace("```", "");
    let clean = clean.trim();

    if clean.matches('{').count() > 1 && !clean.starts_with('[') {
        format!("[{}]", ADJACENT_OBJECTS.replace_all(clean, "},{"))
    } else {
        clean.to_string()
    }
}

/// Stage 2: strict parse, then one lenient retry that closes the array and
/// separates adjacent brackets. `None` when both fail.
pub fn parse_completion(cleaned: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(cleaned) {
        return Some(value);
    }

    let mut patched = cleaned.to_string();
    if !patched.ends_with(']') {
        patched.push(']');
    }
    let patched = ADJACENT_BRACKETS.replace_all(&patched, "$1,$2");
    serde_json::from_str(&patched).ok()
}

/// Stage 3: a lone object becomes a one-record list. Non-object values
/// carry no records.
pub fn into_records(value: Value) -> Vec<Map<String, Value>> {
    match value {
        Value::Object(map) => vec![map],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => vec![],
    }
}

/// Stage 4: fills defaults, coerces list fields and backfills policy
/// templates for one record.
pub fn repair_record(mut record: Map<String, Value>, gaps: &[String]) -> ProjectBrief {
    let mut take = |name: &str| {
        record
            .remove(name)
            .unwrap_or_else(|| Value::String(NOT_AVAILABLE.to_string()))
    };

    let title = text_field(take("title"));
    let summary = text_field(take("summary"));
    let objectives = coerce_list(take("objectives"), Some(LIST_CAP));
    let mut key_skills = coerce_list(take("key_skills"), None);
    let tools = coerce_list(take("tools"), None);
    let difficulty = match take("difficulty") {
        Value::String(s) => Difficulty::parse_lenient(&s),
        _ => Difficulty::NotAvailable,
    };
    let repo_source = match take("github_repo_name") {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    let mut acceptance_criteria = coerce_list(take("acceptance_criteria"), Some(LIST_CAP));
    let mut starter_tasks = coerce_list(take("starter_tasks"), Some(LIST_CAP));

    let gap = select_gap(gaps, &key_skills);
    if key_skills.is_empty() {
        key_skills.push(gap.to_string());
    }
    if acceptance_criteria.len() < LIST_CAP {
        acceptance_criteria = default_acceptance_criteria(gap);
    }
    if starter_tasks.len() < LIST_CAP {
        starter_tasks = default_starter_tasks(gap);
    }

    ProjectBrief {
        title,
        summary,
        objectives,
        key_skills,
        tools,
        difficulty,
        github_repo_name: slugify(&repo_source),
        acceptance_criteria,
        starter_tasks,
    }
}

/// The first gap mentioned (case-insensitively) inside any key skill; else
/// the first gap; else `"general"`.
pub fn select_gap<'a>(gaps: &'a [String], key_skills: &[String]) -> &'a str {
    let lowered: Vec<String> = key_skills.iter().map(|s| s.to_lowercase()).collect();
    gaps.iter()
        .find(|gap| {
            let gap = gap.to_lowercase();
            lowered.iter().any(|skill| skill.contains(&gap))
        })
        .or_else(|| gaps.first())
        .map(String::as_str)
        .unwrap_or(GENERAL_GAP)
}

/// Coerces a loosely typed value into a list of non-empty strings.
///
/// Arrays keep their truthy entries. Strings are split into lines with
/// `-`/`•` bullets stripped. Anything else is an empty list.
pub fn coerce_list(value: Value, cap: Option<usize>) -> Vec<String> {
    let items: Vec<String> = match value {
        Value::Array(items) => items.into_iter().filter_map(list_entry).collect(),
        Value::String(s) => s
            .lines()
            .map(|line| {
                line.trim()
                    .trim_matches(|c: char| c == '-' || c == '•' || c == ' ')
                    .trim()
            })
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        _ => vec![],
    };

    match cap {
        Some(n) => items.into_iter().take(n).collect(),
        None => items,
    }
}

fn list_entry(item: Value) -> Option<String> {
    match item {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(ref a) if a.is_empty() => None,
        Value::Object(ref o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn text_field(value: Value) -> String {
    match value {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Null | Value::String(_) => NOT_AVAILABLE.to_string(),
        other => other.to_string(),
    }
}

/// Kebab-case slug restricted to `[a-z0-9-]`, with runs of `-` collapsed and
/// no leading or trailing `-`. Empty results become `apprentice-project`.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.trim().to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    match slug.trim_matches('-') {
        "" => DEFAULT_REPO_NAME.to_string(),
        trimmed => trimmed.to_string(),
    }
}
