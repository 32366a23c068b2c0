//! Policy tables used to backfill under-specified briefs.
//!
//! Both tables are keyed by the lowercase gap name and are read-only after
//! first use. A gap without an entry gets the generic template.

use std::collections::HashMap;

use once_cell::sync::Lazy;

type Template = [&'static str; 3];

/// Acceptance criteria and starter tasks for one gap.
struct Policy {
    acceptance_criteria: Template,
    starter_tasks: Template,
}

static GENERIC: Policy = Policy {
    acceptance_criteria: [
        "Core features meet requirements.",
        "Project runs without runtime errors.",
        "README explains setup and usage.",
    ],
    starter_tasks: [
        "Create repo & venv.",
        "Install deps.",
        "Write README goals + run steps.",
    ],
};

static POLICIES: Lazy<HashMap<&'static str, Policy>> = Lazy::new(|| {
    HashMap::from([
        (
            "ci/cd",
            Policy {
                acceptance_criteria: [
                    "Pipeline triggers on commit and passes tests.",
                    "Deploys to staging automatically.",
                    "Logs visible in CI dashboard.",
                ],
                starter_tasks: [
                    "Init repo + branch protection.",
                    "Add CI workflow (build/test).",
                    "Add deploy step to staging.",
                ],
            },
        ),
        (
            "react",
            Policy {
                acceptance_criteria: [
                    "No console errors on load.",
                    "State updates without page reload.",
                    "At least one component test passes.",
                ],
                starter_tasks: [
                    "Scaffold with Vite/CRA.",
                    "Create core components + routes.",
                    "Bind to mock API and render list.",
                ],
            },
        ),
        (
            "regex",
            Policy {
                acceptance_criteria: [
                    "Correctly filters target text.",
                    "No false positives on sample set.",
                    "User can edit regex and see live results.",
                ],
                starter_tasks: [
                    "Create sample dataset.",
                    "Draft initial regex patterns.",
                    "Add filter preview UI/CLI.",
                ],
            },
        ),
        (
            "sql",
            Policy {
                acceptance_criteria: [
                    "CRUD operations supported.",
                    "Queries complete quickly on sample data.",
                    "Integrity constraints prevent duplicates.",
                ],
                starter_tasks: [
                    "Design ERD.",
                    "Create tables + FKs.",
                    "Write SELECT/JOIN examples.",
                ],
            },
        ),
        (
            "api",
            Policy {
                acceptance_criteria: [
                    "Endpoints return correct status and schema.",
                    "Auth and basic rate limit in place.",
                    "Docs include working examples.",
                ],
                starter_tasks: [
                    "Init FastAPI/Flask app.",
                    "Add GET/POST endpoints.",
                    "Test with curl/Postman.",
                ],
            },
        ),
    ])
});

fn policy_for(gap: &str) -> &'static Policy {
    POLICIES.get(gap.trim().to_lowercase().as_str()).unwrap_or(&GENERIC)
}

fn owned(template: &Template) -> Vec<String> {
    template.iter().map(|s| s.to_string()).collect()
}

/// Three acceptance criteria for `gap`.
pub fn default_acceptance_criteria(gap: &str) -> Vec<String> {
    owned(&policy_for(gap).acceptance_criteria)
}

/// Three starter tasks for `gap`.
pub fn default_starter_tasks(gap: &str) -> Vec<String> {
    owned(&policy_for(gap).starter_tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(
            default_acceptance_criteria("SQL"),
            default_acceptance_criteria("sql")
        );
        assert_eq!(default_starter_tasks("CI/CD")[0], "Init repo + branch protection.");
    }

    #[test]
    fn test_unknown_gap_uses_generic_template() {
        assert_eq!(
            default_acceptance_criteria("Kubernetes"),
            vec![
                "Core features meet requirements.",
                "Project runs without runtime errors.",
                "README explains setup and usage.",
            ]
        );
        assert_eq!(default_starter_tasks("general")[2], "Write README goals + run steps.");
    }

    #[test]
    fn test_every_template_has_three_entries() {
        for gap in ["ci/cd", "react", "regex", "sql", "api", "anything"] {
            assert_eq!(default_acceptance_criteria(gap).len(), 3);
            assert_eq!(default_starter_tasks(gap).len(), 3);
        }
    }
}
