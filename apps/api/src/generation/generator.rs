//! Project generation: orchestrates the brief pipeline.
//!
//! Flow: build prompt → completion call (bounded by a caller-supplied timeout)
//!       → normalize → briefs. Any failure on the completion path falls back to
//!       the template generator; the caller always gets a displayable batch.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::generation::fallback::fallback_projects;
use crate::generation::normalizer::normalize;
use crate::generation::prompts::build_project_prompt;
use crate::llm_client::Completer;
use crate::models::brief::ProjectBriefBatch;
use crate::models::job::JobContext;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of the language-model path.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationAttempt {
    Completed(ProjectBriefBatch),
    /// The endpoint was unreachable, errored or timed out.
    Failed(String),
}

/// Which path produced the briefs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BriefSource {
    Generated,
    Fallback,
}

/// Briefs plus how they were produced.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectsOutcome {
    pub source: BriefSource,
    /// Set when generation failed and the fallback was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub projects: ProjectBriefBatch,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Produces briefs for the candidate, preferring the language model.
///
/// `timeout` bounds the whole completion, retries included; callers pass
/// `LlmSettings::call_budget`.
pub async fn produce_briefs(
    completer: &dyn Completer,
    timeout: Duration,
    cv_skills: &[String],
    gaps: &[String],
    context: &JobContext,
) -> ProjectsOutcome {
    let attempt = attempt_generation(completer, timeout, cv_skills, gaps, context).await;
    resolve_attempt(attempt, gaps)
}

/// Runs prompt → completion → normalize. Only the completion call can fail.
pub async fn attempt_generation(
    completer: &dyn Completer,
    timeout: Duration,
    cv_skills: &[String],
    gaps: &[String],
    context: &JobContext,
) -> GenerationAttempt {
    let prompt = build_project_prompt(cv_skills, gaps, context);

    let raw = match tokio::time::timeout(timeout, completer.complete(&prompt)).await {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => return GenerationAttempt::Failed(e.to_string()),
        Err(_) => {
            return GenerationAttempt::Failed(format!(
                "LLM call timed out after {}s",
                timeout.as_secs()
            ))
        }
    };

    GenerationAttempt::Completed(normalize(&raw, gaps))
}

/// Picks the generated batch, or the fallback batch with a warning.
pub fn resolve_attempt(attempt: GenerationAttempt, gaps: &[String]) -> ProjectsOutcome {
    match attempt {
        GenerationAttempt::Completed(projects) => {
            if projects.has_error_indicator() {
                warn!("Model output was unusable; returning error-indicator brief");
            } else {
                info!("Generated {} project briefs", projects.len());
            }
            ProjectsOutcome {
                source: BriefSource::Generated,
                warning: None,
                projects,
            }
        }
        GenerationAttempt::Failed(reason) => {
            warn!("AI generation failed ({reason}); using fallback");
            ProjectsOutcome {
                source: BriefSource::Fallback,
                warning: Some(format!("AI generation failed ({reason}); using fallback.")),
                projects: fallback_projects(gaps),
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a canned completion and records the prompt it saw.
    struct CannedCompleter {
        reply: Result<String, u16>,
        seen: Mutex<Vec<String>>,
    }

    impl CannedCompleter {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(vec![]),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl Completer for CannedCompleter {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "model not loaded".to_string(),
                }),
            }
        }
    }

    struct SlowCompleter;

    #[async_trait]
    impl Completer for SlowCompleter {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok("[]".to_string())
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[tokio::test]
    async fn test_successful_completion_is_normalized() {
        let completer = CannedCompleter::ok(
            r#"[{"title": "Ledger", "key_skills": ["SQL"], "github_repo_name": "Ledger App"}]"#,
        );
        let outcome = produce_briefs(
            &completer,
            TIMEOUT,
            &strings(&["Python"]),
            &strings(&["Docker", "SQL"]),
            &JobContext::Skills(strings(&["SQL"])),
        )
        .await;

        assert_eq!(outcome.source, BriefSource::Generated);
        assert!(outcome.warning.is_none());
        assert_eq!(outcome.projects.len(), 1);
        assert_eq!(outcome.projects.briefs()[0].github_repo_name, "ledger-app");

        let prompts = completer.seen.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Skill gaps: Docker, SQL"));
    }

    #[tokio::test]
    async fn test_malformed_completion_stays_on_generated_path() {
        let completer = CannedCompleter::ok("Sure! Here are some ideas...");
        let outcome = produce_briefs(
            &completer,
            TIMEOUT,
            &strings(&["Python"]),
            &strings(&["SQL"]),
            &JobContext::Skills(vec![]),
        )
        .await;
        assert_eq!(outcome.source, BriefSource::Generated);
        assert_eq!(outcome.projects.briefs()[0].title, "Parse error");
    }

    #[tokio::test]
    async fn test_endpoint_failure_with_no_gaps_uses_default_fallback() {
        let completer = CannedCompleter::failing(503);
        let outcome = produce_briefs(
            &completer,
            TIMEOUT,
            &strings(&["Python"]),
            &[],
            &JobContext::Skills(vec![]),
        )
        .await;

        assert_eq!(outcome.source, BriefSource::Fallback);
        assert!(outcome.warning.unwrap().contains("503"));
        assert_eq!(outcome.projects.len(), 3);
        assert_eq!(outcome.projects.briefs()[0].key_skills, vec!["APIs"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let outcome = produce_briefs(
            &SlowCompleter,
            Duration::from_secs(5),
            &strings(&["Python"]),
            &strings(&["Docker"]),
            &JobContext::Skills(vec![]),
        )
        .await;
        assert_eq!(outcome.source, BriefSource::Fallback);
        assert!(outcome.warning.unwrap().contains("timed out"));
        assert_eq!(outcome.projects.briefs()[0].title, "Docker Practice Project");
    }

    #[tokio::test]
    async fn test_retries_run_within_budget_when_endpoint_hangs() {
        use crate::config::LlmSettings;
        use crate::llm_client::LlmClient;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        // Accepts connections and holds them open without ever replying.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = connections.clone();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                held.push(socket);
            }
        });

        let settings = LlmSettings {
            base_url: format!("http://{addr}/v1"),
            timeout: Duration::from_secs(1),
            max_attempts: 2,
            ..LlmSettings::default()
        };
        let client = LlmClient::new(settings.clone()).unwrap();

        let outcome = produce_briefs(
            &client,
            settings.call_budget() + Duration::from_millis(500),
            &strings(&["Python"]),
            &strings(&["SQL"]),
            &JobContext::Skills(vec![]),
        )
        .await;

        assert_eq!(outcome.source, BriefSource::Fallback);
        assert!(outcome.warning.unwrap().contains("timed out after 1s"));
        assert_eq!(connections.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_resolve_failed_attempt_is_pure_fallback() {
        let outcome = resolve_attempt(
            GenerationAttempt::Failed("connection refused".to_string()),
            &strings(&["SQL"]),
        );
        assert_eq!(outcome.source, BriefSource::Fallback);
        assert_eq!(outcome.projects, fallback_projects(&strings(&["SQL"])));
    }

    #[test]
    fn test_outcome_serialization_omits_absent_warning() {
        let outcome = resolve_attempt(
            GenerationAttempt::Completed(fallback_projects(&[])),
            &[],
        );
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["source"], "generated");
        assert!(value.get("warning").is_none());
        assert_eq!(value["projects"].as_array().unwrap().len(), 3);
    }
}
