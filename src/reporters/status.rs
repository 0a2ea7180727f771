//! Commit status publishing
//!
//! Sends gate verdicts to the GitHub commit status API. Publishing is
//! best-effort: a failure is logged as a warning and the run carries on
//! with the verdict it already computed.

use crate::models::{CheckStatus, GateVerdict};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// GitHub rejects commit status descriptions longer than this
pub const MAX_DESCRIPTION_CHARS: usize = 140;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// State of a commit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    Success,
    Failure,
    Pending,
}

impl From<CheckStatus> for CommitState {
    fn from(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Success => CommitState::Success,
            CheckStatus::Failure => CommitState::Failure,
        }
    }
}

impl std::fmt::Display for CommitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitState::Success => write!(f, "success"),
            CommitState::Failure => write!(f, "failure"),
            CommitState::Pending => write!(f, "pending"),
        }
    }
}

/// One commit status, ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitStatus {
    pub context: String,
    pub state: CommitState,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
}

impl CommitStatus {
    pub fn new(
        context: &str,
        state: CommitState,
        description: &str,
        target_url: Option<&str>,
    ) -> Self {
        Self {
            context: context.to_string(),
            state,
            description: truncate_description(description),
            target_url: target_url.map(str::to_string),
        }
    }
}

/// Cut a description down to [`MAX_DESCRIPTION_CHARS`], ending in `...`
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_CHARS {
        return description.to_string();
    }
    let mut cut: String = description.chars().take(MAX_DESCRIPTION_CHARS - 3).collect();
    cut.push_str("...");
    cut
}

/// Errors from a status publish attempt
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("missing {0}")]
    MissingSetting(&'static str),

    #[error("invalid repository '{0}', expected owner/name")]
    InvalidRepository(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Something that can publish a commit status
pub trait StatusPublisher {
    fn publish(&self, status: &CommitStatus) -> Result<(), PublishError>;
}

/// Where statuses are posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubTarget {
    pub api_url: String,
    /// `owner/name`
    pub repository: String,
    pub sha: String,
}

impl GitHubTarget {
    pub fn new(
        api_url: Option<&str>,
        repository: Option<&str>,
        sha: Option<&str>,
    ) -> Result<Self, PublishError> {
        let repository = repository
            .filter(|r| !r.is_empty())
            .ok_or(PublishError::MissingSetting("repository (GITHUB_REPOSITORY)"))?;
        let sha = sha
            .filter(|s| !s.is_empty())
            .ok_or(PublishError::MissingSetting("commit sha (GITHUB_SHA)"))?;

        match repository.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
            _ => return Err(PublishError::InvalidRepository(repository.to_string())),
        }

        Ok(Self {
            api_url: api_url
                .filter(|u| !u.is_empty())
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            repository: repository.to_string(),
            sha: sha.to_string(),
        })
    }

    pub fn statuses_url(&self) -> String {
        format!(
            "{}/repos/{}/statuses/{}",
            self.api_url, self.repository, self.sha
        )
    }
}

/// Link to a GitHub Actions run, used as the status target URL
pub fn actions_run_url(server_url: &str, repository: &str, run_id: &str) -> String {
    format!(
        "{}/{}/actions/runs/{}",
        server_url.trim_end_matches('/'),
        repository,
        run_id
    )
}

/// Commit status client for the GitHub REST API (sync HTTP via ureq)
pub struct GitHubStatusClient {
    target: GitHubTarget,
    token: String,
    agent: ureq::Agent,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // Status codes are mapped to PublishError::Api below
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .new_agent()
}

impl GitHubStatusClient {
    pub fn new(target: GitHubTarget, token: impl Into<String>) -> Result<Self, PublishError> {
        let token = token.into();
        if token.is_empty() {
            return Err(PublishError::MissingSetting("token (GITHUB_TOKEN)"));
        }
        Ok(Self {
            target,
            token,
            agent: make_agent(),
        })
    }

    pub fn target(&self) -> &GitHubTarget {
        &self.target
    }
}

impl StatusPublisher for GitHubStatusClient {
    fn publish(&self, status: &CommitStatus) -> Result<(), PublishError> {
        let response = self
            .agent
            .post(&self.target.statuses_url())
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", concat!("covgate/", env!("CARGO_PKG_VERSION")))
            .send_json(status)
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let code = response.status().as_u16();
        if code >= 300 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(PublishError::Api {
                status: code,
                message,
            });
        }
        Ok(())
    }
}

/// Outcome of a best-effort publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Published,
    Failed(String),
}

/// Publishes statuses, swallowing failures with a warning
pub struct StatusReporter<P: StatusPublisher> {
    publisher: P,
}

impl<P: StatusPublisher> StatusReporter<P> {
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    #[cfg(test)]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn report_status(
        &self,
        context: &str,
        state: CommitState,
        description: &str,
        target_url: Option<&str>,
    ) -> ReportOutcome {
        let status = CommitStatus::new(context, state, description, target_url);
        match self.publisher.publish(&status) {
            Ok(()) => {
                info!("Reported status '{}': {} - {}", context, state, status.description);
                ReportOutcome::Published
            }
            Err(e) => {
                warn!("Failed to report status '{}': {}", context, e);
                ReportOutcome::Failed(e.to_string())
            }
        }
    }

    /// Publish every verdict; one failure does not stop the rest
    pub fn report_verdicts(
        &self,
        verdicts: &[GateVerdict],
        target_url: Option<&str>,
    ) -> Vec<ReportOutcome> {
        verdicts
            .iter()
            .map(|v| {
                self.report_status(
                    &v.context,
                    v.result.status.into(),
                    &v.result.description,
                    target_url,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusCheckResult;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPublisher {
        sent: RefCell<Vec<CommitStatus>>,
    }

    impl StatusPublisher for RecordingPublisher {
        fn publish(&self, status: &CommitStatus) -> Result<(), PublishError> {
            self.sent.borrow_mut().push(status.clone());
            Ok(())
        }
    }

    /// Fails the first publish, accepts the rest
    #[derive(Default)]
    struct FlakyPublisher {
        calls: RefCell<usize>,
    }

    impl StatusPublisher for FlakyPublisher {
        fn publish(&self, _status: &CommitStatus) -> Result<(), PublishError> {
            let mut calls = self.calls.borrow_mut();
            *calls += 1;
            if *calls == 1 {
                Err(PublishError::Api {
                    status: 422,
                    message: "Validation Failed".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn verdict(context: &str, result: StatusCheckResult) -> GateVerdict {
        GateVerdict {
            context: context.into(),
            result,
        }
    }

    #[test]
    fn test_report_status_records_payload() {
        let reporter = StatusReporter::new(RecordingPublisher::default());
        let outcome = reporter.report_status(
            "coverage/project",
            CommitState::Failure,
            "80.00% < target 90%",
            Some("https://example.test/run/1"),
        );
        assert_eq!(outcome, ReportOutcome::Published);

        let sent = reporter.publisher().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].state, CommitState::Failure);
        assert_eq!(sent[0].target_url.as_deref(), Some("https://example.test/run/1"));
    }

    #[test]
    fn test_failure_is_swallowed_and_rest_still_sent() {
        let reporter = StatusReporter::new(FlakyPublisher::default());
        let outcomes = reporter.report_verdicts(
            &[
                verdict("coverage/project", StatusCheckResult::success("ok")),
                verdict("coverage/patch", StatusCheckResult::success("ok")),
            ],
            None,
        );
        assert!(matches!(outcomes[0], ReportOutcome::Failed(ref m) if m.contains("422")));
        assert_eq!(outcomes[1], ReportOutcome::Published);
        assert_eq!(*reporter.publisher().calls.borrow(), 2);
    }

    #[test]
    fn test_payload_json_shape() {
        let status = CommitStatus::new("coverage/patch", CommitState::Pending, "waiting", None);
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["state"], "pending");
        assert_eq!(value["context"], "coverage/patch");
        assert!(value.get("target_url").is_none());
    }

    #[test]
    fn test_truncate_description() {
        let short = "80.00% >= target 70%";
        assert_eq!(truncate_description(short), short);

        let long = "é".repeat(200);
        let cut = truncate_description(&long);
        assert_eq!(cut.chars().count(), MAX_DESCRIPTION_CHARS);
        assert!(cut.ends_with("..."));

        let exact = "x".repeat(MAX_DESCRIPTION_CHARS);
        assert_eq!(truncate_description(&exact), exact);
    }

    #[test]
    fn test_target_validation() {
        let target = GitHubTarget::new(None, Some("acme/widgets"), Some("abc123")).unwrap();
        assert_eq!(
            target.statuses_url(),
            "https://api.github.com/repos/acme/widgets/statuses/abc123"
        );

        let ghes = GitHubTarget::new(Some("https://ghe.local/api/v3/"), Some("a/b"), Some("f00")).unwrap();
        assert_eq!(ghes.statuses_url(), "https://ghe.local/api/v3/repos/a/b/statuses/f00");

        assert!(matches!(
            GitHubTarget::new(None, Some("widgets"), Some("abc")),
            Err(PublishError::InvalidRepository(_))
        ));
        assert!(matches!(
            GitHubTarget::new(None, Some("a/b"), None),
            Err(PublishError::MissingSetting(_))
        ));
        assert!(matches!(
            GitHubTarget::new(None, None, Some("abc")),
            Err(PublishError::MissingSetting(_))
        ));
    }

    #[test]
    fn test_empty_token_rejected() {
        let target = GitHubTarget::new(None, Some("a/b"), Some("abc")).unwrap();
        assert!(matches!(
            GitHubStatusClient::new(target, ""),
            Err(PublishError::MissingSetting(_))
        ));
    }

    #[test]
    fn test_unreachable_api_is_a_warning_not_an_error() {
        let target =
            GitHubTarget::new(Some("http://127.0.0.1:9"), Some("a/b"), Some("abc")).unwrap();
        let reporter = StatusReporter::new(GitHubStatusClient::new(target, "token").unwrap());
        let outcome = reporter.report_status("coverage/project", CommitState::Success, "ok", None);
        assert!(matches!(outcome, ReportOutcome::Failed(_)));
    }

    #[test]
    fn test_actions_run_url() {
        assert_eq!(
            actions_run_url("https://github.com/", "acme/widgets", "42"),
            "https://github.com/acme/widgets/actions/runs/42"
        );
    }
}
