// Moderation service - the caller side of the classifier boundary.
//
// This service handles:
// - Session gating (no logged-in principal, no moderation call)
// - Input validation (blank messages never reach the moderator)
// - The deadline around the moderator call
// - Running the admin sample suite
//
// The moderator itself is a port: the in-process classifier or the remote
// `moderate-message` function. Failures surface as errors and are never turned
// into an "allowed" verdict.

use super::moderation_models::{ModerationRequest, Principal, Verdict};
use super::sample_cases::{SampleCase, SAMPLE_CASES};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("You must be logged in to moderate messages")]
    Unauthenticated,

    #[error("Only admins can run the moderation test suite")]
    Forbidden,

    #[error("Moderation call failed: {0}")]
    Invocation(String),

    #[error("Moderation response could not be read: {0}")]
    InvalidResponse(String),

    #[error("Moderation call timed out after {0:?}")]
    Timeout(Duration),
}

// ============================================================================
// PORTS
// ============================================================================

/// Anything that can turn a message into a verdict.
#[async_trait]
pub trait MessageModerator: Send + Sync {
    async fn moderate(&self, request: &ModerationRequest) -> Result<Verdict, ModerationError>;
}

// Lets the composition root pick a backend at runtime.
#[async_trait]
impl MessageModerator for Box<dyn MessageModerator> {
    async fn moderate(&self, request: &ModerationRequest) -> Result<Verdict, ModerationError> {
        (**self).moderate(request).await
    }
}

/// Source of the currently logged-in principal.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// `Ok(None)` means nobody is logged in.
    async fn current_principal(&self) -> Result<Option<Principal>, ModerationError>;
}

// ============================================================================
// REPORTS
// ============================================================================

/// A verdict plus who asked for it and when.
#[derive(Debug, Clone)]
pub struct ModerationReport {
    pub user_id: String,
    pub verdict: Verdict,
    pub checked_at: DateTime<Utc>,
}

impl ModerationReport {
    /// One-line notice for the person who ran the check.
    pub fn summary(&self) -> String {
        if self.verdict.is_blocked {
            let detected = self
                .verdict
                .most_severe()
                .map(|i| i.infraction_type.as_str())
                .unwrap_or("unknown");
            format!("Message blocked: {detected} detected")
        } else {
            "Message allowed: no infractions detected".to_string()
        }
    }
}

/// Outcome of one sample case.
#[derive(Debug)]
pub struct SampleOutcome {
    pub case: &'static SampleCase,
    pub result: Result<Verdict, ModerationError>,
}

impl SampleOutcome {
    /// The case passes when the moderator answered, blocked or allowed as
    /// expected, and reported the expected infraction type.
    pub fn passed(&self) -> bool {
        match &self.result {
            Ok(verdict) => {
                verdict.is_blocked == self.case.expect_blocked
                    && verdict.infraction(self.case.expected).is_some()
            }
            Err(_) => false,
        }
    }
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Default deadline for a single moderation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ModerationService<M: MessageModerator, S: SessionProvider> {
    moderator: M,
    sessions: S,
    timeout: Duration,
}

impl<M: MessageModerator, S: SessionProvider> ModerationService<M, S> {
    pub fn new(moderator: M, sessions: S) -> Self {
        Self {
            moderator,
            sessions,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Moderate one message on behalf of the logged-in principal.
    ///
    /// # Errors
    /// * `EmptyMessage` - blank input, the moderator is not called
    /// * `Unauthenticated` - nobody is logged in
    /// * `Timeout` / `Invocation` / `InvalidResponse` - the call did not
    ///   produce a verdict
    pub async fn check_message(&self, content: &str) -> Result<ModerationReport, ModerationError> {
        if content.trim().is_empty() {
            return Err(ModerationError::EmptyMessage);
        }

        let principal = self.require_principal().await?;
        let verdict = self.invoke(content, &principal.user_id).await?;

        tracing::info!(
            user_id = %principal.user_id,
            is_blocked = verdict.is_blocked,
            infractions = verdict.infractions.len(),
            content_len = content.len(),
            "Message moderated"
        );

        Ok(ModerationReport {
            user_id: principal.user_id,
            verdict,
            checked_at: Utc::now(),
        })
    }

    /// Run every sample case through the moderator. Admins only.
    pub async fn run_samples(&self) -> Result<Vec<SampleOutcome>, ModerationError> {
        let principal = self.require_principal().await?;
        if !principal.is_admin() {
            tracing::warn!(user_id = %principal.user_id, "Non-admin tried to run samples");
            return Err(ModerationError::Forbidden);
        }

        let mut outcomes = Vec::with_capacity(SAMPLE_CASES.len());
        for case in SAMPLE_CASES {
            let result = self.invoke(case.message, &principal.user_id).await;
            outcomes.push(SampleOutcome { case, result });
        }

        let passed = outcomes.iter().filter(|o| o.passed()).count();
        tracing::info!(passed, total = outcomes.len(), "Sample suite finished");

        Ok(outcomes)
    }

    async fn require_principal(&self) -> Result<Principal, ModerationError> {
        self.sessions
            .current_principal()
            .await?
            .ok_or(ModerationError::Unauthenticated)
    }

    async fn invoke(&self, content: &str, user_id: &str) -> Result<Verdict, ModerationError> {
        let request = ModerationRequest {
            content: content.to_string(),
            user_id: user_id.to_string(),
        };

        match tokio::time::timeout(self.timeout, self.moderator.moderate(&request)).await {
            Ok(Ok(verdict)) => Ok(verdict),
            Ok(Err(e)) => {
                tracing::warn!(user_id, "Moderation call failed: {}", e);
                Err(e)
            }
            Err(_) => {
                tracing::warn!(user_id, timeout = ?self.timeout, "Moderation call timed out");
                Err(ModerationError::Timeout(self.timeout))
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::{
        Infraction, InfractionType, MessageClassifier, Role, Severity,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Moderator double that records requests and replays a fixed answer.
    struct MockModerator {
        calls: AtomicUsize,
        last_request: Mutex<Option<ModerationRequest>>,
        answer: fn() -> Result<Verdict, ModerationError>,
        delay: Option<Duration>,
    }

    impl MockModerator {
        fn answering(answer: fn() -> Result<Verdict, ModerationError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
                answer,
                delay: None,
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::answering(|| Ok(Verdict::clean()))
            }
        }
    }

    #[async_trait]
    impl MessageModerator for MockModerator {
        async fn moderate(&self, request: &ModerationRequest) -> Result<Verdict, ModerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            (self.answer)()
        }
    }

    struct MockSession(Option<Principal>);

    #[async_trait]
    impl SessionProvider for MockSession {
        async fn current_principal(&self) -> Result<Option<Principal>, ModerationError> {
            Ok(self.0.clone())
        }
    }

    fn member() -> MockSession {
        MockSession(Some(Principal {
            user_id: "user-42".to_string(),
            role: Role::Member,
        }))
    }

    fn admin() -> MockSession {
        MockSession(Some(Principal {
            user_id: "admin-1".to_string(),
            role: Role::Admin,
        }))
    }

    fn blocked_email() -> Result<Verdict, ModerationError> {
        let mut infraction = Infraction::new(InfractionType::Email, Severity::Critical);
        infraction.push_match("juan@gmail.com");
        Ok(Verdict::from_infractions(vec![infraction], Severity::Secondary))
    }

    #[tokio::test]
    async fn test_sends_content_and_user_id() {
        let service = ModerationService::new(MockModerator::answering(blocked_email), member());

        let report = service
            .check_message("Mi email es juan@gmail.com")
            .await
            .unwrap();

        assert!(report.verdict.is_blocked);
        assert_eq!(report.user_id, "user-42");
        assert_eq!(report.summary(), "Message blocked: EMAIL detected");

        let request = service.moderator.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.content, "Mi email es juan@gmail.com");
        assert_eq!(request.user_id, "user-42");
    }

    #[tokio::test]
    async fn test_blank_message_never_reaches_moderator() {
        let service = ModerationService::new(MockModerator::answering(blocked_email), member());

        let result = service.check_message("   ").await;

        assert!(matches!(result, Err(ModerationError::EmptyMessage)));
        assert_eq!(service.moderator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_is_rejected_before_moderation() {
        let service =
            ModerationService::new(MockModerator::answering(blocked_email), MockSession(None));

        let result = service.check_message("hola").await;

        assert!(matches!(result, Err(ModerationError::Unauthenticated)));
        assert_eq!(service.moderator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invocation_failure_is_not_allowed() {
        let service = ModerationService::new(
            MockModerator::answering(|| Err(ModerationError::Invocation("502".to_string()))),
            member(),
        );

        let result = service.check_message("hola").await;

        assert!(matches!(result, Err(ModerationError::Invocation(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let service = ModerationService::new(MockModerator::slow(Duration::from_millis(500)), member())
            .with_timeout(Duration::from_millis(20));

        let result = service.check_message("hola").await;

        assert!(matches!(result, Err(ModerationError::Timeout(_))));
    }

    #[test]
    fn test_summary_names_most_severe_infraction() {
        let mut link = Infraction::new(InfractionType::ExternalLink, Severity::Warning);
        link.push_match("miportfolio.com");
        let mut other = Infraction::new(InfractionType::Other, Severity::Critical);
        other.push_match("\u{FFFD}");
        let report = ModerationReport {
            user_id: "user-42".to_string(),
            verdict: Verdict::from_infractions(vec![link, other], Severity::Secondary),
            checked_at: Utc::now(),
        };

        assert_eq!(report.summary(), "Message blocked: OTHER detected");
        assert_eq!(
            report.verdict.message.as_deref(),
            Some("Blocked: OTHER detected")
        );
    }

    #[tokio::test]
    async fn test_allowed_summary() {
        let service =
            ModerationService::new(MockModerator::answering(|| Ok(Verdict::clean())), member());

        let report = service.check_message("hola").await.unwrap();

        assert!(!report.verdict.is_blocked);
        assert_eq!(report.summary(), "Message allowed: no infractions detected");
    }

    #[tokio::test]
    async fn test_samples_require_admin() {
        let service = ModerationService::new(MessageClassifier::default(), member());
        assert!(matches!(
            service.run_samples().await,
            Err(ModerationError::Forbidden)
        ));

        let service = ModerationService::new(MessageClassifier::default(), MockSession(None));
        assert!(matches!(
            service.run_samples().await,
            Err(ModerationError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_samples_pass_against_local_classifier() {
        let service = ModerationService::new(MessageClassifier::default(), admin());

        let outcomes = service.run_samples().await.unwrap();

        assert_eq!(outcomes.len(), SAMPLE_CASES.len());
        for outcome in &outcomes {
            assert!(
                outcome.passed(),
                "sample failed: {:?} -> {:?}",
                outcome.case.message,
                outcome.result
            );
        }
    }

    #[tokio::test]
    async fn test_samples_fail_when_moderator_errors() {
        let service = ModerationService::new(
            MockModerator::answering(|| Err(ModerationError::Invocation("down".to_string()))),
            admin(),
        );

        let outcomes = service.run_samples().await.unwrap();

        assert!(outcomes.iter().all(|o| !o.passed()));
    }

    #[tokio::test]
    async fn test_boxed_moderator_delegates() {
        let boxed: Box<dyn MessageModerator> = Box::new(MessageClassifier::default());
        let service = ModerationService::new(boxed, member());

        let report = service.check_message("Pago por Stripe directo").await.unwrap();

        assert!(report.verdict.is_blocked);
    }
}
