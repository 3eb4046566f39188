// The moderation classifier - runs the detector pipeline over one message.
//
// Pure and stateless after construction: no I/O, no interior mutability,
// safe to share behind an `Arc` across tasks.

use super::detectors::{default_detectors, ClaimSet, Detector};
use super::moderation_models::{
    Infraction, InfractionType, ModerationPolicy, ModerationRequest, Severity, Verdict,
};
use super::moderation_service::{MessageModerator, ModerationError};
use async_trait::async_trait;

// How much of an unscanned tail is quoted back in the OTHER infraction.
const TAIL_PREVIEW_CHARS: usize = 32;

/// Ordered detector pipeline plus the policy that turns matches into a verdict.
pub struct MessageClassifier {
    policy: ModerationPolicy,
    detectors: Vec<Box<dyn Detector>>,
}

impl MessageClassifier {
    /// Classifier with the standard detector order for `policy`.
    pub fn new(policy: ModerationPolicy) -> Self {
        let detectors = default_detectors(&policy);
        Self { policy, detectors }
    }

    /// Classifier with a caller-supplied detector order.
    pub fn with_detectors(policy: ModerationPolicy, detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { policy, detectors }
    }

    pub fn policy(&self) -> &ModerationPolicy {
        &self.policy
    }

    /// Classify a message.
    ///
    /// Only the first `max_input_bytes` are scanned. Everything found in that
    /// prefix is reported; a non-empty remainder adds an `OTHER` infraction so
    /// the unscanned text never passes silently.
    pub fn classify(&self, message: &str) -> Verdict {
        if message.trim().is_empty() {
            return Verdict::clean();
        }

        let (scanned, tail) = split_at_boundary(message, self.policy.max_input_bytes);

        let mut claims = ClaimSet::new();
        let mut infractions = Vec::new();

        for detector in &self.detectors {
            let matches = detector.detect(scanned, &mut claims);
            tracing::debug!(
                detector = %detector.infraction_type(),
                matches = matches.len(),
                "Detector pass finished"
            );
            if matches.is_empty() {
                continue;
            }

            let mut infraction = Infraction::new(detector.infraction_type(), detector.severity());
            for m in &matches {
                infraction.push_match(m);
            }
            infractions.push(infraction);
        }

        if !tail.trim().is_empty() {
            tracing::warn!(
                scanned_bytes = scanned.len(),
                unscanned_bytes = tail.len(),
                "Message exceeds scan limit, flagging unscanned remainder"
            );
            let preview_end = tail
                .char_indices()
                .nth(TAIL_PREVIEW_CHARS)
                .map(|(i, _)| i)
                .unwrap_or(tail.len());
            let mut other = Infraction::new(InfractionType::Other, Severity::Secondary);
            other.push_match(&tail[..preview_end]);
            infractions.push(other);
        }

        Verdict::from_infractions(infractions, self.policy.blocking_threshold)
    }

    /// Classify raw bytes. Invalid UTF-8 fails closed: whatever decodes is still
    /// scanned, and a critical `OTHER` infraction marks the undecodable input.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Verdict {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.classify(text),
            Err(err) => {
                tracing::warn!(
                    valid_up_to = err.valid_up_to(),
                    "Message is not valid UTF-8, failing closed"
                );
                let lossy = String::from_utf8_lossy(bytes);
                let mut verdict = self.classify(&lossy);

                let mut infractions = std::mem::take(&mut verdict.infractions);
                let mut other = Infraction::new(InfractionType::Other, Severity::Critical);
                other.push_match(&char::REPLACEMENT_CHARACTER.to_string());
                infractions.push(other);

                Verdict::from_infractions(infractions, self.policy.blocking_threshold)
            }
        }
    }
}

impl Default for MessageClassifier {
    fn default() -> Self {
        Self::new(ModerationPolicy::default())
    }
}

#[async_trait]
impl MessageModerator for MessageClassifier {
    async fn moderate(&self, request: &ModerationRequest) -> Result<Verdict, ModerationError> {
        Ok(self.classify(&request.content))
    }
}

/// Split `text` at `limit` bytes, backing off to the previous char boundary.
fn split_at_boundary(text: &str, limit: usize) -> (&str, &str) {
    if text.len() <= limit {
        return (text, "");
    }
    let mut end = limit;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text.split_at(end)
}
