// Moderation domain models - data structures for the contact-info classifier.
//
// These are pure domain types with no transport dependencies.
// The serde attributes pin the JSON shape shared with the remote
// `moderate-message` function and the admin panel that renders it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious an infraction is. Ordered `Warning < Secondary < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth surfacing, never blocks under the default policy
    Warning,
    /// Off-platform contact attempt (social handles, payment services)
    #[serde(alias = "severe")]
    Secondary,
    /// Direct contact details (emails, phone numbers)
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Secondary => write!(f, "secondary"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Category of prohibited content that was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InfractionType {
    Email,
    Phone,
    SocialHandle,
    PaymentReference,
    ExternalLink,
    /// Input the classifier could not scan (bad encoding, oversized tail)
    Other,
}

impl InfractionType {
    /// Wire name, as it appears in the JSON response.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfractionType::Email => "EMAIL",
            InfractionType::Phone => "PHONE",
            InfractionType::SocialHandle => "SOCIAL_HANDLE",
            InfractionType::PaymentReference => "PAYMENT_REFERENCE",
            InfractionType::ExternalLink => "EXTERNAL_LINK",
            InfractionType::Other => "OTHER",
        }
    }
}

impl fmt::Display for InfractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category of violation found in a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infraction {
    #[serde(rename = "type")]
    pub infraction_type: InfractionType,
    /// Literal substrings of the input, first-seen order, no duplicates
    pub matches: Vec<String>,
    pub severity: Severity,
}

impl Infraction {
    pub fn new(infraction_type: InfractionType, severity: Severity) -> Self {
        Self {
            infraction_type,
            matches: Vec::new(),
            severity,
        }
    }

    /// Record a match unless the exact same substring is already present.
    pub fn push_match(&mut self, text: &str) {
        if !self.matches.iter().any(|m| m == text) {
            self.matches.push(text.to_string());
        }
    }
}

/// Result of moderating a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_blocked: bool,
    /// Never omitted: a clean message carries an empty list
    pub infractions: Vec<Infraction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Verdict {
    /// A verdict with no infractions.
    pub fn clean() -> Self {
        Self {
            is_blocked: false,
            infractions: Vec::new(),
            message: Some("No violations found".to_string()),
        }
    }

    /// Build a verdict from ordered infractions, deriving the block decision
    /// and the summary message from `threshold`.
    pub fn from_infractions(infractions: Vec<Infraction>, threshold: Severity) -> Self {
        if infractions.is_empty() {
            return Self::clean();
        }

        let is_blocked = infractions.iter().any(|i| i.severity >= threshold);

        let message = if is_blocked {
            most_severe(&infractions).map(|i| format!("Blocked: {} detected", i.infraction_type))
        } else {
            let types: Vec<&str> = infractions
                .iter()
                .map(|i| i.infraction_type.as_str())
                .collect();
            Some(format!("Allowed with warnings: {}", types.join(", ")))
        };

        Self {
            is_blocked,
            infractions,
            message,
        }
    }

    /// The infraction with the highest severity (first one wins on ties).
    pub fn most_severe(&self) -> Option<&Infraction> {
        most_severe(&self.infractions)
    }

    /// Look up the infraction for a given category, if any.
    pub fn infraction(&self, infraction_type: InfractionType) -> Option<&Infraction> {
        self.infractions
            .iter()
            .find(|i| i.infraction_type == infraction_type)
    }
}

// Ties keep detector order, which `max_by_key` would not (it returns the last).
fn most_severe(infractions: &[Infraction]) -> Option<&Infraction> {
    infractions
        .iter()
        .fold(None::<&Infraction>, |acc, i| match acc {
            Some(best) if best.severity >= i.severity => Some(best),
            _ => Some(i),
        })
}

/// Body sent to a moderator: the message plus the submitting principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationRequest {
    pub content: String,
    pub user_id: String,
}

/// Role of a logged-in principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "member" | "user" => Ok(Role::Member),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The logged-in caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Tunable classifier policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationPolicy {
    /// Lowest severity that blocks a message
    pub blocking_threshold: Severity,
    /// Bytes scanned per message; the rest is reported, not scanned
    pub max_input_bytes: usize,
    /// Shortest digit run treated as a phone number
    pub min_phone_digits: usize,
    /// Longest digit run treated as a phone number
    pub max_phone_digits: usize,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            blocking_threshold: Severity::Secondary,
            max_input_bytes: 16 * 1024,
            min_phone_digits: 7,
            max_phone_digits: 15,
        }
    }
}

impl ModerationPolicy {
    /// Reject combinations the classifier cannot honour.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_bytes == 0 {
            return Err("max_input_bytes must be greater than zero".to_string());
        }
        if self.min_phone_digits == 0 {
            return Err("min_phone_digits must be greater than zero".to_string());
        }
        if self.min_phone_digits > self.max_phone_digits {
            return Err(format!(
                "min_phone_digits ({}) exceeds max_phone_digits ({})",
                self.min_phone_digits, self.max_phone_digits
            ));
        }
        Ok(())
    }
}
