// Policy file loader - reads a `ModerationPolicy` from JSON on disk.
//
// Missing fields fall back to the defaults; the result is validated before it
// reaches the classifier.

use crate::core::moderation::ModerationPolicy;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyFileError {
    #[error("Failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse policy file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid policy in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

pub fn load_policy(path: impl AsRef<Path>) -> Result<ModerationPolicy, PolicyFileError> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path).map_err(|source| PolicyFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let policy: ModerationPolicy =
        serde_json::from_str(&raw).map_err(|source| PolicyFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    policy.validate().map_err(|reason| PolicyFileError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;

    tracing::info!(path = %path.display(), "Loaded moderation policy");
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::Severity;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn policy_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = policy_file(r#"{ "blocking_threshold": "critical", "min_phone_digits": 9 }"#);

        let policy = load_policy(file.path()).unwrap();

        assert_eq!(policy.blocking_threshold, Severity::Critical);
        assert_eq!(policy.min_phone_digits, 9);
        assert_eq!(policy.max_phone_digits, 15);
        assert_eq!(policy.max_input_bytes, 16 * 1024);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_policy(dir.path().join("nope.json"));
        assert!(matches!(result, Err(PolicyFileError::Io { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let file = policy_file("{ not json");
        assert!(matches!(
            load_policy(file.path()),
            Err(PolicyFileError::Parse { .. })
        ));
    }

    #[test]
    fn test_unknown_severity_is_parse_error() {
        let file = policy_file(r#"{ "blocking_threshold": "fatal" }"#);
        assert!(matches!(
            load_policy(file.path()),
            Err(PolicyFileError::Parse { .. })
        ));
    }

    #[test]
    fn test_inverted_phone_bounds_rejected() {
        let file = policy_file(r#"{ "min_phone_digits": 12, "max_phone_digits": 8 }"#);
        assert!(matches!(
            load_policy(file.path()),
            Err(PolicyFileError::Invalid { .. })
        ));
    }
}
