//! Validation of requested dice configurations.
//!
//! The pool itself accepts any count; bounds are a policy for callers
//! that take requests from outside. Sessions and CLIs run a request
//! through here before loading it.

use crate::die::DieKind;

/// Most dice of one kind a single request may ask for.
pub const MAX_DICE_PER_KIND: u32 = 100;

/// A warning or error found while validating a dice request.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The request fragment the issue was found in.
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Validate a requested dice configuration.
///
/// Each pair is a die kind (as text) and a requested count. Returns the
/// issues found; an empty list means the request is safe to load.
pub fn validate_config(config: &[(String, i64)]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen: Vec<DieKind> = Vec::new();
    for (kind, count) in config {
        match DieKind::parse(kind) {
            None => issues.push(ValidationIssue {
                subject: kind.clone(),
                message: "unknown die kind".to_string(),
                is_error: true,
            }),
            Some(parsed) if seen.contains(&parsed) => issues.push(ValidationIssue {
                subject: kind.clone(),
                message: "listed more than once; counts are added together".to_string(),
                is_error: false,
            }),
            Some(parsed) => seen.push(parsed),
        }
        if *count < 0 {
            issues.push(ValidationIssue {
                subject: kind.clone(),
                message: format!("invalid count {count}"),
                is_error: true,
            });
        } else if *count > i64::from(MAX_DICE_PER_KIND) {
            issues.push(ValidationIssue {
                subject: kind.clone(),
                message: format!("too many dice: maximum {MAX_DICE_PER_KIND} per kind"),
                is_error: true,
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
        pairs.iter().map(|(k, n)| (k.to_string(), *n)).collect()
    }

    #[test]
    fn valid_config_has_no_issues() {
        let issues = validate_config(&config(&[("d6", 3), ("d20", 1), ("d100", 0)]));
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn unknown_kind_errors() {
        let issues = validate_config(&config(&[("d66", 2)]));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error);
        assert_eq!(issues[0].subject, "d66");
        assert!(issues[0].message.contains("unknown die kind"));
    }

    #[test]
    fn negative_count_errors() {
        let issues = validate_config(&config(&[("d6", -1)]));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("invalid count -1"));
    }

    #[test]
    fn count_above_maximum_errors() {
        let issues = validate_config(&config(&[("d6", 101)]));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("maximum 100"));
        assert!(validate_config(&config(&[("d6", 100)])).is_empty());
    }

    #[test]
    fn duplicate_kind_warns() {
        let issues = validate_config(&config(&[("d6", 2), ("D6", 3)]));
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
        assert!(issues[0].message.contains("listed more than once"));
    }

    #[test]
    fn issues_accumulate_across_entries() {
        let issues = validate_config(&config(&[("d66", -2), ("d6", 200), ("d8", 1)]));
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.is_error));
    }

    #[test]
    fn display_includes_level_and_subject() {
        let issues = validate_config(&config(&[("d66", 1)]));
        assert_eq!(issues[0].to_string(), "error: d66: unknown die kind");
    }
}
