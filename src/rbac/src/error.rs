//! Error types for the RBAC policy store

use thiserror::Error;

/// Reasons a role or role binding is refused by the store.
///
/// Only write operations produce these. Evaluation never fails; a request
/// that matches nothing is a normal denial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Role or RoleBinding without a name
    #[error("{entity} needs to have a name")]
    MissingName { entity: &'static str },

    /// RoleBinding without a role reference
    #[error("RoleBinding '{binding}' needs to have a Role")]
    MissingRoleReference { binding: String },

    /// RoleBinding without any subject
    #[error("RoleBinding '{binding}' needs to have at least a Subject")]
    NoSubjects { binding: String },

    /// Subject with an empty name or an unset kind
    #[error("RoleBinding '{binding}' has an invalid subject at index {index}: {reason}")]
    InvalidSubject {
        binding: String,
        index: usize,
        reason: &'static str,
    },

    /// Rule without verbs
    #[error("Role '{role}' rule {rule} needs at least a verb")]
    EmptyRuleVerbs { role: String, rule: usize },

    /// Rule without resources
    #[error("Role '{role}' rule {rule} needs at least a resource")]
    EmptyRuleResources { role: String, rule: usize },

    /// Rule listing an empty verb
    #[error("Role '{role}' rule {rule} contains an empty verb")]
    EmptyVerbString { role: String, rule: usize },

    /// Role reference that does not resolve (strict mode only)
    #[error("RoleBinding '{binding}' references unknown Role '{role}'")]
    UnresolvedRoleReference { binding: String, role: String },
}

/// Result type for policy store operations
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::MissingName { entity: "Role" };
        assert_eq!(err.to_string(), "Role needs to have a name");

        let err = ValidationError::EmptyRuleVerbs {
            role: "node-watcher".to_string(),
            rule: 1,
        };
        assert_eq!(
            err.to_string(),
            "Role 'node-watcher' rule 1 needs at least a verb"
        );

        let err = ValidationError::UnresolvedRoleReference {
            binding: "rb".to_string(),
            role: "missing".to_string(),
        };
        assert!(err.to_string().contains("unknown Role 'missing'"));
    }
}
