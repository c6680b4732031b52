//! Evaluation result returned by [`Authorizer::eval`](crate::Authorizer::eval)

use crate::types::{Resource, Subject, SubjectKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one evaluation.
///
/// On success the matched binding, role and subject are filled in. On denial
/// they stay empty. The request parameters are echoed in both cases so the
/// caller can render an explanation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the request is allowed
    pub success: bool,

    /// Name of the matching role binding
    pub role_binding: String,

    /// Name of the role granted by that binding
    pub role: String,

    /// Name of the binding subject that matched
    pub subject: String,

    /// Kind of the binding subject that matched
    pub subject_kind: Option<SubjectKind>,

    // Request parameters
    pub requesting_subjects: Vec<Subject>,
    pub requested_verb: String,
    pub requested_resource: Resource,
}

impl Decision {
    /// Denial carrying only the request parameters
    pub(crate) fn deny(verb: &str, subjects: &[Subject], resource: &Resource) -> Self {
        Self {
            requesting_subjects: subjects.to_vec(),
            requested_verb: verb.to_string(),
            requested_resource: resource.clone(),
            ..Default::default()
        }
    }

    /// Whether the request is allowed
    pub fn is_allowed(&self) -> bool {
        self.success
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.success {
            write!(f, "authorization failed for [")?;
            for (i, subject) in self.requesting_subjects.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", subject)?;
            }
            return write!(
                f,
                "] requesting {} {}",
                self.requested_verb, self.requested_resource
            );
        }

        let kind = self.subject_kind.map(|k| k.as_str()).unwrap_or("");
        write!(
            f,
            "authorization succeeded for {} {:?} as {} using {}",
            kind, self.subject, self.role, self.role_binding
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_echoes_request() {
        let subjects = vec![Subject::group("system:unauthenticated")];
        let resource = Resource::new("", "states", "");
        let decision = Decision::deny("get", &subjects, &resource);

        assert!(!decision.is_allowed());
        assert!(decision.role.is_empty());
        assert!(decision.role_binding.is_empty());
        assert!(decision.subject_kind.is_none());
        assert_eq!(decision.requested_verb, "get");
        assert_eq!(decision.requesting_subjects, subjects);
        assert_eq!(decision.requested_resource, resource);
    }

    #[test]
    fn test_display_denied() {
        let subjects = vec![
            Subject::user("stephen"),
            Subject::group("system:authenticated"),
        ];
        let decision = Decision::deny("get", &subjects, &Resource::new("beta", "states", "nodes"));

        assert_eq!(
            decision.to_string(),
            concat!(
                "authorization failed for [User:stephen Group:system:authenticated] ",
                r#"requesting get "beta":"states":"nodes""#,
            )
        );
    }

    #[test]
    fn test_display_allowed() {
        let decision = Decision {
            success: true,
            role_binding: "states-reading-for-all".to_string(),
            role: "read-states".to_string(),
            subject: "system:authenticated".to_string(),
            subject_kind: Some(SubjectKind::Group),
            ..Default::default()
        };

        assert_eq!(
            decision.to_string(),
            concat!(
                r#"authorization succeeded for Group "system:authenticated" "#,
                "as read-states using states-reading-for-all",
            )
        );
    }
}
