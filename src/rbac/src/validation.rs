//! Structural checks run before a role or binding is admitted into the store

use crate::error::{Result, ValidationError};
use crate::types::{Role, RoleBinding};

impl Role {
    /// Validate the role definition
    ///
    /// A role without rules is valid; it simply grants nothing.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName { entity: "Role" });
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.verbs.is_empty() {
                return Err(ValidationError::EmptyRuleVerbs {
                    role: self.name.clone(),
                    rule: index,
                });
            }

            if rule.resources.is_empty() {
                return Err(ValidationError::EmptyRuleResources {
                    role: self.name.clone(),
                    rule: index,
                });
            }

            if rule.verbs.iter().any(String::is_empty) {
                return Err(ValidationError::EmptyVerbString {
                    role: self.name.clone(),
                    rule: index,
                });
            }
        }

        Ok(())
    }
}

impl RoleBinding {
    /// Validate the binding definition
    ///
    /// The referenced role is not resolved here.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName {
                entity: "RoleBinding",
            });
        }

        if self.role.is_empty() {
            return Err(ValidationError::MissingRoleReference {
                binding: self.name.clone(),
            });
        }

        if self.subjects.is_empty() {
            return Err(ValidationError::NoSubjects {
                binding: self.name.clone(),
            });
        }

        for (index, subject) in self.subjects.iter().enumerate() {
            let reason = if subject.name.is_empty() {
                "empty name"
            } else if subject.kind.is_none() {
                "unset kind"
            } else {
                continue;
            };

            return Err(ValidationError::InvalidSubject {
                binding: self.name.clone(),
                index,
                reason,
            });
        }

        Ok(())
    }
}
