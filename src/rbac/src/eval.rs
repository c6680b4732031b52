//! Request evaluation
//!
//! A binding matches a request when all three hold:
//!
//! 1. its namespace is empty or equal to the resource namespace,
//! 2. one of the presented subjects equals one of its subjects (name and kind),
//! 3. its role exists and one of the role's rules allows the verb on the resource.
//!
//! Bindings are scanned in name order and the first match wins. Comparisons
//! are exact and case-sensitive; there are no wildcards and no deny rules.

use crate::decision::Decision;
use crate::store::Authorizer;
use crate::types::{Resource, Role, RoleBinding, Rule, Subject};
use tracing::{debug, trace};

impl Rule {
    /// Check if this rule allows `verb` on `resource`
    pub fn matches(&self, verb: &str, resource: &Resource) -> bool {
        contains(&self.resources, &resource.resource)
            && contains(&self.verbs, verb)
            && (self.resource_names.is_empty()
                || contains(&self.resource_names, &resource.resource_name))
    }
}

impl Role {
    /// Check if any rule of this role allows `verb` on `resource`
    pub fn allows(&self, verb: &str, resource: &Resource) -> bool {
        self.rules.iter().any(|rule| rule.matches(verb, resource))
    }
}

impl RoleBinding {
    /// Check if the binding applies to the given namespace
    pub fn applies_to_namespace(&self, namespace: &str) -> bool {
        self.namespace.is_empty() || self.namespace == namespace
    }

    /// Find the binding subject matched by one of the presented subjects
    pub fn matching_subject(&self, presented: &[Subject]) -> Option<&Subject> {
        self.subjects
            .iter()
            .find(|bound| presented.iter().any(|subject| subject == *bound))
    }
}

impl Authorizer {
    /// Evaluate a request against the stored bindings.
    ///
    /// Returns an allowing [`Decision`] for the first binding (by name) that
    /// matches, or a denial when none does. Both carry the request
    /// parameters. A binding whose role is not stored never matches.
    pub fn eval(&self, verb: &str, subjects: &[Subject], resource: &Resource) -> Decision {
        let decision = {
            let state = self.state.read();

            state
                .bindings
                .values()
                .find_map(|binding| {
                    if !binding.applies_to_namespace(&resource.namespace) {
                        trace!(role_binding = %binding.name, "Namespace out of scope");
                        return None;
                    }

                    let Some(subject) = binding.matching_subject(subjects) else {
                        trace!(role_binding = %binding.name, "No subject matches");
                        return None;
                    };

                    let Some(role) = state.roles.get(&binding.role) else {
                        trace!(
                            role_binding = %binding.name,
                            role = %binding.role,
                            "Role not found"
                        );
                        return None;
                    };

                    if !role.allows(verb, resource) {
                        trace!(role_binding = %binding.name, role = %role.name, "No rule matches");
                        return None;
                    }

                    Some(Decision {
                        success: true,
                        role_binding: binding.name.clone(),
                        role: role.name.clone(),
                        subject: subject.name.clone(),
                        subject_kind: subject.kind,
                        ..Decision::deny(verb, subjects, resource)
                    })
                })
                .unwrap_or_else(|| Decision::deny(verb, subjects, resource))
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_decision(decision.success);
        }

        debug!(
            allowed = decision.success,
            verb,
            resource = %resource,
            role_binding = %decision.role_binding,
            "RBAC evaluation"
        );

        decision
    }
}

/// Exact membership test
fn contains(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item == value)
}
