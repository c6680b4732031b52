//! In-memory policy store
//!
//! Roles and role bindings live behind a single reader/writer lock covering
//! both maps. Writes validate first and only then take the exclusive lock, so
//! a refused write never touches stored state. Values are cloned on the way
//! in and on the way out; callers never hold references into the store.

use crate::config::AuthorizerConfig;
use crate::error::{Result, ValidationError};
use crate::metrics::{EvalMetrics, MetricsCollector};
use crate::types::{PolicySet, Role, RoleBinding};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

/// Roles and bindings guarded together
#[derive(Debug, Default)]
pub(crate) struct PolicyState {
    pub(crate) roles: HashMap<String, Role>,

    /// Ordered by name, which is the evaluation scan order
    pub(crate) bindings: BTreeMap<String, RoleBinding>,
}

/// RBAC authorizer: policy store plus evaluator.
///
/// Create one with [`Authorizer::new`] and share it (e.g. behind an `Arc`)
/// with every request handler. All methods take `&self` and are safe to call
/// concurrently.
#[derive(Debug)]
pub struct Authorizer {
    pub(crate) state: RwLock<PolicyState>,
    pub(crate) metrics: Option<MetricsCollector>,
    config: AuthorizerConfig,
}

impl Authorizer {
    /// Create an empty authorizer with the default configuration
    pub fn new() -> Self {
        Self::with_config(AuthorizerConfig::default())
    }

    /// Create an empty authorizer
    pub fn with_config(config: AuthorizerConfig) -> Self {
        let metrics = config.enable_metrics.then(MetricsCollector::new);

        info!(
            "Authorizer initialized with strict_role_references={}, metrics={}",
            config.strict_role_references, config.enable_metrics
        );

        Self {
            state: RwLock::new(PolicyState::default()),
            metrics,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &AuthorizerConfig {
        &self.config
    }

    /// Validate a role and upsert it by name
    pub fn set_role(&self, role: Role) -> Result<()> {
        if let Err(e) = role.validate() {
            return Err(self.reject(e));
        }

        let name = role.name.clone();
        let mut state = self.state.write();
        let replaced = state.roles.insert(name.clone(), role).is_some();
        drop(state);

        info!(role = %name, replaced, "Role stored");
        Ok(())
    }

    /// Validate a role binding and upsert it by name
    ///
    /// The referenced role does not need to exist unless
    /// [`AuthorizerConfig::strict_role_references`] is set.
    pub fn set_role_binding(&self, binding: RoleBinding) -> Result<()> {
        if let Err(e) = binding.validate() {
            return Err(self.reject(e));
        }

        let mut state = self.state.write();

        if self.config.strict_role_references && !state.roles.contains_key(&binding.role) {
            drop(state);
            return Err(self.reject(ValidationError::UnresolvedRoleReference {
                binding: binding.name,
                role: binding.role,
            }));
        }

        let name = binding.name.clone();
        let role = binding.role.clone();
        let replaced = state.bindings.insert(name.clone(), binding).is_some();
        drop(state);

        info!(role_binding = %name, role = %role, replaced, "RoleBinding stored");
        Ok(())
    }

    /// Remove a role; no-op if absent
    pub fn delete_role(&self, name: &str) {
        if self.state.write().roles.remove(name).is_some() {
            info!(role = %name, "Role deleted");
        }
    }

    /// Remove a role binding; no-op if absent
    pub fn delete_role_binding(&self, name: &str) {
        if self.state.write().bindings.remove(name).is_some() {
            info!(role_binding = %name, "RoleBinding deleted");
        }
    }

    /// Get a copy of the named role
    pub fn get_role(&self, name: &str) -> Option<Role> {
        self.state.read().roles.get(name).cloned()
    }

    /// Get a copy of the named role binding
    pub fn get_role_binding(&self, name: &str) -> Option<RoleBinding> {
        self.state.read().bindings.get(name).cloned()
    }

    /// All roles, sorted by name
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.state.read().roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }

    /// All role bindings, sorted by name
    pub fn role_bindings(&self) -> Vec<RoleBinding> {
        self.state.read().bindings.values().cloned().collect()
    }

    /// Consistent copy of every role and binding
    pub fn snapshot(&self) -> PolicySet {
        let state = self.state.read();
        let mut roles: Vec<Role> = state.roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));

        PolicySet {
            roles,
            role_bindings: state.bindings.values().cloned().collect(),
        }
    }

    /// Upsert a whole policy set atomically.
    ///
    /// Every entity is validated before anything is written; on the first
    /// failure the store is left untouched. In strict mode a binding may
    /// reference a role from the same set.
    pub fn apply(&self, set: PolicySet) -> Result<()> {
        for role in &set.roles {
            if let Err(e) = role.validate() {
                return Err(self.reject(e));
            }
        }
        for binding in &set.role_bindings {
            if let Err(e) = binding.validate() {
                return Err(self.reject(e));
            }
        }

        let mut state = self.state.write();

        if self.config.strict_role_references {
            let unresolved = set.role_bindings.iter().find(|binding| {
                !state.roles.contains_key(&binding.role)
                    && !set.roles.iter().any(|role| role.name == binding.role)
            });

            if let Some(binding) = unresolved {
                let err = ValidationError::UnresolvedRoleReference {
                    binding: binding.name.clone(),
                    role: binding.role.clone(),
                };
                drop(state);
                return Err(self.reject(err));
            }
        }

        let (role_count, binding_count) = (set.roles.len(), set.role_bindings.len());
        for role in set.roles {
            state.roles.insert(role.name.clone(), role);
        }
        for binding in set.role_bindings {
            state.bindings.insert(binding.name.clone(), binding);
        }
        drop(state);

        info!(
            roles = role_count,
            role_bindings = binding_count,
            "Policy set applied"
        );
        Ok(())
    }

    /// Get evaluation counters, `None` when metrics are disabled
    pub fn metrics(&self) -> Option<EvalMetrics> {
        self.metrics.as_ref().map(MetricsCollector::snapshot)
    }

    /// Prometheus rendering of the counters, `None` when metrics are disabled
    pub fn export_prometheus(&self) -> Option<String> {
        let metrics = self.metrics.as_ref()?;
        Some(metrics.export_prometheus())
    }

    /// Zero the evaluation counters; no-op when metrics are disabled
    pub fn reset_metrics(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.reset();
        }
    }

    fn reject(&self, err: ValidationError) -> ValidationError {
        warn!(error = %err, "Policy write rejected");
        if let Some(metrics) = &self.metrics {
            metrics.record_rejected_write();
        }
        err
    }
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::new()
    }
}
