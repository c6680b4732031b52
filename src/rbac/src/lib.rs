//! # CretoAI RBAC
//!
//! Embeddable role-based access control: an in-memory store of roles and
//! role bindings plus an evaluator that decides whether a set of subjects may
//! perform a verb on a resource.
//!
//! ## Features
//!
//! - **Allow-only, default-deny** model inspired by Kubernetes RBAC
//! - **Namespace scoping**: bindings are global or restricted to one namespace
//! - **Validated upserts**: malformed roles and bindings never reach the store
//! - **Concurrent reads**: evaluations share one reader/writer lock
//! - **Deterministic results**: bindings are scanned in name order
//!
//! Authentication, request routing, policy file loading and response
//! rendering belong to the embedding service.
//!
//! ## Example
//!
//! ```rust
//! use cretoai_rbac::{Authorizer, Resource, Role, RoleBinding, Rule, Subject};
//!
//! # fn main() -> Result<(), cretoai_rbac::ValidationError> {
//! let authz = Authorizer::new();
//!
//! authz.set_role(Role::new(
//!     "read-states",
//!     vec![Rule::new(["get", "list", "watch"], ["states"])],
//! ))?;
//! authz.set_role_binding(
//!     RoleBinding::new("states-reading-for-all", "read-states")
//!         .with_subject(Subject::group("system:authenticated")),
//! )?;
//!
//! let subjects = [Subject::user("stephen"), Subject::group("system:authenticated")];
//! let decision = authz.eval("get", &subjects, &Resource::new("", "states", "-"));
//!
//! assert!(decision.success);
//! assert_eq!(decision.role, "read-states");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decision;
pub mod error;
pub mod eval;
pub mod metrics;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::AuthorizerConfig;
pub use decision::Decision;
pub use error::{Result, ValidationError};
pub use metrics::{EvalMetrics, MetricsCollector};
pub use store::Authorizer;
pub use types::{PolicySet, Resource, Role, RoleBinding, Rule, Subject, SubjectKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
