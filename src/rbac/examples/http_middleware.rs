//! Walkthrough of the authorizer inside a request pipeline.
//!
//! A fake authenticator maps a user header to subjects, a router maps
//! `/{resource}/{namespace}/{resourceName}` to a resource (`-` is the global
//! namespace), and the decision is rendered as a status line.
//!
//! Run with `RUST_LOG=debug` to see the evaluator's own logs.

use cretoai_rbac::{Authorizer, Decision, PolicySet, Resource, Role, RoleBinding, Rule, Subject};
use tracing::{info, warn};

/// Stand-in for an HTTP request
struct Request<'a> {
    method: &'a str,
    path: &'a str,
    user: Option<&'a str>,
}

fn policy() -> PolicySet {
    PolicySet {
        roles: vec![
            Role::new(
                "read-states",
                vec![Rule::new(["get", "list", "watch"], ["states"])],
            ),
            Role::new(
                "node-watcher",
                vec![
                    Rule::new(["get", "list"], ["nodes"]),
                    Rule::new(["patch"], ["states"]).with_resource_names(["nodes"]),
                ],
            ),
        ],
        role_bindings: vec![
            RoleBinding::new("states-reading-for-all", "read-states")
                .with_subject(Subject::group("system:authenticated")),
            RoleBinding::new("alpha-node-watchers", "node-watcher")
                .in_namespace("alpha")
                .with_subject(Subject::user("bofh"))
                .with_subject(Subject::group("administrators"))
                .with_subject(Subject::service_account(
                    "system:serviceaccount:alpha:my-watcher",
                )),
        ],
    }
}

/// Fake authenticator: user header to subjects
fn authenticate(user: Option<&str>) -> Vec<Subject> {
    match user {
        Some("stephen") | Some("bofh") => vec![
            Subject::user(user.unwrap_or_default()),
            Subject::group("administrators"),
            Subject::group("system:authenticated"),
        ],
        Some("my-watcher") => vec![
            Subject::service_account("system:serviceaccount:alpha:my-watcher"),
            Subject::group("system:authenticated"),
        ],
        _ => vec![Subject::group("system:unauthenticated")],
    }
}

/// Router: `/{resource}/{namespace}/{resourceName}` to a resource
fn route(path: &str) -> Option<Resource> {
    let mut components = path.splitn(4, '/').skip(1);
    let resource = components.next()?;
    let namespace = components.next()?;
    let resource_name = components.next()?;

    let namespace = if namespace == "-" { "" } else { namespace };
    Some(Resource::new(namespace, resource, resource_name))
}

fn handle(authz: &Authorizer, request: &Request<'_>) -> (u16, String) {
    let subjects = authenticate(request.user);
    let Some(resource) = route(request.path) else {
        return (400, format!("malformed path {}", request.path));
    };

    let verb = request.method.to_lowercase();
    let decision: Decision = authz.eval(&verb, &subjects, &resource);
    if decision.success {
        (200, decision.to_string())
    } else {
        (403, decision.to_string())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    let authz = Authorizer::new();
    if let Err(e) = authz.apply(policy()) {
        warn!("Policy rejected: {}", e);
        return;
    }

    let requests = [
        Request {
            method: "GET",
            path: "/states/-/",
            user: Some("stephen"),
        },
        Request {
            method: "GET",
            path: "/states/beta/nodes",
            user: Some("bofh"),
        },
        Request {
            method: "GET",
            path: "/states/beta/nodes",
            user: None,
        },
        Request {
            method: "PATCH",
            path: "/states/alpha/nodes",
            user: Some("my-watcher"),
        },
        Request {
            method: "PATCH",
            path: "/states/beta/nodes",
            user: Some("my-watcher"),
        },
        Request {
            method: "GET",
            path: "/states",
            user: Some("bofh"),
        },
    ];

    for request in &requests {
        let (status, body) = handle(&authz, request);
        let Request { method, path, .. } = request;
        info!("{} {} -> {}: {}", method, path, status, body);
    }

    if let Some(metrics) = authz.metrics() {
        info!(
            "Evaluations: {} (allow rate {:.0}%)",
            metrics.evaluations,
            metrics.allow_rate() * 100.0
        );
    }
}
