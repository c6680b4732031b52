//! RBAC evaluation benchmarks
//!
//! Measures `Authorizer::eval` as the number of bindings grows, for the
//! best case (first binding matches), the worst case (nothing matches) and
//! a namespaced match near the end of the scan.

use cretoai_rbac::{Authorizer, AuthorizerConfig, Resource, Role, RoleBinding, Rule, Subject};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_authorizer(binding_count: usize) -> Authorizer {
    let authz = Authorizer::with_config(AuthorizerConfig {
        enable_metrics: false,
        ..Default::default()
    });

    for i in 0..binding_count {
        let role = format!("role-{:05}", i);

        authz
            .set_role(Role::new(
                role.clone(),
                vec![
                    Rule::new(["get", "list", "watch"], [format!("res-{}", i % 50)]),
                    Rule::new(["patch"], ["states"]).with_resource_names([format!("node-{}", i)]),
                ],
            ))
            .unwrap();
        authz
            .set_role_binding(
                RoleBinding::new(format!("rb-{:05}", i), role)
                    .in_namespace(format!("ns-{}", i % 10))
                    .with_subject(Subject::user(format!("user-{}", i)))
                    .with_subject(Subject::group(format!("group-{}", i % 20))),
            )
            .unwrap();
    }

    authz
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    for binding_count in [10, 100, 1000].iter() {
        let authz = create_authorizer(*binding_count);
        let last = binding_count - 1;

        let first_match = (
            vec![
                Subject::user("user-0"),
                Subject::group("system:authenticated"),
            ],
            Resource::new("ns-0", "res-0", ""),
        );
        let no_match = (
            vec![
                Subject::user("nobody"),
                Subject::group("system:unauthenticated"),
            ],
            Resource::new("ns-0", "res-0", ""),
        );
        let late_match = (
            vec![Subject::user(format!("user-{}", last))],
            Resource::new(
                format!("ns-{}", last % 10),
                "states",
                format!("node-{}", last),
            ),
        );

        group.bench_with_input(
            BenchmarkId::new("first_match", binding_count),
            &first_match,
            |b, (subjects, res)| {
                b.iter(|| authz.eval(black_box("get"), subjects, res));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("no_match", binding_count),
            &no_match,
            |b, (subjects, res)| {
                b.iter(|| authz.eval(black_box("get"), subjects, res));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("late_match", binding_count),
            &late_match,
            |b, (subjects, res)| {
                b.iter(|| authz.eval(black_box("patch"), subjects, res));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
