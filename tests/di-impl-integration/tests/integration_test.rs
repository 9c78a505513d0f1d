//! 场景依赖注入校验的集成测试

use di_abstractions::{ScopeBackend, StaticNodeSource};
use di_impl::{SceneGraph, SceneScopeBackend, SceneValidator, ScopeBuilder, WaitingSet};
use infrastructure_common::{
    BackendError, BuildError, BuildStates, FailureKind, NodeId, SceneNode, Scope, ScopeConfig,
};
use mockall::mock;
use std::time::Instant;

mock! {
    pub Backend {}

    impl ScopeBackend for Backend {
        fn build(&mut self, scope: &Scope, states: &BuildStates) -> Result<(), BackendError>;
        fn detach_parent(&mut self, scope: &Scope);
    }
}

/// 按父作用域状态决定成败，与真实框架的激活约定一致
fn parent_aware(scope: &Scope, states: &BuildStates) -> Result<(), BackendError> {
    match scope.parent {
        _ if scope.is_root => Ok(()),
        Some(parent) if states.is_built(parent) => Ok(()),
        _ => Err(BackendError::parent_not_yet_resolved(&scope.name)),
    }
}

fn scope(id: u64, name: &str, config: ScopeConfig) -> Scope {
    Scope::from_node(&SceneNode::new(id, name).with_scope(config)).unwrap()
}

fn validator(nodes: Vec<SceneNode>) -> SceneValidator<StaticNodeSource, SceneScopeBackend> {
    let graph = SceneGraph::from_nodes(nodes.clone()).unwrap();
    SceneValidator::new(StaticNodeSource::new(nodes), SceneScopeBackend::new(&graph))
}

fn permutations(items: &[Scope]) -> Vec<Vec<Scope>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for index in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(index);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            result.push(tail);
        }
    }
    result
}

#[test]
fn test_child_listed_before_root_defers_then_builds() {
    let scopes = vec![
        scope(2, "ChildScope", ScopeConfig::child_of(1)),
        scope(1, "RootScope", ScopeConfig::root()),
    ];

    let mut backend = MockBackend::new();
    backend
        .expect_build()
        .withf(|scope, _| scope.name == "ChildScope")
        .times(2)
        .returning(parent_aware);
    backend
        .expect_build()
        .withf(|scope, _| scope.name == "RootScope")
        .times(1)
        .returning(parent_aware);
    backend.expect_detach_parent().times(2).return_const(());

    let mut waiting = WaitingSet::new();
    let states = ScopeBuilder::new(Instant::now())
        .build_all(&mut backend, &scopes, &mut waiting)
        .unwrap();

    assert!(states.all_built());
    assert!(waiting.is_empty());
}

#[test]
fn test_every_ordering_of_an_acyclic_forest_builds() {
    let forest = vec![
        scope(1, "Project", ScopeConfig::root()),
        scope(2, "Game", ScopeConfig::child_of(1)),
        scope(3, "Battle", ScopeConfig::child_of(2)),
        scope(4, "Menu", ScopeConfig::child_of(1)),
        scope(5, "Tools", ScopeConfig::root()),
    ];

    for ordering in permutations(&forest) {
        let mut backend = MockBackend::new();
        backend.expect_build().returning(parent_aware);
        backend.expect_detach_parent().times(forest.len()).return_const(());

        let mut waiting = WaitingSet::new();
        let states = ScopeBuilder::new(Instant::now())
            .build_all(&mut backend, &ordering, &mut waiting)
            .unwrap_or_else(|err| panic!("ordering {:?} failed: {err}", names(&ordering)));

        assert!(states.all_built());
        assert!(waiting.is_empty());
    }
}

fn names(scopes: &[Scope]) -> Vec<&str> {
    scopes.iter().map(|scope| scope.name.as_str()).collect()
}

#[test]
fn test_parent_never_discovered_fails_and_leaves_no_waiting_state() {
    let scopes = vec![
        scope(1, "Project", ScopeConfig::root()),
        scope(2, "Orphan", ScopeConfig::child_of(50)),
        scope(3, "Menu", ScopeConfig::child_of(1)),
    ];

    let mut backend = MockBackend::new();
    backend.expect_build().returning(parent_aware);
    backend
        .expect_detach_parent()
        .withf(|scope| scope.name != "Orphan")
        .times(2)
        .return_const(());

    let mut waiting = WaitingSet::new();
    let err = ScopeBuilder::new(Instant::now())
        .build_all(&mut backend, &scopes, &mut waiting)
        .unwrap_err();

    match err {
        BuildError::UnresolvableParent { scope, parent, .. } => {
            assert_eq!(scope, "Orphan");
            assert_eq!(parent, Some(NodeId(50)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(waiting.is_empty());
}

#[test]
fn test_backend_rejection_aborts_remaining_builds() {
    let scopes = vec![
        scope(1, "Project", ScopeConfig::root()),
        scope(2, "Game", ScopeConfig::child_of(1)),
        scope(3, "Menu", ScopeConfig::child_of(1)),
    ];

    let mut backend = MockBackend::new();
    backend
        .expect_build()
        .withf(|scope, _| scope.name == "Project")
        .times(1)
        .returning(parent_aware);
    backend
        .expect_build()
        .withf(|scope, _| scope.name == "Game")
        .times(1)
        .returning(|scope, _| Err(BackendError::rejected(&scope.name, "type already registered")));
    backend
        .expect_build()
        .withf(|scope, _| scope.name == "Menu")
        .never();
    backend.expect_detach_parent().times(1).return_const(());

    let err = ScopeBuilder::new(Instant::now())
        .build_all(&mut backend, &scopes, &mut WaitingSet::new())
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::BuildBackendError);
    assert!(err.to_string().contains("type already registered"));
}

#[test]
fn test_no_active_scopes_stops_before_build() {
    let nodes = vec![
        SceneNode::new(1, "Root"),
        SceneNode::new(2, "Sleeping")
            .with_parent(1)
            .with_active(false)
            .with_scope(ScopeConfig::root()),
        SceneNode::new(3, "Player").with_parent(1).with_injectable("input"),
    ];

    let mut backend = MockBackend::new();
    backend.expect_build().never();
    backend.expect_detach_parent().never();

    let mut validator = SceneValidator::new(StaticNodeSource::new(nodes), backend);
    let outcome = validator.validate();

    assert_eq!(outcome.failure_kind(), Some(FailureKind::NoScopesFound));
}

#[test]
fn test_child_covered_through_registered_ancestor() {
    let mut validator = validator(vec![
        SceneNode::new(1, "Root").with_scope(ScopeConfig::root().auto_inject(2)),
        SceneNode::new(2, "A").with_parent(1),
        SceneNode::new(3, "B").with_parent(2).with_injectable("service"),
    ]);

    assert!(validator.validate().is_success());
}

#[test]
fn test_unregistered_candidate_is_reported_with_path() {
    let mut validator = validator(vec![
        SceneNode::new(1, "Root").with_scope(ScopeConfig::root()),
        SceneNode::new(2, "Level").with_parent(1),
        SceneNode::new(3, "C").with_parent(2).with_injectable("service"),
    ]);

    let err = validator.run().unwrap_err();
    assert_eq!(err.kind(), FailureKind::MissingAutoInjection);
    assert_eq!(err.uncovered().len(), 1);
    assert_eq!(err.uncovered()[0].node, NodeId(3));
    assert_eq!(err.uncovered()[0].path, "Root/Level/C");
}

#[test]
fn test_registration_order_and_duplicates_do_not_change_coverage() {
    let base = |first: ScopeConfig, second: ScopeConfig| {
        vec![
            SceneNode::new(1, "Root").with_scope(first),
            SceneNode::new(2, "Game").with_scope(second),
            SceneNode::new(3, "Player").with_injectable("input"),
            SceneNode::new(4, "Enemy").with_injectable("ai"),
            SceneNode::new(5, "Hud").with_injectable("score"),
        ]
    };

    let once = validator(base(
        ScopeConfig::root().auto_inject(3),
        ScopeConfig::child_of(1).auto_inject(4),
    ))
    .run()
    .unwrap_err();
    let duplicated = validator(base(
        ScopeConfig::root().auto_inject(4).auto_inject(3),
        ScopeConfig::child_of(1).auto_inject(3).auto_inject(4),
    ))
    .run()
    .unwrap_err();

    assert_eq!(once.uncovered(), duplicated.uncovered());
    assert_eq!(once.uncovered()[0].name, "Hud");
}

#[test]
fn test_proceed_callback_only_on_success() {
    let mut calls = 0;
    let mut passing = validator(vec![SceneNode::new(1, "Root").with_scope(ScopeConfig::root())]);
    assert!(passing.validate_and_proceed(|| calls += 1).is_success());

    let mut failing = validator(vec![
        SceneNode::new(1, "Root").with_scope(ScopeConfig::root()),
        SceneNode::new(2, "Game").with_scope(ScopeConfig::child_of(2)),
    ]);
    let outcome = failing.validate_and_proceed(|| calls += 1);

    assert_eq!(outcome.failure_kind(), Some(FailureKind::UnresolvableParent));
    assert_eq!(calls, 1);
}

#[test]
fn test_repeated_runs_do_not_leak_state() {
    let mut validator = validator(vec![
        SceneNode::new(2, "Child").with_scope(ScopeConfig::child_of(1)),
        SceneNode::new(1, "Root").with_scope(ScopeConfig::root()),
    ]);

    for _ in 0..3 {
        assert!(validator.validate().is_success());
        assert!(validator.backend().parent_links().is_empty());
    }
}
