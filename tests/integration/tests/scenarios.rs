//! Integration test: convergence, tracing and reconvergence scenarios.
//!
//! Exercises Topology, DistanceVectorEngine, trace and Simulation together
//! on small hand-checked networks.

use distvec_core::{
    input, report, trace, Change, ChangeEffect, CostUpdate, EngineConfig, RoutingError,
    Simulation, Topology, TraceOutcome,
};
use distvec_integration_tests::{assert_table_invariants, converge, node, topology};

// =========================================================================
// Initial convergence
// =========================================================================

#[test]
fn test_line_path() {
    let tables = converge(&topology(&[(1, 2, 1), (2, 3, 1)]));
    assert_table_invariants(&tables);
    assert_eq!(tables.distance(node(1), node(3)).unwrap(), Some(2));

    let outcome = trace(&tables, node(1), node(3)).unwrap();
    let route = outcome.route().expect("1 reaches 3");
    assert_eq!(route.cost, 2);
    assert_eq!(route.hops(), &[node(1), node(2)]);
}

#[test]
fn test_equal_cost_prefers_lower_next_hop() {
    // Square 1-2-4 / 1-3-4 with equal costs; links listed so that the
    // higher-id neighbor is discovered first.
    let tables = converge(&topology(&[(1, 3, 2), (3, 4, 2), (1, 2, 2), (2, 4, 2)]));
    assert_table_invariants(&tables);
    assert_eq!(tables.distance(node(1), node(4)).unwrap(), Some(4));
    assert_eq!(tables.next_hop(node(1), node(4)).unwrap(), Some(node(2)));
    assert_eq!(tables.next_hop(node(4), node(1)).unwrap(), Some(node(2)));
    assert_eq!(tables.next_hop(node(2), node(3)).unwrap(), Some(node(1)));
}

#[test]
fn test_recompute_is_idempotent() {
    let topo = topology(&[(1, 2, 8), (2, 3, 3), (2, 5, 4), (4, 1, 1), (4, 5, 1)]);
    let first = converge(&topo);
    let second = converge(&topo);
    assert_eq!(first, second);
    assert_table_invariants(&first);
}

#[test]
fn test_costs_that_would_overflow_are_rejected() {
    let text = format!("1 2 {m}\n2 3 {m}\n3 4 {m}\n", m = i64::MAX);
    let links = input::parse_topology(&text, "topo").unwrap();
    assert!(matches!(
        Topology::build(links),
        Err(RoutingError::CostTooLarge { .. })
    ));
}

#[test]
fn test_large_costs_below_limit_converge() {
    let limit = (u64::MAX - 1) / 8;
    let tables = converge(&topology(&[(1, 2, limit), (2, 3, limit), (3, 4, limit)]));
    assert_table_invariants(&tables);
    let route = trace(&tables, node(1), node(4)).unwrap();
    assert_eq!(route.route().map(|r| r.cost), Some(3 * limit));
}

// =========================================================================
// Topology changes
// =========================================================================

#[test]
fn test_disconnected_node_is_unreachable() {
    let mut topo = topology(&[(1, 2, 1), (2, 3, 1), (3, 4, 1)]);
    topo.apply_change(&Change::new(node(2), node(3), CostUpdate::Remove))
        .unwrap();
    topo.apply_change(&Change::new(node(3), node(4), CostUpdate::Remove))
        .unwrap();

    let tables = converge(&topo);
    assert_table_invariants(&tables);
    assert_eq!(trace(&tables, node(1), node(3)).unwrap(), TraceOutcome::Unreachable);
    assert_eq!(tables.forwarding_table(node(3)).unwrap().entries.len(), 1);
}

#[test]
fn test_shortcut_insertion_reroutes() {
    let mut topo = topology(&[(1, 2, 5), (2, 3, 5)]);
    let before = converge(&topo);
    assert_eq!(before.distance(node(1), node(3)).unwrap(), Some(10));
    assert_eq!(before.next_hop(node(1), node(3)).unwrap(), Some(node(2)));

    let effect = topo
        .apply_change(&Change::new(node(1), node(3), CostUpdate::Set(1)))
        .unwrap();
    assert_eq!(effect, ChangeEffect::Inserted);

    let after = converge(&topo);
    assert_eq!(after.distance(node(1), node(3)).unwrap(), Some(1));
    assert_eq!(after.next_hop(node(1), node(3)).unwrap(), Some(node(3)));
    // 2 keeps its direct link: 2-1-3 costs 6.
    assert_eq!(after.next_hop(node(2), node(3)).unwrap(), Some(node(3)));
}

#[test]
fn test_removing_missing_link_changes_nothing() {
    let mut topo = topology(&[(1, 2, 1), (2, 3, 1)]);
    let before_topo = topo.clone();
    let before = converge(&topo);

    let effect = topo
        .apply_change(&Change::new(node(1), node(3), CostUpdate::Remove))
        .unwrap();
    assert_eq!(effect, ChangeEffect::Unchanged);
    assert_eq!(topo, before_topo);
    assert_eq!(converge(&topo), before);
}

#[test]
fn test_incremental_matches_rebuild() {
    let mut topo = topology(&[(1, 2, 8), (2, 3, 3), (2, 5, 4), (4, 1, 1), (4, 5, 1)]);
    let changes = [
        Change::new(node(2), node(4), CostUpdate::Set(1)),
        Change::new(node(4), node(5), CostUpdate::Remove),
        Change::new(node(1), node(2), CostUpdate::Set(2)),
        Change::new(node(4), node(5), CostUpdate::Set(3)),
    ];
    for change in &changes {
        topo.apply_change(change).unwrap();
    }

    let rebuilt = Topology::with_max_nodes(topo.max_nodes(), topo.links()).unwrap();
    assert_eq!(converge(&topo), converge(&rebuilt));
}

#[test]
fn test_raising_cost_moves_traffic_away() {
    let mut topo = topology(&[(1, 2, 1), (2, 3, 1), (1, 3, 3)]);
    assert_eq!(converge(&topo).next_hop(node(1), node(3)).unwrap(), Some(node(2)));

    topo.apply_change(&Change::new(node(2), node(3), CostUpdate::Set(10)))
        .unwrap();
    let tables = converge(&topo);
    assert_eq!(tables.distance(node(1), node(3)).unwrap(), Some(3));
    assert_eq!(tables.next_hop(node(1), node(3)).unwrap(), Some(node(3)));
    assert_eq!(tables.next_hop(node(2), node(3)).unwrap(), Some(node(1)));
}

// =========================================================================
// Full pipeline: text input → simulation → text report
// =========================================================================

#[test]
fn test_full_simulation_from_text() {
    let links = input::parse_topology("1 2 4\n2 3 1\n3 4 1\n1 4 10\n", "topo").unwrap();
    let messages = input::parse_messages("1 4 ping\n4 1 pong back\n", "messages").unwrap();
    let changes = input::parse_changes("3 4 -999\n1 4 1\n9 1 3\n", "changes").unwrap();

    let mut sim = Simulation::new(
        Topology::build(links).unwrap(),
        messages,
        EngineConfig::default(),
    )
    .unwrap();
    let epochs = sim.run(changes).unwrap();
    assert_eq!(epochs.len(), 4);

    let mut buf = Vec::new();
    report::write_epochs(&mut buf, &epochs).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().filter(|l| l.starts_with("from ")).collect();
    assert_eq!(
        lines,
        vec![
            "from 1 to 4 cost 6 hops 1 2 3 message ping",
            "from 4 to 1 cost 6 hops 4 3 2 message pong back",
            "from 1 to 4 cost 10 hops 1 message ping",
            "from 4 to 1 cost 10 hops 4 message pong back",
            "from 1 to 4 cost 1 hops 1 message ping",
            "from 4 to 1 cost 1 hops 4 message pong back",
            "from 1 to 4 cost 1 hops 1 message ping",
            "from 4 to 1 cost 1 hops 4 message pong back",
        ]
    );

    // The last change names node 9, which does not exist: skipped, not fatal.
    assert!(epochs[3].rejected.is_some());
    assert_eq!(epochs[3].tables, epochs[2].tables);
}
