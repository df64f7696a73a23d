//! Property tests for routing-table invariants on random topologies.

use std::collections::BTreeMap;

use distvec_core::{trace, Change, Cost, CostUpdate, Link, Topology, TraceOutcome};
use distvec_integration_tests::{assert_table_invariants, converge, node};
use proptest::prelude::*;

type RawLink = (u32, u32, Cost);
type RawChange = (u32, u32, Option<Cost>);

/// Random simple graph: no self-loops, at most one link per node pair.
fn build(max_nodes: u32, raw: &[RawLink]) -> Topology {
    let mut unique: BTreeMap<(u32, u32), Cost> = BTreeMap::new();
    for &(a, b, cost) in raw {
        if a != b {
            unique.entry((a.min(b), a.max(b))).or_insert(cost);
        }
    }
    let links = unique
        .into_iter()
        .map(|((a, b), cost)| Link::new(node(a), node(b), cost));
    Topology::with_max_nodes(max_nodes, links).unwrap()
}

fn apply_all(topology: &mut Topology, raw: &[RawChange]) {
    for &(a, b, cost) in raw {
        if a == b {
            continue;
        }
        let update = cost.map_or(CostUpdate::Remove, CostUpdate::Set);
        topology
            .apply_change(&Change::new(node(a), node(b), update))
            .unwrap();
    }
}

/// All-pairs shortest distances by Floyd-Warshall, as an independent reference.
fn reference_distances(topology: &Topology) -> Vec<Vec<Option<Cost>>> {
    let n = topology.max_nodes() as usize;
    let mut d = vec![vec![None; n + 1]; n + 1];
    for i in 1..=n {
        d[i][i] = Some(0);
    }
    for link in topology.links() {
        let (a, b) = (link.a.get() as usize, link.b.get() as usize);
        d[a][b] = Some(link.cost);
        d[b][a] = Some(link.cost);
    }
    for k in 1..=n {
        for i in 1..=n {
            for j in 1..=n {
                if let (Some(ik), Some(kj)) = (d[i][k], d[k][j]) {
                    let via = ik + kj;
                    if d[i][j].map_or(true, |cur| via < cur) {
                        d[i][j] = Some(via);
                    }
                }
            }
        }
    }
    d
}

fn network() -> impl Strategy<Value = (u32, Vec<RawLink>, Vec<RawChange>)> {
    (2u32..=8).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((1..=n, 1..=n, 0u64..=20), 0..=20),
            prop::collection::vec((1..=n, 1..=n, prop::option::of(0u64..=20)), 0..=10),
        )
    })
}

proptest! {
    #[test]
    fn converged_tables_hold_invariants((n, links, _changes) in network()) {
        let tables = converge(&build(n, &links));
        assert_table_invariants(&tables);
    }

    #[test]
    fn distances_match_reference((n, links, changes) in network()) {
        let mut topo = build(n, &links);
        apply_all(&mut topo, &changes);
        let tables = converge(&topo);
        let reference = reference_distances(&topo);
        for i in 1..=n {
            for j in 1..=n {
                prop_assert_eq!(
                    tables.distance(node(i), node(j)).unwrap(),
                    reference[i as usize][j as usize]
                );
            }
        }
    }

    #[test]
    fn next_hop_is_lowest_neighbor_on_a_shortest_path((n, links, changes) in network()) {
        let mut topo = build(n, &links);
        apply_all(&mut topo, &changes);
        let tables = converge(&topo);
        let reference = reference_distances(&topo);

        for i in 1..=n {
            for j in (1..=n).filter(|&j| j != i) {
                let Some(total) = reference[i as usize][j as usize] else { continue };
                let expected = topo
                    .neighbors(node(i))
                    .unwrap()
                    .iter()
                    .filter_map(|adj| adj.cost.map(|cost| (adj.neighbor, cost)))
                    .filter(|&(nb, cost)| {
                        reference[nb.get() as usize][j as usize].map(|rest| cost + rest) == Some(total)
                    })
                    .map(|(nb, _)| nb)
                    .min();
                prop_assert_eq!(tables.next_hop(node(i), node(j)).unwrap(), expected);
            }
        }
    }

    #[test]
    fn recompute_is_idempotent((n, links, changes) in network()) {
        let mut topo = build(n, &links);
        apply_all(&mut topo, &changes);
        prop_assert_eq!(converge(&topo), converge(&topo));
    }

    #[test]
    fn incremental_changes_match_rebuild((n, links, changes) in network()) {
        let mut topo = build(n, &links);
        apply_all(&mut topo, &changes);
        let rebuilt = Topology::with_max_nodes(n, topo.links()).unwrap();
        prop_assert_eq!(converge(&topo), converge(&rebuilt));
    }

    #[test]
    fn traced_routes_cost_what_the_table_says((n, links, changes) in network()) {
        let mut topo = build(n, &links);
        apply_all(&mut topo, &changes);
        let tables = converge(&topo);

        for i in 1..=n {
            for j in 1..=n {
                match trace(&tables, node(i), node(j)).unwrap() {
                    TraceOutcome::Delivered(route) => {
                        let mut walked = 0;
                        let mut path = route.hops().to_vec();
                        path.push(node(j));
                        for pair in path.windows(2) {
                            walked += topo.link_cost(pair[0], pair[1]).unwrap().expect("hop is a live link");
                        }
                        prop_assert_eq!(Some(walked), tables.distance(node(i), node(j)).unwrap());
                    }
                    TraceOutcome::Unreachable => {
                        prop_assert_eq!(tables.distance(node(i), node(j)).unwrap(), None);
                    }
                    // Zero-cost links can make two nodes forward to each other.
                    TraceOutcome::Broken { .. } => {
                        prop_assert!(tables.distance(node(i), node(j)).unwrap().is_some());
                    }
                }
            }
        }
    }
}
