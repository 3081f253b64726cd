//! Property suites: AMM kernel invariants and cross-solver agreement
//!
//! Small random graphs pit BMSSP against Classic; AMM inputs are fuzzed for
//! rate monotonicity and round-trip conservation. Edge rates carry a tiny
//! per-index perturbation so no two distinct paths ever tie exactly, which
//! keeps path comparison meaningful under shrinking.

use std::collections::HashSet;

use omniroute_amm::{ConcentratedLiquidityMath, ConstantProductMath, StableSwapMath};
use omniroute_config::EngineSettings;
use omniroute_e2e_tests::key;
use omniroute_graph::{GraphBuilder, TokenGraph};
use omniroute_router::{bmssp, classic, CostModel};
use omniroute_types::{Edge, RouteResult, RoutingError, TokenKey};
use proptest::prelude::*;

const MAX_TRADE: f64 = 0.90;

fn cost() -> CostModel {
    CostModel::new(EngineSettings::default())
}

// ---------------------------------------------------------------------------
// AMM kernel properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn constant_product_per_unit_rate_is_monotone(
        reserve_in in 10.0f64..1e6,
        reserve_out in 10.0f64..1e6,
        fee in 0.0f64..0.05,
        fa in 0.001f64..0.889,
        fb in 0.001f64..0.889,
    ) {
        prop_assume!((fa - fb).abs() > 1e-9);
        let (small, large) = if fa < fb { (fa, fb) } else { (fb, fa) };
        let q_small = ConstantProductMath::quote(
            small * reserve_in, reserve_in, reserve_out, fee, MAX_TRADE).unwrap();
        let q_large = ConstantProductMath::quote(
            large * reserve_in, reserve_in, reserve_out, fee, MAX_TRADE).unwrap();
        prop_assert!(q_small.effective_rate >= q_large.effective_rate * (1.0 - 1e-12));
    }

    #[test]
    fn stable_swap_per_unit_rate_is_monotone(
        reserve_in in 100.0f64..1e6,
        reserve_out in 100.0f64..1e6,
        amplification in 1.0f64..500.0,
        fa in 0.001f64..0.889,
        fb in 0.001f64..0.889,
    ) {
        prop_assume!((fa - fb).abs() > 1e-9);
        let (small, large) = if fa < fb { (fa, fb) } else { (fb, fa) };
        let q_small = StableSwapMath::quote(
            small * reserve_in, reserve_in, reserve_out, 0.0004, amplification, MAX_TRADE).unwrap();
        let q_large = StableSwapMath::quote(
            large * reserve_in, reserve_in, reserve_out, 0.0004, amplification, MAX_TRADE).unwrap();
        prop_assert!(q_small.effective_rate >= q_large.effective_rate * (1.0 - 1e-12));
    }

    #[test]
    fn concentrated_per_unit_rate_is_monotone(
        reserve_in in 1000.0f64..1e6,
        reserve_out in 1000.0f64..1e6,
        range in 0.05f64..1.0,
        fa in 0.001f64..0.25,
        fb in 0.001f64..0.25,
    ) {
        prop_assume!((fa - fb).abs() > 1e-9);
        let (small, large) = if fa < fb { (fa, fb) } else { (fb, fa) };
        let q_small = ConcentratedLiquidityMath::quote(
            small * reserve_in * range, reserve_in, reserve_out, 0.003, range, MAX_TRADE).unwrap();
        let q_large = ConcentratedLiquidityMath::quote(
            large * reserve_in * range, reserve_in, reserve_out, 0.003, range, MAX_TRADE).unwrap();
        prop_assert!(q_small.effective_rate >= q_large.effective_rate * (1.0 - 1e-12));
    }

    #[test]
    fn constant_product_zero_fee_round_trip_conserves(
        reserve_in in 10.0f64..1e6,
        reserve_out in 10.0f64..1e6,
        frac in 0.001f64..0.8,
    ) {
        let dx = frac * reserve_in;
        let forward = ConstantProductMath::quote(dx, reserve_in, reserve_out, 0.0, MAX_TRADE).unwrap();
        prop_assume!(forward.amount_out < MAX_TRADE * reserve_out);
        let back = ConstantProductMath::quote(
            forward.amount_out, reserve_out, reserve_in, 0.0, MAX_TRADE).unwrap();
        prop_assert!(back.amount_out <= dx * (1.0 + 1e-9));
    }

    #[test]
    fn output_is_always_below_spot(
        reserve_in in 10.0f64..1e6,
        reserve_out in 10.0f64..1e6,
        fee in 0.0f64..0.05,
        frac in 0.001f64..0.889,
    ) {
        let dx = frac * reserve_in;
        let quote = ConstantProductMath::quote(dx, reserve_in, reserve_out, fee, MAX_TRADE).unwrap();
        let spot_amount = dx * (reserve_out / reserve_in) * (1.0 - fee);
        prop_assert!(quote.amount_out < spot_amount);
        prop_assert!(quote.price_impact > 0.0);
    }
}

// ---------------------------------------------------------------------------
// Edge cost properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn usable_weights_are_non_negative(
        rate in 0.01f64..1.0,
        gas in 0.0f64..1e10,
        bridge_fee in 0.0f64..0.5,
        delay in 0.0f64..3600.0,
    ) {
        let cost = cost();
        let swap = Edge::swap(key("A.ethereum"), key("B.ethereum"), None, Some(rate), gas, 0.0);
        let swap_cost = cost.evaluate(1.0, &swap);
        prop_assert!(swap_cost.is_usable());
        prop_assert!(swap_cost.weight >= 0.0);

        let bridge = Edge::bridge(
            key("U.ethereum"), key("U.polygon"), bridge_fee, delay, gas, 0.0);
        let bridge_cost = cost.evaluate(1.0, &bridge);
        prop_assert!(bridge_cost.is_usable());
        prop_assert!(bridge_cost.weight >= 0.0);
    }
}

// ---------------------------------------------------------------------------
// Cross-solver agreement on random graphs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct RandomSwapGraph {
    n: usize,
    edges: Vec<(usize, usize, f64)>,
}

fn swap_graph_strategy() -> impl Strategy<Value = RandomSwapGraph> {
    (2usize..30).prop_flat_map(|n| {
        let edge = (0..n, 0..n, 0.2f64..0.99);
        proptest::collection::vec(edge, 1..n * 3)
            .prop_map(move |edges| RandomSwapGraph { n, edges })
    })
}

impl RandomSwapGraph {
    fn build(&self) -> TokenGraph {
        let mut builder = GraphBuilder::new();
        for i in 0..self.n {
            builder.add_vertex(key(&format!("T{i}.ethereum"))).unwrap();
        }
        for (idx, (from, to, rate)) in self.edges.iter().enumerate() {
            if from == to {
                continue;
            }
            // Tiny per-edge perturbation keeps distinct paths from tying.
            let rate = rate * (1.0 + idx as f64 * 1e-9);
            builder
                .add_edge(Edge::swap(
                    key(&format!("T{from}.ethereum")),
                    key(&format!("T{to}.ethereum")),
                    None,
                    Some(rate),
                    0.0,
                    0.0,
                ))
                .unwrap();
        }
        builder.build()
    }
}

fn assert_route_well_formed(
    route: &RouteResult,
    source: &TokenKey,
    target: &TokenKey,
    max_hops: usize,
) {
    assert_eq!(route.path.first().unwrap(), source);
    assert_eq!(route.path.last().unwrap(), target);
    assert!(route.steps.len() <= max_hops, "hop cap violated");

    let distinct: HashSet<_> = route.path.iter().collect();
    assert_eq!(distinct.len(), route.path.len(), "path revisits a vertex");

    let weight_sum: f64 = route.steps.iter().map(|s| s.weight).sum();
    assert!((weight_sum - route.total_weight).abs() <= 1e-9 * route.total_weight.abs().max(1.0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Agreement is asserted with a hop budget no simple path can exhaust:
    // under a binding budget any single-label solver becomes sensitive to
    // relaxation order, so path identity is only a contract where the
    // budget does not bite.
    #[test]
    fn solvers_agree_on_random_swap_graphs(spec in swap_graph_strategy()) {
        let graph = spec.build();
        let source = key("T0.ethereum");
        let target = key(&format!("T{}.ethereum", spec.n - 1));
        let cost = cost();
        let max_hops = spec.n;

        let a = classic::solve(&graph, &source, &target, 1_000.0, max_hops, &cost);
        let b = bmssp::solve(&graph, &source, &target, 1_000.0, max_hops, &cost);

        match (a, b) {
            (Ok(classic_route), Ok(bmssp_route)) => {
                assert_route_well_formed(&classic_route, &source, &target, max_hops);
                assert_route_well_formed(&bmssp_route, &source, &target, max_hops);
                prop_assert_eq!(&classic_route.path, &bmssp_route.path);
                let rel = (classic_route.estimated_output - bmssp_route.estimated_output).abs()
                    / classic_route.estimated_output.abs().max(1e-12);
                prop_assert!(rel < 1e-9);

                // Gas-free graphs: output equals input times exp(-weight).
                let implied = 1_000.0 * (-classic_route.total_weight).exp();
                let rel = (classic_route.estimated_output - implied).abs()
                    / implied.abs().max(1e-12);
                prop_assert!(rel < 1e-9);
            }
            (Err(RoutingError::NoRoute { .. }), Err(RoutingError::NoRoute { .. })) => {}
            (a, b) => prop_assert!(false, "solver disagreement: {a:?} vs {b:?}"),
        }
    }

    // Under a binding hop budget each solver must still return only
    // well-formed, budget-respecting, cycle-free routes.
    #[test]
    fn bounded_hop_routes_are_well_formed(spec in swap_graph_strategy()) {
        let graph = spec.build();
        let source = key("T0.ethereum");
        let target = key(&format!("T{}.ethereum", spec.n - 1));
        let cost = cost();

        for max_hops in [2usize, 4] {
            if let Ok(route) = classic::solve(&graph, &source, &target, 1_000.0, max_hops, &cost) {
                assert_route_well_formed(&route, &source, &target, max_hops);
            }
            if let Ok(route) = bmssp::solve(&graph, &source, &target, 1_000.0, max_hops, &cost) {
                assert_route_well_formed(&route, &source, &target, max_hops);
            }
        }
    }

    #[test]
    fn solvers_agree_on_bridged_graphs(
        symbols in 2usize..8,
        swap_edges in proptest::collection::vec((0usize..8, 0usize..8, 0usize..2, 0.2f64..0.99), 1..24),
        bridge_fees in proptest::collection::vec(0.0f64..0.01, 8),
    ) {
        let chains = ["ethereum", "polygon"];
        let mut builder = GraphBuilder::new();
        for chain in chains {
            for s in 0..symbols {
                builder.add_vertex(key(&format!("S{s}.{chain}"))).unwrap();
            }
        }
        for (idx, (from, to, chain, rate)) in swap_edges.iter().enumerate() {
            let from = from % symbols;
            let to = to % symbols;
            if from == to {
                continue;
            }
            let chain = chains[*chain];
            let rate = rate * (1.0 + idx as f64 * 1e-9);
            builder
                .add_edge(Edge::swap(
                    key(&format!("S{from}.{chain}")),
                    key(&format!("S{to}.{chain}")),
                    None,
                    Some(rate),
                    0.0,
                    0.0,
                ))
                .unwrap();
        }
        for (s, fee) in bridge_fees.iter().enumerate().take(symbols) {
            builder
                .add_edge(Edge::bridge(
                    key(&format!("S{s}.ethereum")),
                    key(&format!("S{s}.polygon")),
                    *fee,
                    60.0,
                    0.0,
                    60_000.0,
                ))
                .unwrap();
        }
        let graph = builder.build();
        let source = key("S0.ethereum");
        let target = key(&format!("S{}.polygon", symbols - 1));
        let cost = cost();
        let max_hops = 2 * symbols;

        let a = classic::solve(&graph, &source, &target, 1_000.0, max_hops, &cost);
        let b = bmssp::solve(&graph, &source, &target, 1_000.0, max_hops, &cost);

        match (a, b) {
            (Ok(classic_route), Ok(bmssp_route)) => {
                assert_route_well_formed(&classic_route, &source, &target, max_hops);
                assert_route_well_formed(&bmssp_route, &source, &target, max_hops);
                prop_assert_eq!(&classic_route.path, &bmssp_route.path);
                let rel = (classic_route.estimated_output - bmssp_route.estimated_output).abs()
                    / classic_route.estimated_output.abs().max(1e-12);
                prop_assert!(rel < 1e-9);
            }
            (Err(RoutingError::NoRoute { .. }), Err(RoutingError::NoRoute { .. })) => {}
            (a, b) => prop_assert!(false, "solver disagreement: {a:?} vs {b:?}"),
        }
    }
}
