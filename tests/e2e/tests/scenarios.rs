//! The six pinned end-to-end scenarios
//!
//! Each scenario runs under both solvers; figures are asserted to the
//! precision the routing contract guarantees.

use omniroute_config::EngineSettings;
use omniroute_e2e_tests::{assert_rel_eq, key, nominal_chain, router};
use omniroute_graph::GraphBuilder;
use omniroute_router::SolverKind;
use omniroute_types::{Edge, LiquidityPool, PoolKind, RoutingError};
use omniroute_validator::{RouteValidator, ValidationLimits};
use test_log::test;

const SOLVERS: [SolverKind; 2] = [SolverKind::Classic, SolverKind::Bmssp];

#[test]
fn scenario_1_single_chain_direct_swap() {
    let (graph, source, target) = nominal_chain(&[0.5]);
    let router = router();

    for kind in SOLVERS {
        let route = router
            .solve_with(kind, &graph, &source, &target, 1.0, None)
            .unwrap();
        assert_eq!(route.path, vec![source.clone(), target.clone()]);
        assert_eq!(route.steps.len(), 1);
        assert_rel_eq(route.estimated_output, 0.5, 1e-9);
        assert_rel_eq(route.total_weight, -(0.5f64).ln(), 1e-9);

        let validator = RouteValidator::new(EngineSettings::default());
        let report = validator.validate(&route, 1.0, 3_000.0, &ValidationLimits::default());
        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }
}

#[test]
fn scenario_2_two_hop_nominal() {
    let (graph, source, target) = nominal_chain(&[0.5, 0.4]);
    let router = router();

    for kind in SOLVERS {
        let route = router
            .solve_with(kind, &graph, &source, &target, 1.0, None)
            .unwrap();
        assert_eq!(route.path.len(), 3);
        assert_rel_eq(route.estimated_output, 0.20, 1e-9);
        assert_rel_eq(route.total_weight, -(0.20f64).ln(), 1e-9);
    }
}

#[test]
fn scenario_3_bridge_only() {
    let mut builder = GraphBuilder::new();
    builder.add_vertex(key("USDC.ethereum")).unwrap();
    builder.add_vertex(key("USDC.polygon")).unwrap();
    builder
        .add_edge(Edge::bridge(
            key("USDC.ethereum"),
            key("USDC.polygon"),
            0.001,
            120.0,
            0.0,
            120_000.0,
        ))
        .unwrap();
    let graph = builder.build();
    let router = router();

    for kind in SOLVERS {
        let route = router
            .solve_with(
                kind,
                &graph,
                &key("USDC.ethereum"),
                &key("USDC.polygon"),
                1_000.0,
                None,
            )
            .unwrap();
        assert_eq!(route.steps.len(), 1);
        assert!(route.steps[0].edge.is_bridge());
        assert_rel_eq(route.estimated_output, 999.0, 1e-9);

        let validator = RouteValidator::new(EngineSettings::default());
        let report = validator.validate(&route, 1_000.0, 3_000.0, &ValidationLimits::default());
        assert!(report.is_valid);
        // A bridge has no pool, so no liquidity warning may fire.
        assert!(report
            .warnings
            .iter()
            .all(|w| !w.message.contains("reserve")));
    }
}

#[test]
fn scenario_4_prefers_direct_over_bridge_path_at_equal_gas() {
    // Direct swap at 0.49 against a bridge detour whose rates multiply to
    // 0.48: bridge out, swap, bridge home.
    let mut builder = GraphBuilder::new();
    for v in [
        "TOK.ethereum",
        "TOK.polygon",
        "USDC.polygon",
        "USDC.ethereum",
    ] {
        builder.add_vertex(key(v)).unwrap();
    }
    builder
        .add_edge(Edge::swap(
            key("TOK.ethereum"),
            key("USDC.ethereum"),
            None,
            Some(0.49),
            0.0,
            0.0,
        ))
        .unwrap();
    builder
        .add_edge(Edge::bridge(
            key("TOK.ethereum"),
            key("TOK.polygon"),
            0.005,
            60.0,
            0.0,
            60_000.0,
        ))
        .unwrap();
    // 0.995 * rate * 0.995 = 0.48
    let mid_rate = 0.48 / (0.995 * 0.995);
    builder
        .add_edge(Edge::swap(
            key("TOK.polygon"),
            key("USDC.polygon"),
            None,
            Some(mid_rate),
            0.0,
            0.0,
        ))
        .unwrap();
    builder
        .add_edge(Edge::bridge(
            key("USDC.polygon"),
            key("USDC.ethereum"),
            0.005,
            60.0,
            0.0,
            60_000.0,
        ))
        .unwrap();
    let graph = builder.build();
    let router = router();

    for kind in SOLVERS {
        let route = router
            .solve_with(
                kind,
                &graph,
                &key("TOK.ethereum"),
                &key("USDC.ethereum"),
                1.0,
                None,
            )
            .unwrap();
        assert_eq!(
            route.path,
            vec![key("TOK.ethereum"), key("USDC.ethereum")],
            "direct edge must win"
        );
        assert_rel_eq(route.estimated_output, 0.49, 1e-9);
    }
}

#[test]
fn scenario_5_max_hops_enforcement() {
    let (graph, source, target) = nominal_chain(&[0.99; 5]);
    let router = router();

    for kind in SOLVERS {
        let denied = router.solve_with(kind, &graph, &source, &target, 1.0, Some(3));
        assert!(matches!(denied, Err(RoutingError::NoRoute { .. })));

        let route = router
            .solve_with(kind, &graph, &source, &target, 1.0, Some(5))
            .unwrap();
        assert_eq!(route.steps.len(), 5);
        assert_rel_eq(route.estimated_output, 0.9509900499, 1e-9);
    }
}

#[test]
fn scenario_6_constant_product_slippage() {
    let mut builder = GraphBuilder::new();
    builder.add_vertex(key("A.ethereum")).unwrap();
    builder.add_vertex(key("B.ethereum")).unwrap();
    let pool = LiquidityPool::new(PoolKind::ConstantProduct, 1_000.0, 1_000.0, 0.003);
    builder
        .add_edge(Edge::swap(
            key("A.ethereum"),
            key("B.ethereum"),
            Some(pool),
            None,
            0.0,
            0.0,
        ))
        .unwrap();
    let graph = builder.build();
    let router = router();

    for kind in SOLVERS {
        let route = router
            .solve_with(kind, &graph, &key("A.ethereum"), &key("B.ethereum"), 100.0, None)
            .unwrap();
        let step = &route.steps[0];
        let expected_out = 99_700.0 / 1_099.7;
        assert_rel_eq(route.estimated_output, expected_out, 1e-9);
        assert_rel_eq(step.output_amount / step.input_amount, expected_out / 100.0, 1e-9);

        // Price impact ≈ 1 - 0.9066 / 0.997 ≈ 0.091.
        let rate = expected_out / 100.0;
        let impact = 1.0 - rate / 0.997;
        assert!((impact - 0.091).abs() < 5e-4);
    }
}

#[test]
fn route_weight_is_additive_and_output_is_product_of_rates() {
    // P2 and P3 on a mixed swap/bridge route.
    let mut builder = GraphBuilder::new();
    for v in ["USDC.ethereum", "WETH.ethereum", "WETH.arbitrum"] {
        builder.add_vertex(key(v)).unwrap();
    }
    let pool = LiquidityPool::new(PoolKind::ConstantProduct, 1_000_000.0, 500.0, 0.003);
    builder
        .add_edge(Edge::swap(
            key("USDC.ethereum"),
            key("WETH.ethereum"),
            Some(pool),
            None,
            0.0,
            3_000.0,
        ))
        .unwrap();
    builder
        .add_edge(Edge::bridge(
            key("WETH.ethereum"),
            key("WETH.arbitrum"),
            0.002,
            300.0,
            0.0,
            300_000.0,
        ))
        .unwrap();
    let graph = builder.build();
    let router = router();

    for kind in SOLVERS {
        let route = router
            .solve_with(
                kind,
                &graph,
                &key("USDC.ethereum"),
                &key("WETH.arbitrum"),
                10_000.0,
                None,
            )
            .unwrap();

        let weight_sum: f64 = route.steps.iter().map(|s| s.weight).sum();
        assert_rel_eq(route.total_weight, weight_sum, 1e-9);

        let rate_product: f64 = route
            .steps
            .iter()
            .map(|s| s.output_amount / s.input_amount)
            .product();
        assert_rel_eq(route.estimated_output, 10_000.0 * rate_product, 1e-9);
    }
}
