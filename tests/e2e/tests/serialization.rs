//! Golden-file coverage for the stable JSON forms

use omniroute_e2e_tests::{key, router};
use omniroute_graph::{GraphBuilder, TokenGraph};
use omniroute_types::{Edge, LiquidityPool, PoolKind, RouteResult};
use serde_json::json;

fn sample_graph() -> TokenGraph {
    let mut builder = GraphBuilder::new();
    for v in ["USDC.ethereum", "WETH.ethereum", "USDC.polygon"] {
        builder.add_vertex(key(v)).unwrap();
    }
    let pool = LiquidityPool::new(PoolKind::ConstantProduct, 5_000_000.0, 1_500.0, 0.003)
        .with_liquidity_usd(10_000_000.0)
        .with_venue("uniswap_v2");
    builder
        .add_edge(Edge::swap(
            key("USDC.ethereum"),
            key("WETH.ethereum"),
            Some(pool),
            None,
            120_000.0,
            3_000.0,
        ))
        .unwrap();
    builder
        .add_edge(Edge::bridge(
            key("USDC.ethereum"),
            key("USDC.polygon"),
            0.001,
            120.0,
            30_000.0,
            120_000.0,
        ))
        .unwrap();
    builder.build()
}

#[test]
fn graph_json_matches_golden_form() {
    let expected = json!({
        "USDC.ethereum": [
            {
                "kind": "swap",
                "target": "WETH.ethereum",
                "gas": 120_000.0,
                "liquidity": {
                    "reserve_base": 5_000_000.0,
                    "reserve_quote": 1_500.0,
                    "liquidity_usd": 10_000_000.0,
                    "fee_percent": 0.3,
                    "pool_type": "constant_product",
                    "venue": "uniswap_v2"
                },
                "time_ms": 3_000.0
            },
            {
                "kind": "bridge",
                "target": "USDC.polygon",
                "gas": 30_000.0,
                "bridge_fee": 0.001,
                "time_delay": 120.0,
                "time_ms": 120_000.0
            }
        ],
        "USDC.polygon": [],
        "WETH.ethereum": []
    });

    assert_eq!(sample_graph().to_json(), expected);
}

#[test]
fn graph_json_round_trips() {
    let graph = sample_graph();
    let decoded = TokenGraph::from_json(graph.to_json()).unwrap();
    assert_eq!(decoded.to_json(), graph.to_json());
    assert_eq!(decoded.vertex_count(), 3);
    assert_eq!(decoded.edge_count(), 2);
}

#[test]
fn route_json_matches_golden_form() {
    let mut builder = GraphBuilder::new();
    builder.add_vertex(key("A.ethereum")).unwrap();
    builder.add_vertex(key("B.ethereum")).unwrap();
    builder
        .add_edge(Edge::swap(
            key("A.ethereum"),
            key("B.ethereum"),
            None,
            Some(0.5),
            0.0,
            0.0,
        ))
        .unwrap();
    let graph = builder.build();
    let route = router()
        .solve(&graph, &key("A.ethereum"), &key("B.ethereum"), 1.0, None)
        .unwrap();

    let json = route.to_json();
    let expected = json!({
        "path": ["A.ethereum", "B.ethereum"],
        "total_weight": route.total_weight,
        "estimated_output": 0.5,
        "steps": [
            {
                "from": "A.ethereum",
                "to": "B.ethereum",
                "kind": "swap",
                "weight": route.steps[0].weight,
                "input_amount": 1.0,
                "output_amount": 0.5,
                "edge": {
                    "kind": "swap",
                    "target": "B.ethereum",
                    "rate": 0.5,
                    "gas": 0.0
                }
            }
        ]
    });
    assert_eq!(json, expected);

    let decoded = RouteResult::from_json(json).unwrap();
    assert_eq!(decoded, route);
}
