//! Integration tests for the HTTP surface
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` against canned
//! subgraph executors, so no network or port is involved.
//!
//! Key behaviours tested:
//! - Success bodies and JSON content type for all four routes
//! - 400 on malformed input with zero upstream calls
//! - 500 on upstream failure without leaking upstream text
//! - 404 on unknown paths

#[cfg(test)]
mod api_route_tests {
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uniflow::api::{build_router, AppState};
    use uniflow::config::ApiConfig;
    use uniflow::pagination::{PageQuery, QueryExecutor};
    use uniflow::UpstreamError;

    const CRV: &str = "0xd533a949740bb3306d119cc777fa900ba034cd52";

    /// Returns one short page per collection
    struct CannedSubgraph {
        pages: HashMap<&'static str, Vec<Value>>,
        calls: AtomicUsize,
        fail: bool,
    }

    impl CannedSubgraph {
        fn new() -> Self {
            let mut pages = HashMap::new();
            pages.insert("pools", vec![json!({ "id": "0x07b1c12be0d62fe548a2b4b025ab7a5ca8def21e" })]);
            pages.insert(
                "tokenDayDatas",
                vec![
                    json!({ "date": 1627948800u64, "volumeUSD": "1000.5" }),
                    json!({ "date": 1627862400u64, "volumeUSD": "250.25" }),
                ],
            );
            pages.insert(
                "transactions",
                vec![
                    json!({
                        "id": "0x8d5a3c7a2293aac0520b497cd6036ba5b225f7430411bf8b803cbf3a591cd8d0",
                        "swaps": [{
                            "id": "0x8d5a3c7a2293aac0520b497cd6036ba5b225f7430411bf8b803cbf3a591cd8d0#22695",
                            "token0": { "id": "0x27c70cd1946795b66be9d954418546998b546634" },
                            "token1": { "id": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2" }
                        }]
                    }),
                    json!({
                        "id": "0x0bc17005eaa7084146ac1c002332072d6c4b650fd3ec0728089954c87b38e440",
                        "swaps": [{
                            "id": "0x0bc17005eaa7084146ac1c002332072d6c4b650fd3ec0728089954c87b38e440#26623",
                            "token0": { "id": "0x7d1afa7b718fb893db30a3abc0cfc608aacfebb0" },
                            "token1": { "id": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2" }
                        }]
                    }),
                ],
            );
            Self {
                pages,
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl QueryExecutor for CannedSubgraph {
        async fn execute(&self, query: &PageQuery) -> Result<Vec<Value>, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(UpstreamError::GraphQl(vec!["store error: connection refused".to_string()]));
            }
            Ok(self.pages.get(query.entity.collection).cloned().unwrap_or_default())
        }
    }

    fn config() -> ApiConfig {
        ApiConfig::from_lookup(|_| None).unwrap()
    }

    async fn get(executor: Arc<CannedSubgraph>, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let state = Arc::new(AppState::new(executor, &config()));
        let response = build_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
        (status, content_type, body)
    }

    #[tokio::test]
    async fn test_asset_pools() {
        let executor = Arc::new(CannedSubgraph::new());
        let (status, content_type, body) = get(executor.clone(), &format!("/assets/{}/pools", CRV)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let pools: Value = serde_json::from_slice(&body).unwrap();
        // Same canned page for the token0 and token1 queries
        assert_eq!(
            pools,
            json!([
                { "id": "0x07b1c12be0d62fe548a2b4b025ab7a5ca8def21e" },
                { "id": "0x07b1c12be0d62fe548a2b4b025ab7a5ca8def21e" }
            ])
        );
        assert_eq!(executor.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_asset_volume() {
        let executor = Arc::new(CannedSubgraph::new());
        let (status, _, body) = get(
            executor,
            &format!("/assets/{}/volume?start=1627000000&end=1628000000", CRV),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let volume: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(volume, json!({ "TotalVolumeUSD": 1250.75 }));
    }

    #[tokio::test]
    async fn test_asset_volume_rejects_inverted_range() {
        let executor = Arc::new(CannedSubgraph::new());
        let (status, _, _) = get(
            executor.clone(),
            &format!("/assets/{}/volume?start=1628000000&end=1627000000", CRV),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_asset_volume_rejects_bad_time() {
        let executor = Arc::new(CannedSubgraph::new());
        let (status, _, body) = get(executor.clone(), &format!("/assets/{}/volume?end=tomorrow", CRV)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("end time"));
        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_block_swaps() {
        let executor = Arc::new(CannedSubgraph::new());
        let (status, _, body) = get(executor, "/blocks/12738079/swaps").await;

        assert_eq!(status, StatusCode::OK);
        let swaps: Vec<String> = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            swaps,
            vec![
                "0x8d5a3c7a2293aac0520b497cd6036ba5b225f7430411bf8b803cbf3a591cd8d0#22695",
                "0x0bc17005eaa7084146ac1c002332072d6c4b650fd3ec0728089954c87b38e440#26623",
            ]
        );
    }

    #[tokio::test]
    async fn test_block_swapped_assets() {
        let executor = Arc::new(CannedSubgraph::new());
        let (status, _, body) = get(executor, "/blocks/12738079/swapped-assets").await;

        assert_eq!(status, StatusCode::OK);
        let assets: Vec<String> = serde_json::from_slice(&body).unwrap();
        assert_eq!(assets.len(), 3);

        let members: HashSet<String> = assets.into_iter().collect();
        let expected: HashSet<String> = [
            "0x27c70cd1946795b66be9d954418546998b546634",
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "0x7d1afa7b718fb893db30a3abc0cfc608aacfebb0",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(members, expected);
    }

    #[tokio::test]
    async fn test_bad_inputs_never_reach_upstream() {
        let executor = Arc::new(CannedSubgraph::new());

        for uri in [
            "/assets/0x00/pools",
            "/assets/0x00000000000000000000000000000000000000000/pools",
            "/assets/vxcv/volume",
            "/blocks/abc/swaps",
            "/blocks/-1/swapped-assets",
        ] {
            let (status, _, _) = get(executor.clone(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        }

        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_paths() {
        let executor = Arc::new(CannedSubgraph::new());

        for uri in ["/", "/2f2jo3i", "/assets/", "/assets/vxcv", "/assets/pools", "/assets/sdf/pools/abc"] {
            let (status, _, _) = get(executor.clone(), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_without_details() {
        let executor = Arc::new(CannedSubgraph::failing());
        let (status, _, body) = get(executor.clone(), "/blocks/12738079/swaps").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = String::from_utf8(body).unwrap();
        assert!(!body.contains("connection refused"));
        assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
    }
}
