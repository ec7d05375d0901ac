pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::campaign::handlers as campaign;
use crate::keywords::handlers as keywords;
use crate::search_volume::handlers as search_volume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Keyword API
        .route("/api/v1/keywords/extract", post(keywords::handle_extract))
        .route("/api/v1/keywords/suggest", post(keywords::handle_suggest))
        .route(
            "/api/v1/keywords/generate",
            post(campaign::handle_generate_keywords),
        )
        // Campaign API
        .route("/api/v1/campaigns/ppc-plan", post(campaign::handle_ppc_plan))
        .route("/api/v1/seo/analyze", post(campaign::handle_seo_analyze))
        // Search-volume API
        .route("/api/v1/search-volume", get(search_volume::handle_search))
        .route(
            "/api/v1/search-volume/filter",
            post(search_volume::handle_filter_upload),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::keywords::stopwords::StopwordSet;
    use crate::llm_client::ScriptedModel;
    use crate::search_volume::dataset::{load_keyword_table, KeywordTable};
    use crate::site::fetcher::PageFetcher;

    const STATS_CSV: &str = "Keyword Stats\nAll locations\nKeyword,Avg. monthly searches\nrunning shoes,100\nhiking boots,50\n";

    const KEYWORD_REPLY: &str = r#"```json
[
  {"Keyword": "dietitian seattle", "Ad Group": "Local"},
  {"Keyword": "sports nutrition plan", "Ad Group": "Athletes"}
]
```"#;

    const PAGE: &str = r#"<html><head><title>Chelsea W Nutrition</title>
        <meta name="description" content="Seattle dietitian"></head>
        <body><h1>Nutrition coaching</h1><p>Nutrition plans for runners. Nutrition for athletes.</p></body></html>"#;

    fn test_config() -> Config {
        Config {
            anthropic_api_key: "sk-test".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            keyword_stats_path: None,
            keyword_stats_skip_rows: 2,
            stopwords_path: None,
            keyword_top_n: 6,
            keyword_min_length: 3,
            fetch_timeout: Duration::from_secs(5),
            llm_timeout: Duration::from_secs(5),
        }
    }

    fn stats_table() -> KeywordTable {
        load_keyword_table(STATS_CSV.as_bytes(), 2).unwrap()
    }

    fn app_with(model: Arc<ScriptedModel>, keyword_stats: Option<KeywordTable>) -> Router {
        build_router(AppState {
            model,
            fetcher: PageFetcher::new(Duration::from_secs(5)).unwrap(),
            stopwords: Arc::new(StopwordSet::english()),
            keyword_stats: keyword_stats.map(Arc::new),
            config: test_config(),
        })
    }

    fn app() -> Router {
        app_with(Arc::new(ScriptedModel::replying(KEYWORD_REPLY)), Some(stats_table()))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_extract_keywords() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/keywords/extract",
                json!({"text": "SEO services SEO help SEO strategy", "top_n": 2}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"], json!(["seo", "services"]));
    }

    #[tokio::test]
    async fn test_extract_empty_text_is_empty_list() {
        let (status, body) = send(app(), post_json("/api/v1/keywords/extract", json!({"text": ""}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"], json!([]));
    }

    #[tokio::test]
    async fn test_suggest_keywords_from_site() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body(PAGE);
            })
            .await;

        let (status, body) = send(
            app(),
            post_json("/api/v1/keywords/suggest", json!({"url": server.url("/"), "top_n": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"][0], "nutrition");
        assert_eq!(body["keywords"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_suggest_upstream_failure_is_bad_gateway() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(500);
            })
            .await;

        let (status, body) = send(
            app(),
            post_json("/api/v1/keywords/suggest", json!({"url": server.url("/")})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "FETCH_ERROR");
    }

    #[tokio::test]
    async fn test_generate_keywords() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/keywords/generate",
                json!({"business_description": "Registered dietitian in Seattle"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"], json!(["dietitian seattle", "sports nutrition plan"]));
        assert_eq!(body["records"][0], json!({"keyword": "dietitian seattle", "ad_group": "Local"}));
        assert_eq!(body["labels"][1], "sports nutrition plan (Athletes)");
    }

    #[tokio::test]
    async fn test_generate_keywords_reports_failing_stage() {
        let model = Arc::new(ScriptedModel::replying("Sorry, I can't produce that list."));
        let (status, body) = send(
            app_with(model, None),
            post_json("/api/v1/keywords/generate", json!({"business_description": "Bakery"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EXTRACTION_FAILURE");
    }

    #[tokio::test]
    async fn test_generate_keywords_requires_description() {
        let model = Arc::new(ScriptedModel::replying(KEYWORD_REPLY));
        let (status, _) = send(
            app_with(model.clone(), None),
            post_json("/api/v1/keywords/generate", json!({"business_description": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_ppc_plan() {
        let model = Arc::new(ScriptedModel::replying("Campaign: one campaign, phrase match..."));
        let (status, body) = send(
            app_with(model, None),
            post_json(
                "/api/v1/campaigns/ppc-plan",
                json!({"keywords": ["dietitian", "meal plans", "sports nutrition", "weight loss", "nutritionist"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plan"], "Campaign: one campaign, phrase match...");
        assert!(body["generated_at"].is_string());
    }

    #[tokio::test]
    async fn test_ppc_plan_rejects_fewer_than_five() {
        let (status, body) = send(
            app(),
            post_json("/api/v1/campaigns/ppc-plan", json!({"keywords": ["a", "b"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_seo_analyze_with_keywords() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/about");
                then.status(200).body(PAGE);
            })
            .await;

        let model = Arc::new(ScriptedModel::replying("Overall SEO strategy: ..."));
        let (status, body) = send(
            app_with(model.clone(), None),
            post_json(
                "/api/v1/seo/analyze",
                json!({"url": server.url("/about"), "keywords": ["dietitian seattle"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"]["title"], "Chelsea W Nutrition");
        assert_eq!(body["page"]["meta_keywords"], "No meta keywords found");
        assert_eq!(body["analysis"], "Overall SEO strategy: ...");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_seo_analyze_generates_keywords_from_description() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body(PAGE);
            })
            .await;

        let model = Arc::new(ScriptedModel::replying(KEYWORD_REPLY));
        let (status, body) = send(
            app_with(model.clone(), None),
            post_json(
                "/api/v1/seo/analyze",
                json!({"url": server.url("/"), "business_description": "Seattle dietitian"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"], json!(["dietitian seattle", "sports nutrition plan"]));
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn test_seo_analyze_needs_keywords_or_description() {
        let model = Arc::new(ScriptedModel::replying("unused"));
        let (status, body) = send(
            app_with(model.clone(), None),
            post_json("/api/v1/seo/analyze", json!({"url": "https://example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("business description"));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_seo_analyze_stops_when_no_keywords_are_generated() {
        let model = Arc::new(ScriptedModel::replying("[]"));
        let (status, body) = send(
            app_with(model.clone(), None),
            post_json(
                "/api/v1/seo/analyze",
                json!({"url": "https://example.com", "business_description": "Seattle dietitian"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_ppc_plan_echoes_trimmed_keywords() {
        let model = Arc::new(ScriptedModel::replying("plan"));
        let (status, body) = send(
            app_with(model, None),
            post_json(
                "/api/v1/campaigns/ppc-plan",
                json!({"keywords": [" dietitian ", "meal plans", "sports nutrition", "weight loss", "nutritionist\t"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["keywords"],
            json!(["dietitian", "meal plans", "sports nutrition", "weight loss", "nutritionist"])
        );
    }

    #[tokio::test]
    async fn test_search_volume_filter() {
        let (status, body) = send(app(), get("/api/v1/search-volume?q=SHOE")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_rows"], 2);
        assert_eq!(body["matched"], 1);
        assert_eq!(
            body["rows"],
            json!([{"Keyword": "running shoes", "Avg. monthly searches": 100}])
        );
    }

    #[tokio::test]
    async fn test_search_volume_without_query_returns_all() {
        let (status, body) = send(app(), get("/api/v1/search-volume")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"], 2);
    }

    #[tokio::test]
    async fn test_search_volume_without_dataset_is_not_found() {
        let model = Arc::new(ScriptedModel::empty());
        let (status, _) = send(app_with(model, None), get("/api/v1/search-volume?q=x")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_filter_uploaded_csv() {
        let boundary = "X-KEYWORD-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"stats.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             {STATS_CSV}\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/search-volume/filter?q=boots")
            .header("content-type", format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap();

        let model = Arc::new(ScriptedModel::empty());
        let (status, body) = send(app_with(model, None), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["headers"], json!(["Keyword", "Avg. monthly searches"]));
        assert_eq!(body["matched"], 1);
        assert_eq!(body["rows"][0]["Keyword"], "hiking boots");
    }
}
