//! Remote client behavior against a local mock backend
//!
//! Spins up a real axum server per test and points the reqwest-based client
//! at it, so status mapping and decode behavior are exercised over actual
//! HTTP.

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use breadai_core::api::{ApiError, BreadClient, FeedbackRequest, Rating};
use breadai_core::config::CoreConfig;
use serde_json::json;

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on
async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn client_for(base_url: String) -> BreadClient {
    let config = CoreConfig {
        base_url,
        ..CoreConfig::default()
    };
    BreadClient::new(&config).unwrap()
}

fn sample_feedback() -> FeedbackRequest {
    FeedbackRequest {
        response_id: "resp-42".to_string(),
        query: "how long to proof?".to_string(),
        response: "Until roughly doubled.".to_string(),
        rating: Rating::Positive,
        prompt_variant: "v1".to_string(),
        response_type: "ask".to_string(),
        comment: None,
    }
}

#[tokio::test]
async fn ask_decodes_typed_response() {
    let router = Router::new().route(
        "/ask",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["query"], "what is autolyse?");
            Json(json!({
                "response": "Autolyse is a rest of flour and water before mixing.",
                "response_id": "resp-1",
                "prompt_variant": "v2",
                "cached": true
            }))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let answer = client.ask("what is autolyse?").await.unwrap();
    assert!(answer.response.contains("Autolyse"));
    assert_eq!(answer.response_id, "resp-1");
    assert_eq!(answer.prompt_variant, "v2");
    assert_eq!(answer.cached, Some(true));
}

#[tokio::test]
async fn status_codes_map_to_error_taxonomy() {
    let router = Router::new()
        .route("/ask", post(|| async { StatusCode::NOT_FOUND }))
        .route("/recipe", post(|| async { StatusCode::TOO_MANY_REQUESTS }))
        .route("/feedback", post(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let client = client_for(spawn_backend(router).await);

    assert!(matches!(client.ask("q").await, Err(ApiError::NotFound)));
    assert!(matches!(
        client.fetch_recipe("Rye").await,
        Err(ApiError::RateLimited)
    ));
    assert!(matches!(
        client.submit_feedback(&sample_feedback()).await,
        Err(ApiError::Server(503))
    ));
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let router = Router::new().route(
        "/ask",
        post(|| async { Json(json!({"unexpected": "shape"})) }),
    );
    let client = client_for(spawn_backend(router).await);

    assert!(matches!(client.ask("q").await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn ask_fallback_substitutes_canned_text() {
    let client = client_for(unreachable_backend().await);

    let text = client.ask_with_fallback("tell me about sourdough").await;
    assert!(text.to_lowercase().contains("sourdough"));
}

#[tokio::test]
async fn ask_fallback_prefers_real_answer_when_backend_is_up() {
    let router = Router::new().route(
        "/ask",
        post(|| async {
            Json(json!({
                "response": "Fresh answer from the backend.",
                "response_id": "resp-9",
                "prompt_variant": "v1"
            }))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let text = client.ask_with_fallback("tell me about sourdough").await;
    assert_eq!(text, "Fresh answer from the backend.");
}

#[tokio::test]
async fn recipe_decodes_full_shape() {
    let router = Router::new().route(
        "/recipe",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["bread_name"], "Ciabatta");
            Json(json!({
                "name": "Ciabatta",
                "description": "An airy Italian white bread.",
                "prep_time": "20 min",
                "ferment_time": "3 hrs",
                "bake_time": "25 min",
                "difficulty": "Medium",
                "ingredients": [
                    {"amount": "500g", "item": "bread flour"},
                    {"amount": "400g", "item": "water"}
                ],
                "instructions": ["Mix the biga.", "Fold and rest.", "Bake hot."],
                "tips": "Handle the wet dough gently.",
                "response_id": "resp-7",
                "prompt_variant": "v3"
            }))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    let recipe = client.fetch_recipe("Ciabatta").await.unwrap();
    assert_eq!(recipe.name, "Ciabatta");
    assert_eq!(recipe.difficulty, "Medium");
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].amount, "500g");
    assert_eq!(recipe.instructions.len(), 3);
    assert_eq!(recipe.cached, None);
}

#[tokio::test]
async fn feedback_returns_backend_success_flag() {
    let router = Router::new().route(
        "/feedback",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["rating"], "positive");
            assert_eq!(body["response_type"], "ask");
            Json(json!({"success": true, "message": "recorded"}))
        }),
    );
    let client = client_for(spawn_backend(router).await);

    assert!(client.submit_feedback(&sample_feedback()).await.unwrap());
}

#[tokio::test]
async fn silent_feedback_swallows_errors() {
    let client = client_for(unreachable_backend().await);
    assert!(!client.submit_feedback_silent(&sample_feedback()).await);
}

#[tokio::test]
async fn health_is_true_only_for_http_200() {
    let healthy = Router::new().route("/health", get(|| async { Json(json!({"status": "healthy"})) }));
    let client = client_for(spawn_backend(healthy).await);
    assert!(client.check_health().await);

    let degraded = Router::new().route("/health", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let client = client_for(spawn_backend(degraded).await);
    assert!(!client.check_health().await);

    let client = client_for(unreachable_backend().await);
    assert!(!client.check_health().await);
}
