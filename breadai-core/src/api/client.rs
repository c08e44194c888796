//! HTTP client for the BreadAI backend
//!
//! Three POST endpoints plus a health probe, JSON over HTTP. Wire field
//! names are snake_case and must not change: the backend contract predates
//! this client. No retries, no deduplication; each call site issues at most
//! one request per user action.

use super::fallback;
use crate::config::CoreConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Remote client errors
///
/// Status mapping is part of the backend compatibility contract:
/// 2xx success, 400 BadRequest, 401/403 Unauthorized, 404 NotFound,
/// 429 RateLimited, 5xx Server, anything else Unknown. A body that fails to
/// decode is a distinct `Decode` error, never a status error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Bad request")]
    BadRequest,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Server error ({0})")]
    Server(u16),

    #[error("Unexpected status {0}")]
    Unknown(u16),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map an HTTP status code; `None` means success (2xx)
    pub fn from_status(code: u16) -> Option<ApiError> {
        match code {
            200..=299 => None,
            400 => Some(ApiError::BadRequest),
            401 | 403 => Some(ApiError::Unauthorized),
            404 => Some(ApiError::NotFound),
            429 => Some(ApiError::RateLimited),
            500..=599 => Some(ApiError::Server(code)),
            other => Some(ApiError::Unknown(other)),
        }
    }

    fn from_transport(e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Feedback rating, serialized lowercase on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    query: &'a str,
}

/// Answer from POST /ask
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub response: String,
    pub response_id: String,
    pub prompt_variant: String,
    /// Set when the backend served a previously computed answer
    #[serde(default)]
    pub cached: Option<bool>,
}

#[derive(Debug, Serialize)]
struct RecipeRequest<'a> {
    bread_name: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub amount: String,
    pub item: String,
}

/// Generated recipe from POST /recipe
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub ferment_time: String,
    pub bake_time: String,
    pub difficulty: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tips: String,
    pub response_id: String,
    pub prompt_variant: String,
    #[serde(default)]
    pub cached: Option<bool>,
}

/// Body for POST /feedback
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub response_id: String,
    pub query: String,
    /// The answer text being rated (wire name `response`)
    pub response: String,
    pub rating: Rating,
    pub prompt_variant: String,
    pub response_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
}

/// BreadAI backend client
pub struct BreadClient {
    http_client: reqwest::Client,
    base_url: String,
    recipe_timeout: Duration,
}

impl BreadClient {
    pub fn new(config: &CoreConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.ask_timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            recipe_timeout: config.recipe_timeout,
        })
    }

    async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST to backend");

        let mut request = self.http_client.post(&url).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(ApiError::from_transport)?;

        let status = response.status().as_u16();
        if let Some(err) = ApiError::from_status(status) {
            let detail = response.text().await.unwrap_or_default();
            warn!(url = %url, status, detail = %detail, "Backend returned error status");
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Ask the bread expert a free-form question
    pub async fn ask(&self, query: &str) -> Result<AskResponse, ApiError> {
        let answer: AskResponse = self.post_json("/ask", &AskRequest { query }, None).await?;
        info!(
            response_id = %answer.response_id,
            prompt_variant = %answer.prompt_variant,
            cached = answer.cached.unwrap_or(false),
            "Received ask answer"
        );
        Ok(answer)
    }

    /// Ask, substituting a canned keyword-matched answer on any failure
    ///
    /// The fallback path carries no response id or prompt variant, so this
    /// returns display text only; callers that submit feedback use [`ask`]
    /// directly.
    ///
    /// [`ask`]: BreadClient::ask
    pub async fn ask_with_fallback(&self, query: &str) -> String {
        match self.ask(query).await {
            Ok(answer) => answer.response,
            Err(e) => {
                warn!(error = %e, "Ask failed, substituting canned answer");
                fallback::canned_answer(query).to_string()
            }
        }
    }

    /// Generate a recipe for a bread by name (slower; longer timeout)
    pub async fn fetch_recipe(&self, bread_name: &str) -> Result<Recipe, ApiError> {
        let recipe: Recipe = self
            .post_json(
                "/recipe",
                &RecipeRequest { bread_name },
                Some(self.recipe_timeout),
            )
            .await?;
        info!(name = %recipe.name, response_id = %recipe.response_id, "Received recipe");
        Ok(recipe)
    }

    /// Submit feedback on an answer; returns the backend's success flag
    pub async fn submit_feedback(&self, feedback: &FeedbackRequest) -> Result<bool, ApiError> {
        let reply: FeedbackResponse = self.post_json("/feedback", feedback, None).await?;
        debug!(success = reply.success, message = %reply.message, "Feedback submitted");
        Ok(reply.success)
    }

    /// Feedback variant that swallows every error as `false`
    pub async fn submit_feedback_silent(&self, feedback: &FeedbackRequest) -> bool {
        match self.submit_feedback(feedback).await {
            Ok(success) => success,
            Err(e) => {
                debug!(error = %e, "Silent feedback submission failed");
                false
            }
        }
    }

    /// Probe GET /health; true only for HTTP 200 exactly
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http_client.get(&url).send().await {
            Ok(response) => response.status().as_u16() == 200,
            Err(e) => {
                debug!(error = %e, "Health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(ApiError::from_status(200).is_none());
        assert!(ApiError::from_status(204).is_none());
        assert!(matches!(ApiError::from_status(400), Some(ApiError::BadRequest)));
        assert!(matches!(ApiError::from_status(401), Some(ApiError::Unauthorized)));
        assert!(matches!(ApiError::from_status(403), Some(ApiError::Unauthorized)));
        assert!(matches!(ApiError::from_status(404), Some(ApiError::NotFound)));
        assert!(matches!(ApiError::from_status(429), Some(ApiError::RateLimited)));
        assert!(matches!(ApiError::from_status(500), Some(ApiError::Server(500))));
        assert!(matches!(ApiError::from_status(503), Some(ApiError::Server(503))));
        assert!(matches!(ApiError::from_status(302), Some(ApiError::Unknown(302))));
    }

    #[test]
    fn test_rating_wire_format() {
        assert_eq!(serde_json::to_string(&Rating::Positive).unwrap(), "\"positive\"");
        assert_eq!(serde_json::to_string(&Rating::Negative).unwrap(), "\"negative\"");
        assert_eq!(serde_json::to_string(&Rating::Neutral).unwrap(), "\"neutral\"");
    }

    #[test]
    fn test_feedback_request_wire_fields() {
        let feedback = FeedbackRequest {
            response_id: "r-1".to_string(),
            query: "q".to_string(),
            response: "a".to_string(),
            rating: Rating::Positive,
            prompt_variant: "v2".to_string(),
            response_type: "ask".to_string(),
            comment: None,
        };
        let json = serde_json::to_string(&feedback).unwrap();
        assert!(json.contains("\"response_id\":\"r-1\""));
        assert!(json.contains("\"prompt_variant\":\"v2\""));
        assert!(json.contains("\"response_type\":\"ask\""));
        // Absent comment must be omitted, not null
        assert!(!json.contains("comment"));
    }

    #[test]
    fn test_ask_response_cached_is_optional() {
        let json = "{\"response\":\"hi\",\"response_id\":\"r\",\"prompt_variant\":\"a\"}";
        let answer: AskResponse = serde_json::from_str(json).unwrap();
        assert_eq!(answer.cached, None);

        let json = "{\"response\":\"hi\",\"response_id\":\"r\",\"prompt_variant\":\"a\",\"cached\":true}";
        let answer: AskResponse = serde_json::from_str(json).unwrap();
        assert_eq!(answer.cached, Some(true));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = CoreConfig {
            base_url: "http://127.0.0.1:8000/".to_string(),
            ..CoreConfig::default()
        };
        let client = BreadClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
    }
}
