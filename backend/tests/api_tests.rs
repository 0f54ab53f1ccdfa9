//! API integration tests
//!
//! Drives the router with `oneshot` against a mock provider server bound on
//! a local ephemeral port:
//! - weather relay (success, provider error, transport failure)
//! - suggestion chain (static, live, fallback on error, missing text, transport)
//! - health endpoint

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::Query,
    http::{HeaderMap, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use clima_backend::{config::Config, create_app, AppState};
use config::Map;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shared::FALLBACK_MARKER;
use std::collections::HashMap;
use tower::ServiceExt;

const TEST_KEY: &str = "gsk_test_live_key";

// ============================================================================
// Mock providers
// ============================================================================

async fn mock_weather(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    match params.get("q").map(String::as_str) {
        Some("Atlantis") => (
            StatusCode::NOT_FOUND,
            Json(json!({"cod": "404", "message": "city not found"})),
        ),
        Some(city) => (
            StatusCode::OK,
            Json(json!({
                "name": city,
                "main": {"temp": 23.4, "humidity": 45},
                "weather": [{"icon": "01d", "description": "céu limpo"}],
                "echo": {
                    "units": params.get("units"),
                    "lang": params.get("lang"),
                    "appid": params.get("appid"),
                }
            })),
        ),
        None => (StatusCode::BAD_REQUEST, Json(json!({"cod": "400"}))),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TEST_KEY))
        .unwrap_or(false)
}

async fn mock_chat_ok(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "Invalid API Key"}})),
        );
    }
    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default().to_string();
    (
        StatusCode::OK,
        Json(json!({
            "model": body["model"],
            "choices": [{"message": {"role": "assistant", "content": "Camiseta e bermuda."}}],
            "prompt_echo": prompt,
        })),
    )
}

async fn mock_chat_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({"error": {"message": "Rate limit reached"}})),
    )
}

async fn mock_chat_empty() -> Json<Value> {
    Json(json!({"choices": []}))
}

async fn spawn_provider() -> SocketAddr {
    let app = Router::new()
        .route("/data/2.5/weather", get(mock_weather))
        .route("/ok/chat/completions", post(mock_chat_ok))
        .route("/error/chat/completions", post(mock_chat_error))
        .route("/empty/chat/completions", post(mock_chat_empty));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

// ============================================================================
// Helpers
// ============================================================================

fn config_with(pairs: &[(&str, String)]) -> Config {
    let vars: Map<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    Config::from_vars(vars).unwrap()
}

async fn app_for(provider: SocketAddr, ai_path: &str, groq_key: Option<&str>) -> Router {
    let mut pairs = vec![
        ("OPENWEATHER_API_KEY", "owm-test".to_string()),
        ("CLIMA__WEATHER__BASE_URL", format!("http://{}/data/2.5", provider)),
        ("CLIMA__AI__BASE_URL", format!("http://{}/{}", provider, ai_path)),
        ("CLIMA__HTTP__TIMEOUT_SECS", "5".to_string()),
    ];
    if let Some(key) = groq_key {
        pairs.push(("GROQ_API_KEY", key.to_string()));
    }
    create_app(AppState::new(config_with(&pairs)).unwrap())
}

fn unreachable_app(groq_key: Option<&str>) -> Router {
    let mut pairs = vec![
        ("CLIMA__WEATHER__BASE_URL", "http://127.0.0.1:1/data/2.5".to_string()),
        ("CLIMA__AI__BASE_URL", "http://127.0.0.1:1/openai/v1".to_string()),
        ("CLIMA__HTTP__TIMEOUT_SECS", "5".to_string()),
    ];
    if let Some(key) = groq_key {
        pairs.push(("GROQ_API_KEY", key.to_string()));
    }
    create_app(AppState::new(config_with(&pairs)).unwrap())
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn suggest_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ai/suggest")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)));
    (status, body)
}

fn valid_body() -> Value {
    json!({"temperature": 23, "humidity": 45, "city": "Recife"})
}

// ============================================================================
// Weather
// ============================================================================

#[tokio::test]
async fn test_weather_without_city_is_bad_request() {
    let (status, body) = send(unreachable_app(None), get_request("/weather")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "city");
}

#[tokio::test]
async fn test_weather_with_blank_city_is_bad_request() {
    let (status, body) = send(unreachable_app(None), get_request("/weather?city=%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_weather_relays_provider_json() {
    let provider = spawn_provider().await;
    let app = app_for(provider, "ok", None).await;

    let (status, body) = send(app, get_request("/weather?city=S%C3%A3o%20Paulo")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "São Paulo");
    assert_eq!(body["main"]["humidity"], 45);
    assert_eq!(body["weather"][0]["icon"], "01d");
    assert_eq!(body["echo"]["units"], "metric");
    assert_eq!(body["echo"]["lang"], "pt_br");
    assert_eq!(body["echo"]["appid"], "owm-test");
}

#[tokio::test]
async fn test_weather_repeated_city_is_forwarded_joined() {
    let provider = spawn_provider().await;
    let app = app_for(provider, "ok", None).await;

    let (status, body) = send(app, get_request("/weather?city=Rio&city=Niteroi")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Rio,Niteroi");
}

#[tokio::test]
async fn test_weather_relays_provider_error_status() {
    let provider = spawn_provider().await;
    let app = app_for(provider, "ok", None).await;

    let (status, body) = send(app, get_request("/weather?city=Atlantis")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"cod": "404", "message": "city not found"}));
}

#[tokio::test]
async fn test_weather_transport_failure_is_generic_500() {
    let (status, body) = send(unreachable_app(None), get_request("/weather?city=Recife")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "WEATHER_SERVICE_ERROR");
    assert_eq!(body["error"]["message_pt"], "Erro interno ao buscar clima");
    let text = body.to_string();
    assert!(!text.contains("127.0.0.1"));
    assert!(!text.to_lowercase().contains("connect"));
}

// ============================================================================
// Suggestions
// ============================================================================

#[tokio::test]
async fn test_suggest_missing_fields_is_bad_request() {
    for (body, field) in [
        (json!({"humidity": 45, "city": "Recife"}), "temperature"),
        (json!({"temperature": 23, "city": "Recife"}), "humidity"),
        (json!({"temperature": 23, "humidity": 45}), "city"),
    ] {
        let (status, response) = send(unreachable_app(None), suggest_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["field"], field);
    }
}

#[tokio::test]
async fn test_suggest_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/ai/suggest")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(unreachable_app(None), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "body");
}

#[tokio::test]
async fn test_suggest_array_body_is_bad_request() {
    let (status, body) =
        send(unreachable_app(None), suggest_request(json!([23, 45, "Recife"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "temperature");
}

#[tokio::test]
async fn test_suggest_falsy_city_is_bad_request() {
    for city in [json!(""), json!(0), Value::Null] {
        let body = json!({"temperature": 23, "humidity": 45, "city": city});
        let (status, response) = send(unreachable_app(None), suggest_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["field"], "city");
    }
}

#[tokio::test]
async fn test_suggest_text_temperature_is_static_suggestion() {
    let body = json!({"temperature": "quente", "humidity": 50, "city": "Recife"});
    let (status, response) = send(unreachable_app(None), suggest_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["mode"], "static");
    assert_eq!(
        response["content"],
        "Com quente°C, prefira roupas leves e respiráveis. Umidade: 50%"
    );
}

#[tokio::test]
async fn test_suggest_null_temperature_is_static_suggestion() {
    let body = json!({"temperature": null, "humidity": 50, "city": "Recife"});
    let (status, response) = send(unreachable_app(None), suggest_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response["content"],
        "Com null°C, use casaco pesado, cachecol, gorro e luvas. Umidade: 50%"
    );
}

#[tokio::test]
async fn test_suggest_without_key_is_static() {
    let (status, body) = send(unreachable_app(None), suggest_request(valid_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["raw"]["mode"], "static");
    assert_eq!(body["mode"], "static");
    assert_eq!(
        body["content"],
        "Com 23°C, use roupas confortáveis de meia estação. Umidade: 45%"
    );
}

#[tokio::test]
async fn test_suggest_with_placeholder_key_is_static() {
    let (status, body) = send(
        unreachable_app(Some("your_groq_api_key_here")),
        suggest_request(valid_body()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["raw"]["mode"], "static");
}

#[tokio::test]
async fn test_suggest_live_success() {
    let provider = spawn_provider().await;
    let app = app_for(provider, "ok", Some(TEST_KEY)).await;

    let (status, body) = send(app, suggest_request(valid_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "live");
    assert_eq!(body["content"], "Camiseta e bermuda.");
    assert_eq!(body["raw"]["model"], "openai/gpt-oss-120b");
    let prompt = body["raw"]["prompt_echo"].as_str().unwrap();
    assert!(prompt.contains("temperatura de 23 graus"));
    assert!(prompt.contains("umidade de 45%"));
    assert!(prompt.contains("cidade de Recife"));
}

#[tokio::test]
async fn test_suggest_transport_failure_falls_back() {
    let (status, body) = send(unreachable_app(Some(TEST_KEY)), suggest_request(valid_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "fallback");
    assert!(body["content"].as_str().unwrap().ends_with(FALLBACK_MARKER));
    assert!(body["raw"]["error"].is_string());
}

#[tokio::test]
async fn test_suggest_provider_error_falls_back_with_200() {
    let provider = spawn_provider().await;
    let app = app_for(provider, "error", Some(TEST_KEY)).await;

    let (status, body) = send(app, suggest_request(valid_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "fallback");
    assert!(body["content"].as_str().unwrap().ends_with(FALLBACK_MARKER));
    assert_eq!(body["raw"]["error"]["message"], "Rate limit reached");
}

#[tokio::test]
async fn test_suggest_rejected_key_falls_back() {
    let provider = spawn_provider().await;
    let app = app_for(provider, "ok", Some("gsk_wrong_key")).await;

    let (status, body) = send(app, suggest_request(valid_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["raw"]["error"]["message"], "Invalid API Key");
    assert!(body["content"].as_str().unwrap().ends_with(FALLBACK_MARKER));
}

#[tokio::test]
async fn test_suggest_success_without_text_falls_back() {
    let provider = spawn_provider().await;
    let app = app_for(provider, "empty", Some(TEST_KEY)).await;

    let (status, body) = send(app, suggest_request(valid_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "fallback");
    assert_eq!(body["raw"], json!({"choices": []}));
    assert!(body["content"].as_str().unwrap().ends_with(FALLBACK_MARKER));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = send(unreachable_app(None), get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}
