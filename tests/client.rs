//! Terminal client talking to a live router bound on an ephemeral port.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tubetitles::client::ApiClient;
use tubetitles::llm::{Completer, GroqCompleter, Provider};
use tubetitles::server::{AppState, create_router};
use tubetitles::session::{Session, parse_input};
use tubetitles::youtube::YouTubeClient;
use tubetitles::Error;

async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

async fn upstreams() -> (MockServer, MockServer) {
    let youtube = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "abc123def45"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "snippet": {
                    "title": "My Cool Video",
                    "channelTitle": "Cool Channel",
                    "thumbnails": { "default": { "url": "https://i.ytimg.com/vi/abc/default.jpg" } }
                },
                "contentDetails": { "duration": "PT5M9S" },
                "statistics": { "viewCount": "4321", "likeCount": "12" }
            }]
        })))
        .mount(&youtube)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "missing0000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&youtube)
        .await;

    let llm = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "1. Alpha\n2. Beta\n\n3.Gamma\nDelta" } }]
        })))
        .mount(&llm)
        .await;

    (youtube, llm)
}

fn state(youtube: &MockServer, llm: Option<&MockServer>) -> AppState {
    let completer = llm.map(|llm| {
        Arc::new(GroqCompleter::new(reqwest::Client::new(), "gsk-test", "llama-test").with_base_url(llm.uri()))
            as Arc<dyn Completer>
    });
    AppState {
        catalog: YouTubeClient::with_base_url(reqwest::Client::new(), youtube.uri()),
        youtube_api_key: Some("yt-key".to_string()),
        provider: Provider::Groq,
        completer,
        max_tokens: 500,
    }
}

#[tokio::test]
async fn test_load_then_generate() {
    let (youtube, llm) = upstreams().await;
    let base = spawn_server(state(&youtube, Some(&llm))).await;
    let api = ApiClient::new(reqwest::Client::new(), base);

    let mut session = Session::new();
    let video_id = parse_input("https://www.youtube.com/watch?v=abc123def45&t=10").unwrap();
    let summary = api.fetch_video_info(&video_id).await.unwrap();
    session.load(summary);

    let current = session.current().unwrap();
    assert_eq!(current.duration_text, "5:09");
    assert_eq!(current.thumbnail_url, "https://i.ytimg.com/vi/abc/default.jpg");

    let variations = api.generate_titles(session.seed_title().unwrap()).await.unwrap();
    assert_eq!(variations, vec!["Alpha", "Beta", "Gamma", "Delta"]);
}

#[tokio::test]
async fn test_server_error_message_reaches_client() {
    let (youtube, _llm) = upstreams().await;
    let base = spawn_server(state(&youtube, None)).await;
    let api = ApiClient::new(reqwest::Client::new(), base);

    let err = api.fetch_video_info("missing0000").await.unwrap_err();
    assert!(matches!(err, Error::Server(_)));
    assert_eq!(err.to_string(), "Video not found");

    let err = api.generate_titles("Seed").await.unwrap_err();
    assert_eq!(err.to_string(), "Groq API key not configured");
}

#[tokio::test]
async fn test_bad_request_maps_to_validation() {
    let (youtube, llm) = upstreams().await;
    let base = spawn_server(state(&youtube, Some(&llm))).await;
    let api = ApiClient::new(reqwest::Client::new(), base);

    let err = api.generate_titles("   ").await.unwrap_err();
    assert!(matches!(err, Error::Validation(ref msg) if msg == "Title is required"));
}

#[tokio::test]
async fn test_unreachable_server() {
    let api = ApiClient::new(reqwest::Client::new(), "http://127.0.0.1:9");
    let err = api.fetch_video_info("abc123def45").await.unwrap_err();
    assert!(matches!(err, Error::Provider { .. }));
}
