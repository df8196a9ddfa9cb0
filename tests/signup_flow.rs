//! End-to-end signup tests against a local stand-in for the registration API
//!
//! Each test starts an axum server on an ephemeral port that records every
//! POST body and answers with a fixed status, then drives the wizard through
//! its keyboard interface and `HttpSignupClient`.

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{json, Value};

use healthconnect::api::{ApiError, HttpSignupClient};
use healthconnect::config::LinksConfig;
use healthconnect::ui::SignupScreen;
use ratatui::{backend::TestBackend, Terminal};

// ─── Stand-in Server ──────────────────────────────────────────────────────────

#[derive(Clone)]
struct Recorder {
    status: StatusCode,
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn record_signup(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    recorder.requests.lock().unwrap().push((content_type, body));
    recorder.status
}

/// Start a server answering `status`; returns the signup URL and the log
async fn start_server(status: StatusCode) -> (String, Arc<Mutex<Vec<(Option<String>, Value)>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorder = Recorder {
        status,
        requests: Arc::clone(&requests),
    };
    let router = Router::new()
        .route("/api/signup", post(record_signup))
        .with_state(recorder);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}/api/signup", addr), requests)
}

// ─── Wizard Driver ────────────────────────────────────────────────────────────

fn press(screen: &mut SignupScreen, code: KeyCode) {
    screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

/// Fill all three steps as a user would and end on the role step
fn complete_form(screen: &mut SignupScreen) {
    screen.type_text("John");
    press(screen, KeyCode::Tab);
    screen.type_text("Doe");
    press(screen, KeyCode::Tab);
    screen.type_text("john.doe@example.com");
    press(screen, KeyCode::Enter);
    screen.type_text("Abcdef1!");
    press(screen, KeyCode::Enter);
    press(screen, KeyCode::Down);
    press(screen, KeyCode::Char(' '));
}

fn render_to_string(screen: &mut SignupScreen) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|f| screen.render(f)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn expected_body() -> Value {
    json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@example.com",
        "password": "Abcdef1!",
        "role": "patient"
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_accepted_signup_posts_once_and_shows_success() {
    let (url, requests) = start_server(StatusCode::CREATED).await;
    let client = HttpSignupClient::with_url(url).unwrap();
    let mut screen = SignupScreen::new(LinksConfig::default(), false);

    complete_form(&mut screen);
    assert_eq!(screen.step(), 3);
    assert_eq!(screen.password_strength().label(), "Very strong");

    let result = screen.submit_with(&client).await;

    assert_eq!(result, Some(Ok(())));
    assert!(screen.is_success());
    assert!(!screen.is_submitting());

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (content_type, body) = &requests[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, &expected_body());
    drop(requests);

    let rendered = render_to_string(&mut screen);
    assert!(rendered.contains("Registration Successful!"));
    assert!(!rendered.contains("First Name"));
}

#[tokio::test]
async fn test_rejected_signup_stays_on_role_step() {
    let (url, requests) = start_server(StatusCode::CONFLICT).await;
    let client = HttpSignupClient::with_url(url).unwrap();
    let mut screen = SignupScreen::new(LinksConfig::default(), false);

    complete_form(&mut screen);
    let result = screen.submit_with(&client).await;

    match result {
        Some(Err(ApiError::Http { status, .. })) => assert_eq!(status, 409),
        other => panic!("expected HTTP 409, got {:?}", other),
    }
    assert!(!screen.is_success());
    assert!(!screen.is_submitting());
    assert_eq!(screen.step(), 3);
    assert_eq!(requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_server() {
    let (url, requests) = start_server(StatusCode::OK).await;
    let client = HttpSignupClient::with_url(url).unwrap();
    let mut screen = SignupScreen::new(LinksConfig::default(), false);

    screen.type_text("John");
    press(&mut screen, KeyCode::Enter);
    screen.type_text("weak");
    press(&mut screen, KeyCode::Enter);

    assert!(screen.submit_with(&client).await.is_none());
    assert!(!screen.errors().is_empty());
    assert!(requests.lock().unwrap().is_empty());
}
