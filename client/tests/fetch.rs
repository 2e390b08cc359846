//! Integration tests against an in-process mock of the table API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};
use url::Url;

use greenfelt::error::ViewError;
use greenfelt::fetch::Client;
use greenfelt::poll::PollDriver;
use greenfelt::render::Renderer;
use greenfelt::view::{assemble, RenderPayload};
use greenfelt_protocol::{JoinRequest, PlayerAction};

struct MockTable {
    authorized: bool,
    game_ok: bool,
    malformed_game: bool,
    require_cookie: bool,
    game_hits: AtomicUsize,
    last_action: Mutex<Option<Value>>,
}

impl Default for MockTable {
    fn default() -> Self {
        MockTable {
            authorized: true,
            game_ok: true,
            malformed_game: false,
            require_cookie: false,
            game_hits: AtomicUsize::new(0),
            last_action: Mutex::new(None),
        }
    }
}

const SESSION_COOKIE: &str = "player=test-cookie";

async fn me(State(table): State<Arc<MockTable>>, headers: HeaderMap) -> Response {
    if !table.authorized {
        return (StatusCode::UNAUTHORIZED, "Not auth.").into_response();
    }
    if table.require_cookie {
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        if !cookie.contains(SESSION_COOKIE) {
            return (StatusCode::UNAUTHORIZED, "Not auth.").into_response();
        }
    }
    Json(json!({
        "username": "hero",
        "avatar_url": "/static/img/avatars/avatar_3.png",
        "game_id": 7,
        "money": 250,
        "hand": ["1_4", "7_2"],
        "seat": 2,
        "bet": 0,
        "folded": false
    }))
    .into_response()
}

async fn game(State(table): State<Arc<MockTable>>, Path(game_id): Path<u64>) -> Response {
    table.game_hits.fetch_add(1, Ordering::SeqCst);
    if !table.game_ok {
        return (StatusCode::FORBIDDEN, "You're not in this game !").into_response();
    }
    if table.malformed_game {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    assert_eq!(game_id, 7);
    Json(json!({
        "seats": [
            { "username": "alice", "avatar_url": "/static/img/avatars/avatar_5.png", "money": 480, "bet": 20, "folded": false },
            { "username": "hero", "avatar_url": "/static/img/avatars/avatar_3.png", "money": 250, "bet": 0, "folded": false },
            null,
            { "username": "bob", "avatar_url": "/static/img/avatars/avatar_7.png", "money": 90, "bet": 0, "folded": true },
            null,
            null
        ],
        "board": ["Ah", "Kd", "", "", ""],
        "pot": 120,
        "playing": "alice"
    }))
    .into_response()
}

async fn game_list() -> Response {
    Json(json!({ "Main table": 3, "High rollers": 1 })).into_response()
}

async fn join(Form(request): Form<JoinRequest>) -> Response {
    assert!(request.avatar >= 1 && request.avatar <= 10);
    (
        StatusCode::OK,
        [(
            header::SET_COOKIE,
            format!("{}; HttpOnly; Path=/", SESSION_COOKIE),
        )],
        "ok",
    )
        .into_response()
}

async fn action(State(table): State<Arc<MockTable>>, Json(body): Json<Value>) -> Response {
    *table.last_action.lock().unwrap() = Some(body);
    (StatusCode::OK, "ok").into_response()
}

async fn leave() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn serve(table: Arc<MockTable>) -> Url {
    let app = Router::new()
        .route("/api/me", get(me))
        .route("/api/game/:id", get(game))
        .route("/api/game/:id/action", post(action))
        .route("/api/game_list", get(game_list))
        .route("/api/join", post(join))
        .route("/api/leave", post(leave))
        .with_state(table);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

#[tokio::test]
async fn full_view_round_trip() {
    let table = Arc::new(MockTable::default());
    let client = Client::new(serve(table).await);

    let view = client.fetch_view().await.unwrap();
    assert_eq!(view.me.username, "hero");
    assert_eq!(view.me.game_id, 7);
    assert_eq!(view.seats.len(), 6);
    assert_eq!(view.pot, 120);
    assert_eq!(view.playing, "alice");

    let payload = assemble(&view).unwrap();
    assert_eq!(payload.pot_label, "120€");
    assert_eq!(payload.board[0].as_deref(), Some("Ah"));
    assert_eq!(payload.board[1].as_deref(), Some("Kd"));
    assert!(payload.board[2..].iter().all(|slot| slot.is_none()));

    // hero sits in seat 2, so slots run 3, 4, 5, 6, 1.
    assert_eq!(payload.neighbors[0].seat_number, 3);
    assert!(payload.neighbors[0].seat.is_none());

    let bob = payload.neighbors[1].seat.as_ref().unwrap();
    assert!(bob.folded);
    assert_eq!(bob.bet, None);

    let alice = payload.neighbors[4].seat.as_ref().unwrap();
    assert!(alice.is_turn);
    assert_eq!(alice.bet, Some(20));
    assert!(!payload.profile.controls_enabled);
}

#[tokio::test]
async fn identity_failure_short_circuits() {
    let table = Arc::new(MockTable {
        authorized: false,
        ..Default::default()
    });
    let client = Client::new(serve(table.clone()).await);

    let err = client.fetch_view().await.unwrap_err();
    assert!(matches!(err, ViewError::IdentityUnavailable { .. }));
    // The game endpoint was never contacted.
    assert_eq!(table.game_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn game_failure_is_distinct_and_never_partial() {
    let table = Arc::new(MockTable {
        game_ok: false,
        ..Default::default()
    });
    let client = Client::new(serve(table).await);

    let err = client.fetch_view().await.unwrap_err();
    assert!(matches!(err, ViewError::GameUnavailable { .. }));
}

#[tokio::test]
async fn malformed_game_body_is_its_own_failure() {
    let table = Arc::new(MockTable {
        malformed_game: true,
        ..Default::default()
    });
    let client = Client::new(serve(table).await);

    let err = client.fetch_view().await.unwrap_err();
    match err {
        ViewError::MalformedResponse { endpoint, .. } => assert_eq!(endpoint, "api/game/7"),
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn join_session_cookie_authenticates_later_reads() {
    let table = Arc::new(MockTable {
        require_cookie: true,
        ..Default::default()
    });
    let client = Client::new(serve(table).await);

    let err = client.fetch_profile().await.unwrap_err();
    assert!(matches!(err, ViewError::IdentityUnavailable { .. }));

    client
        .join(&JoinRequest {
            username: "hero".to_string(),
            avatar: 3,
            game_choice: 7,
        })
        .await
        .unwrap();

    let profile = client.fetch_profile().await.unwrap();
    assert_eq!(profile.username, "hero");
}

#[tokio::test]
async fn actions_post_the_expected_wire_shape() {
    let table = Arc::new(MockTable::default());
    let client = Client::new(serve(table.clone()).await);

    client.act(7, &PlayerAction::Raise { value: 40 }).await.unwrap();

    let body = table.last_action.lock().unwrap().clone().unwrap();
    assert_eq!(body, json!({ "action": "raise", "value": 40 }));
}

#[tokio::test]
async fn leaving_forfeits_the_seat() {
    let table = Arc::new(MockTable::default());
    let client = Client::new(serve(table).await);

    client.leave().await.unwrap();
}

#[tokio::test]
async fn game_listing_decodes() {
    let table = Arc::new(MockTable::default());
    let client = Client::new(serve(table).await);

    let listing = client.fetch_game_list().await.unwrap();
    assert_eq!(listing.get("Main table"), Some(&3));
    assert_eq!(listing.len(), 2);
}

struct Recorder(Vec<RenderPayload>);

impl Renderer for Recorder {
    fn handoff(&mut self, payload: &RenderPayload) {
        self.0.push(payload.clone());
    }
}

#[tokio::test]
async fn successful_cycles_hand_off_complete_payloads() {
    let table = Arc::new(MockTable::default());
    let mut driver = PollDriver::new(Client::new(serve(table).await), Duration::from_millis(10));
    let mut recorder = Recorder(Vec::new());

    driver.cycle(&mut recorder).await;
    driver.cycle(&mut recorder).await;

    assert_eq!(recorder.0.len(), 2);
    // Each cycle's payload is rebuilt from scratch and self-sufficient.
    assert_eq!(recorder.0[0], recorder.0[1]);
    assert_eq!(recorder.0[0].pot_label, "120€");
}

#[tokio::test]
async fn failed_cycles_render_nothing() {
    let table = Arc::new(MockTable {
        authorized: false,
        ..Default::default()
    });
    let mut driver = PollDriver::new(Client::new(serve(table).await), Duration::from_millis(10));
    let mut recorder = Recorder(Vec::new());

    driver.cycle(&mut recorder).await;

    assert!(recorder.0.is_empty());
}
