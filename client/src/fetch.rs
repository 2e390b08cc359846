use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use greenfelt_protocol::{GameListing, GameState, JoinRequest, PlayerAction, Profile, TableView};

use crate::error::ViewError;

/// Bounds a hung request so it fails the cycle instead of stalling the
/// poll loop.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const ME_PATH: &str = "api/me";
const GAME_LIST_PATH: &str = "api/game_list";
const JOIN_PATH: &str = "api/join";
const LEAVE_PATH: &str = "api/leave";

/// Why a single endpoint read failed, before it is mapped onto the step
/// that issued it.
enum StepFailure {
    /// Transport error or non-success status.
    Unavailable(String),
    /// Success status, body not the expected shape.
    Malformed(String),
}

/// HTTP client for the table API.
///
/// The session is cookie-backed: `join` stores the player cookie the
/// server sets, and every later read authenticates with it. Nothing is
/// cached: each call re-fetches, so staleness is bounded only by the
/// poll interval.
pub struct Client {
    http: reqwest::Client,
    base: Url,
}

impl Client {
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("default reqwest client");
        Client { http, base }
    }

    fn url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{}{}", self.base.path(), path));
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StepFailure> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| StepFailure::Unavailable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StepFailure::Unavailable(format!("status {}", status)));
        }
        let body = response
            .text()
            .await
            .map_err(|e| StepFailure::Unavailable(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| StepFailure::Malformed(e.to_string()))
    }

    /// Step 1 of the acquisition: who am I, and which game am I in.
    pub async fn fetch_profile(&self) -> Result<Profile, ViewError> {
        match self.get_json::<Profile>(ME_PATH).await {
            Ok(profile) => Ok(profile),
            Err(StepFailure::Unavailable(reason)) => Err(ViewError::IdentityUnavailable { reason }),
            Err(StepFailure::Malformed(detail)) => Err(ViewError::MalformedResponse {
                endpoint: ME_PATH.to_string(),
                detail,
            }),
        }
    }

    /// Step 2: the current state of the game the identity referenced.
    pub async fn fetch_game(&self, game_id: u64) -> Result<GameState, ViewError> {
        let path = format!("api/game/{}", game_id);
        match self.get_json::<GameState>(&path).await {
            Ok(game) => Ok(game),
            Err(StepFailure::Unavailable(reason)) => Err(ViewError::GameUnavailable { reason }),
            Err(StepFailure::Malformed(detail)) => Err(ViewError::MalformedResponse {
                endpoint: path,
                detail,
            }),
        }
    }

    /// The full two-step acquisition: identity → game id → game state,
    /// merged into one `TableView`. A failure at either step carries that
    /// step's kind; the second read is never issued after a first-step
    /// failure.
    pub async fn fetch_view(&self) -> Result<TableView, ViewError> {
        let me = self.fetch_profile().await?;
        let game = self.fetch_game(me.game_id).await?;
        Ok(TableView::merge(me, game))
    }

    /// Lobby browser: open games and how many players each holds.
    pub async fn fetch_game_list(&self) -> Result<GameListing, ViewError> {
        match self.get_json::<GameListing>(GAME_LIST_PATH).await {
            Ok(listing) => Ok(listing),
            Err(StepFailure::Unavailable(reason)) => Err(ViewError::GameUnavailable { reason }),
            Err(StepFailure::Malformed(detail)) => Err(ViewError::MalformedResponse {
                endpoint: GAME_LIST_PATH.to_string(),
                detail,
            }),
        }
    }

    /// Registers in a game. On success the server sets the session cookie
    /// this client keeps for every subsequent call.
    pub async fn join(&self, request: &JoinRequest) -> Result<(), ViewError> {
        debug!(username = %request.username, game = request.game_choice, "joining");
        let response = self
            .http
            .post(self.url(JOIN_PATH))
            .form(request)
            .send()
            .await
            .map_err(|e| ViewError::IdentityUnavailable { reason: e.to_string() })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ViewError::IdentityUnavailable {
                reason: format!("status {}", status),
            });
        }
        Ok(())
    }

    /// Posts an action for the viewer's turn.
    pub async fn act(&self, game_id: u64, action: &PlayerAction) -> Result<(), ViewError> {
        debug!(game = game_id, %action, "acting");
        let response = self
            .http
            .post(self.url(&format!("api/game/{}/action", game_id)))
            .json(action)
            .send()
            .await
            .map_err(|e| ViewError::GameUnavailable { reason: e.to_string() })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ViewError::GameUnavailable {
                reason: format!("status {}", status),
            });
        }
        Ok(())
    }

    /// Leaves the current game and forfeits the seat.
    pub async fn leave(&self) -> Result<(), ViewError> {
        let response = self
            .http
            .post(self.url(LEAVE_PATH))
            .send()
            .await
            .map_err(|e| ViewError::IdentityUnavailable { reason: e.to_string() })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ViewError::IdentityUnavailable {
                reason: format!("status {}", status),
            });
        }
        Ok(())
    }
}
