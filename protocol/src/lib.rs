use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ---- Table geometry ----
/// Fixed number of seats at a table.
pub const SEAT_COUNT: usize = 6;
/// On-screen slots for everyone except the viewer.
pub const NEIGHBOR_SLOTS: usize = SEAT_COUNT - 1;
/// Community card positions on the board.
pub const BOARD_SLOTS: usize = 5;
/// A shown hand is always exactly two hole cards.
pub const HOLE_CARDS: usize = 2;
/// Selectable avatars on the registration screen, numbered 1..=10.
pub const AVATAR_COUNT: u8 = 10;

/// Opaque card asset key (e.g. "1_4"). The renderer resolves it to a
/// visual asset; the client only passes it through.
pub type CardId = String;

/// A seat occupant as the game endpoint reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub username: String,
    pub avatar_url: String,
    pub money: u64,
    pub bet: u64,
    #[serde(default)]
    pub folded: bool,
}

/// Identity payload from `/api/me`, the only place the viewer's own hole
/// cards travel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub avatar_url: String,
    pub game_id: u64,
    pub money: u64,
    pub bet: u64,
    #[serde(default)]
    pub folded: bool,
    #[serde(default)]
    pub hand: Vec<CardId>,
    /// Seat number the server claims for the viewer. The view assembler
    /// re-derives the local seat from the seat table by username.
    #[serde(default)]
    pub seat: Option<u8>,
}

/// Game payload from `/api/game/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    /// Ordered seat table, one entry per physical seat, `null` = empty.
    pub seats: Vec<Option<Player>>,
    /// Up to `BOARD_SLOTS` card keys; absent or empty string = no card.
    #[serde(default)]
    pub board: Vec<CardId>,
    pub pot: u64,
    /// Username of the player expected to act, empty when nobody is.
    #[serde(default)]
    pub playing: String,
}

/// The merged per-cycle view: identity namespaced under `me`, game fields
/// at top level. Rebuilt from scratch on every poll, never patched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    pub me: Profile,
    pub seats: Vec<Option<Player>>,
    pub board: Vec<CardId>,
    pub pot: u64,
    pub playing: String,
}

impl TableView {
    /// Shallow union of the two payloads. Game fields are taken from the
    /// game payload only, so they win any name collision with identity
    /// fields outside the `me` namespace.
    pub fn merge(me: Profile, game: GameState) -> Self {
        TableView {
            me,
            seats: game.seats,
            board: game.board,
            pot: game.pot,
            playing: game.playing,
        }
    }
}

/// Lobby listing from `/api/game_list`: game name → connected players.
pub type GameListing = BTreeMap<String, u32>;

/// Form body for `/api/join` (the registration screen).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinRequest {
    pub username: String,
    pub avatar: u8,
    pub game_choice: u64,
}

/// An action posted to `/api/game/{id}/action` on the viewer's turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PlayerAction {
    Check,
    Call,
    Raise { value: u64 },
    Fold,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Check => write!(f, "check"),
            PlayerAction::Call => write!(f, "call"),
            PlayerAction::Raise { value } => write!(f, "raise {}", value),
            PlayerAction::Fold => write!(f, "fold"),
        }
    }
}
