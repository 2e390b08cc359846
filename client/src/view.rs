use greenfelt_protocol::{CardId, Player, TableView, BOARD_SLOTS, HOLE_CARDS, NEIGHBOR_SLOTS};

use crate::error::ViewError;
use crate::rotation::rotate;

/// The viewer's own hole cards: shown only when exactly two are present,
/// otherwise face-down placeholders. Never one up, one down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandView {
    Hidden,
    Cards([CardId; HOLE_CARDS]),
}

/// Display-ready occupant of a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub username: String,
    pub avatar_url: String,
    pub money_label: String,
    /// Bet token amount; `None` hides the token.
    pub bet: Option<u64>,
    pub folded: bool,
    pub is_turn: bool,
}

/// A neighbor slot ready to draw: `seat` is `None` for an unoccupied seat,
/// which the renderer hides rather than drawing a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborView {
    pub seat_number: u8,
    pub seat: Option<SeatView>,
}

/// The viewer's own panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub username: String,
    pub avatar_url: String,
    pub money_label: String,
    pub bet: Option<u64>,
    pub folded: bool,
    pub is_turn: bool,
    /// Action controls are enabled only on the viewer's own turn.
    pub controls_enabled: bool,
    pub hand: HandView,
}

/// Complete, self-sufficient snapshot for one render. Each payload fully
/// replaces the previous frame; renderers never diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPayload {
    pub profile: ProfileView,
    pub neighbors: [NeighborView; NEIGHBOR_SLOTS],
    /// Fixed board positions; `None` renders as hidden, not a placeholder.
    pub board: [Option<CardId>; BOARD_SLOTS],
    pub pot: u64,
    pub pot_label: String,
}

/// Chip amounts the way the table displays them.
pub fn money_label(amount: u64) -> String {
    format!("{}€", amount)
}

fn bet_token(bet: u64) -> Option<u64> {
    if bet == 0 {
        None
    } else {
        Some(bet)
    }
}

fn hand_view(cards: &[CardId]) -> HandView {
    if cards.len() != HOLE_CARDS {
        return HandView::Hidden;
    }
    HandView::Cards([cards[0].clone(), cards[1].clone()])
}

fn board_view(board: &[CardId]) -> [Option<CardId>; BOARD_SLOTS] {
    std::array::from_fn(|i| board.get(i).filter(|card| !card.is_empty()).cloned())
}

fn seat_view(player: &Player, playing: &str) -> SeatView {
    SeatView {
        username: player.username.clone(),
        avatar_url: player.avatar_url.clone(),
        money_label: money_label(player.money),
        bet: bet_token(player.bet),
        folded: player.folded,
        is_turn: !playing.is_empty() && player.username == playing,
    }
}

/// Builds the render payload for one cycle.
///
/// The local seat is derived by locating the viewer's username in the seat
/// table; a viewer missing from its own reported game is an inconsistency,
/// not an empty state. Upstream fetch failures never reach this function;
/// it adds only `ViewerNotSeated`.
pub fn assemble(view: &TableView) -> Result<RenderPayload, ViewError> {
    let me = &view.me;
    let local_seat = view
        .seats
        .iter()
        .position(|seat| {
            seat.as_ref()
                .is_some_and(|p| p.username == me.username)
        })
        .map(|index| (index + 1) as u8)
        .ok_or_else(|| ViewError::ViewerNotSeated {
            username: me.username.clone(),
        })?;

    let your_turn = !view.playing.is_empty() && view.playing == me.username;

    let neighbors = rotate(&view.seats, local_seat).map(|slot| NeighborView {
        seat_number: slot.seat_number,
        seat: slot.player.as_ref().map(|p| seat_view(p, &view.playing)),
    });

    Ok(RenderPayload {
        profile: ProfileView {
            username: me.username.clone(),
            avatar_url: me.avatar_url.clone(),
            money_label: money_label(me.money),
            bet: bet_token(me.bet),
            folded: me.folded,
            is_turn: your_turn,
            controls_enabled: your_turn,
            hand: hand_view(&me.hand),
        },
        neighbors,
        board: board_view(&view.board),
        pot: view.pot,
        pot_label: money_label(view.pot),
    })
}
