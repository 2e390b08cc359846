use crate::view::{HandView, RenderPayload};

/// The single mutation boundary. Everything before this trait is pure
/// data; implementations own whatever screen state exists.
///
/// A renderer receives one complete payload per poll cycle and must treat
/// it as self-sufficient: no diffing against a prior payload, and
/// rendering the same payload twice must be harmless.
pub trait Renderer {
    fn handoff(&mut self, payload: &RenderPayload);
}

/// Terminal renderer: mirrors the table on stdout, one frame per cycle.
#[derive(Debug, Default)]
pub struct TermRenderer;

impl Renderer for TermRenderer {
    fn handoff(&mut self, payload: &RenderPayload) {
        println!("\n=== table ===");
        let board: Vec<&str> = payload
            .board
            .iter()
            .map(|slot| slot.as_deref().unwrap_or(".."))
            .collect();
        println!("board: [{}]  pot: {}", board.join(" "), payload.pot_label);

        for slot in &payload.neighbors {
            match &slot.seat {
                None => println!("seat {}: --", slot.seat_number),
                Some(seat) => {
                    let bet = match seat.bet {
                        Some(amount) => format!(" bet {}", amount),
                        None => String::new(),
                    };
                    let folded = if seat.folded { " [FOLDED]" } else { "" };
                    let turn = if seat.is_turn { " <- to act" } else { "" };
                    println!(
                        "seat {}: {} ({}){}{}{}",
                        slot.seat_number, seat.username, seat.money_label, bet, folded, turn
                    );
                }
            }
        }

        let profile = &payload.profile;
        let hand = match &profile.hand {
            HandView::Hidden => "[## ##]".to_string(),
            HandView::Cards([left, right]) => format!("[{} {}]", left, right),
        };
        let folded = if profile.folded { " [FOLDED]" } else { "" };
        let turn = if profile.controls_enabled { " <- your move" } else { "" };
        println!(
            "you: {} ({}) {}{}{}",
            profile.username, profile.money_label, hand, folded, turn
        );
    }
}
