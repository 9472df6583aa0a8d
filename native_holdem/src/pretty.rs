use holdem_shared::{
    ActionEvent, ActionKind, BlindKind, Card, GameAction, PlayerStatus, RemovalReason,
    TableSnapshot,
};
use owo_colors::OwoColorize;

use crate::game::HandSummary;

fn format_card(c: Card, color: bool) -> String {
    let text = c.to_string();
    if color && c.is_red() {
        text.red().to_string()
    } else {
        text
    }
}

fn format_cards(cards: &[Card], color: bool) -> String {
    cards
        .iter()
        .map(|&c| format_card(c, color))
        .collect::<Vec<_>>()
        .join(" ")
}

fn marker(symbol: &str, word: &str, color: bool, paint: fn(&str) -> String) -> String {
    if color {
        paint(symbol)
    } else {
        word.to_string()
    }
}

fn format_player_action(who: String, action: &ActionKind, color: bool) -> String {
    match action {
        ActionKind::Fold => format!(
            "{} {} (fold)",
            marker("↩", "FOLD", color, |s| s.red().to_string()),
            who
        ),
        ActionKind::Check => format!(
            "{} {} (check)",
            marker("✓", "CHECK", color, |s| s.green().to_string()),
            who
        ),
        ActionKind::Call(n) => format!(
            "{} {} {} (call)",
            marker("↪", "CALL", color, |s| s.cyan().to_string()),
            who,
            n
        ),
        ActionKind::Bet(n) => format!(
            "{} {} {} (bet)",
            marker("●", "BET", color, |s| s.yellow().to_string()),
            who,
            n
        ),
        ActionKind::Raise { to, by } => format!(
            "{} {} to {} (+{}) (raise)",
            marker("▲", "RAISE", color, |s| s.magenta().to_string()),
            who,
            to,
            by
        ),
        ActionKind::PostBlind { kind, amount } => {
            let k = match kind {
                BlindKind::SmallBlind => "SB",
                BlindKind::BigBlind => "BB",
            };
            format!("{} {} {}", k, who, amount)
        }
        ActionKind::InvalidBet { amount } => format!(
            "{} {} {} (refused, folded)",
            marker("✗", "INVALID", color, |s| s.red().bold().to_string()),
            who,
            amount
        ),
    }
}

/// One line per event, for the console.
pub fn format_event_human(entry: &ActionEvent, color: bool) -> String {
    match entry {
        ActionEvent::PlayerAction { player_id, action } => {
            format_player_action(player_id.to_string(), action, color)
        }
        ActionEvent::GameAction(game) => match game {
            GameAction::StageChanged(s) => {
                let sname = format!("== {:?} ==", s);
                if color {
                    sname.bold().purple().to_string()
                } else {
                    sname
                }
            }
            GameAction::HandStarted { hand, seed } => {
                let title = format!("=== Hand {hand} (seed {seed}) ===");
                if color {
                    title.bold().blue().to_string()
                } else {
                    title
                }
            }
            GameAction::PlayerSeated { player_id, stack } => {
                format!("{} sits down with {}", player_id, stack)
            }
            GameAction::PlayerRemoved { player_id, reason } => match reason {
                RemovalReason::Broke => format!("{} is out of chips", player_id),
                RemovalReason::Disconnected => format!("{} left the table", player_id),
            },
            GameAction::DealtHole { player_id } => format!("Dealt hole to {}", player_id),
            GameAction::DealtCommunity { cards } => {
                format!("Board [{}]", format_cards(cards, color))
            }
            GameAction::SidePotOpened { side_pot } => format!("Side pot #{} opened", side_pot),
            GameAction::Showdown { hand_results } => {
                let lines = hand_results
                    .iter()
                    .map(|r| format!("  {}: {}", r.player_id, format_cards(&r.best_five, color)))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("Showdown\n{}", lines)
            }
            GameAction::PotAwarded {
                side_pot,
                winners,
                amount,
            } => {
                let names = winners
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Pot #{} of {} -> [{}]", side_pot, amount, names)
            }
        },
    }
}

pub fn format_table(snapshot: &TableSnapshot, color: bool) -> String {
    let mut out = String::new();
    let blinds = format!(
        "Blinds: SB {} / BB {}",
        snapshot.small_blind,
        snapshot.small_blind.saturating_mul(2)
    );
    if color {
        out.push_str(&blinds.bold().yellow().to_string());
    } else {
        out.push_str(&blinds);
    }
    out.push('\n');
    for seat in &snapshot.seats {
        let folded = if seat.status == PlayerStatus::Folded {
            if color {
                " [FOLDED]".red().to_string()
            } else {
                " [FOLDED]".to_string()
            }
        } else {
            String::new()
        };
        out.push_str(&format!("  {:>4} {:>6}{}\n", seat.id.to_string(), seat.balance, folded));
    }
    if !snapshot.community.is_empty() {
        out.push_str(&format!("Board: {}\n", format_cards(&snapshot.community, color)));
    }
    out.push_str(&format!("Pot: {}", snapshot.pot));
    out
}

pub fn format_summary(summary: &HandSummary) -> String {
    let paid = summary
        .payouts
        .iter()
        .map(|p| format!("{}+{}", p.player, p.amount))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "hand {} seed {}: {} rounds, pot {} [{}]",
        summary.hand, summary.seed, summary.rounds_played, summary.pot_total, paid
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_shared::{CardRank, CardSuit, PlayerId};

    #[test]
    fn plain_text_has_no_escape_codes() {
        let ev = ActionEvent::player(PlayerId(2), ActionKind::Raise { to: 60, by: 40 });
        assert_eq!(format_event_human(&ev, false), "RAISE P2 to 60 (+40) (raise)");
    }

    #[test]
    fn board_lists_cards() {
        let cards = vec![
            Card::new(CardRank::Ace, CardSuit::Spades),
            Card::new(CardRank::Ten, CardSuit::Hearts),
        ];
        let ev = ActionEvent::game(GameAction::DealtCommunity { cards });
        let text = format_event_human(&ev, false);
        assert!(text.starts_with("Board ["));
        assert_eq!(text.matches(' ').count(), 2);
    }

    #[test]
    fn awards_name_every_winner() {
        let ev = ActionEvent::game(GameAction::PotAwarded {
            side_pot: 1,
            winners: vec![PlayerId(0), PlayerId(3)],
            amount: 35,
        });
        assert_eq!(format_event_human(&ev, false), "Pot #1 of 35 -> [P0, P3]");
    }
}
