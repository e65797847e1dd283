//! The table's connection to its players: prompts, private cards and
//! public announcements.

use std::fmt;

use async_trait::async_trait;
use holdem_engine::cards::{format_cards, Card};
use holdem_engine::engine::TableView;
use holdem_engine::logger::Street;
use holdem_engine::player::PlayerId;
use holdem_engine::rules::LegalActions;
use serde::{Deserialize, Serialize};

/// Button a human pressed. A raise is followed by a separate amount prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionChoice {
    Fold,
    Check,
    Call,
    Raise,
}

/// What a human is shown when asked to act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptContext {
    pub hand_number: u32,
    pub seat_name: String,
    pub view: TableView,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoFoldReason {
    Timeout,
    ChannelClosed,
    InvalidRaise(String),
    IllegalChoice,
}

impl fmt::Display for AutoFoldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoFoldReason::Timeout => f.write_str("took too long to act"),
            AutoFoldReason::ChannelClosed => f.write_str("left the table"),
            AutoFoldReason::InvalidRaise(input) => write!(f, "invalid raise amount {input:?}"),
            AutoFoldReason::IllegalChoice => f.write_str("chose an action that was not available"),
        }
    }
}

/// Public message posted to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Announcement {
    PlayerJoined {
        name: String,
    },
    PlayerLeft {
        name: String,
    },
    LobbyCancelled,
    BuyInFailed {
        name: String,
        reason: String,
    },
    /// Too few seats survived the buy-ins; everyone was refunded
    SessionAborted,
    HandStarted {
        hand: u32,
        dealer: String,
        small_blind: String,
        big_blind: String,
    },
    BlindPosted {
        name: String,
        amount: u32,
        big: bool,
        all_in: bool,
    },
    Folded {
        name: String,
    },
    AutoFolded {
        name: String,
        reason: AutoFoldReason,
    },
    Checked {
        name: String,
    },
    Called {
        name: String,
        amount: u32,
        all_in: bool,
    },
    Raised {
        name: String,
        to: u32,
        all_in: bool,
    },
    StreetDealt {
        street: Street,
        board: Vec<Card>,
    },
    RunOut,
    ShowdownReveal {
        name: String,
        cards: [Card; 2],
        hand: String,
    },
    PotAwarded {
        name: String,
        amount: u32,
        side_pot: bool,
        hand: String,
    },
    WonUncontested {
        name: String,
        amount: u32,
    },
    Eliminated {
        name: String,
    },
    CashedOut {
        name: String,
        amount: u32,
    },
    CashOutFailed {
        name: String,
        amount: u32,
        reason: String,
    },
    SessionEnded {
        hands: u32,
    },
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Announcement::PlayerJoined { name } => write!(f, "{name} joined the table"),
            Announcement::PlayerLeft { name } => write!(f, "{name} left the table"),
            Announcement::LobbyCancelled => f.write_str("The host cancelled the table"),
            Announcement::BuyInFailed { name, reason } => {
                write!(f, "{name} could not buy in: {reason}")
            }
            Announcement::SessionAborted => {
                f.write_str("Not enough players could buy in; all buy-ins were refunded")
            }
            Announcement::HandStarted {
                hand,
                dealer,
                small_blind,
                big_blind,
            } => write!(
                f,
                "Hand #{hand}: {dealer} has the button, {small_blind} posts the small blind, {big_blind} the big blind"
            ),
            Announcement::BlindPosted {
                name,
                amount,
                big,
                all_in,
            } => {
                let blind = if *big { "big" } else { "small" };
                write!(f, "{name} posts the {blind} blind of {amount}")?;
                if *all_in {
                    f.write_str(" and is all-in")?;
                }
                Ok(())
            }
            Announcement::Folded { name } => write!(f, "{name} folds"),
            Announcement::AutoFolded { name, reason } => {
                write!(f, "{name} {reason} and is folded")
            }
            Announcement::Checked { name } => write!(f, "{name} checks"),
            Announcement::Called {
                name,
                amount,
                all_in,
            } => {
                write!(f, "{name} calls {amount}")?;
                if *all_in {
                    f.write_str(" and is all-in")?;
                }
                Ok(())
            }
            Announcement::Raised { name, to, all_in } => {
                if *all_in {
                    write!(f, "{name} is all-in for {to}")
                } else {
                    write!(f, "{name} raises to {to}")
                }
            }
            Announcement::StreetDealt { street, board } => {
                write!(f, "{}: {}", street.name(), format_cards(board))
            }
            Announcement::RunOut => f.write_str("All players are all-in; running out the board"),
            Announcement::ShowdownReveal { name, cards, hand } => {
                write!(f, "{name} shows {} ({hand})", format_cards(cards))
            }
            Announcement::PotAwarded {
                name,
                amount,
                side_pot,
                hand,
            } => {
                let pot = if *side_pot { "a side pot" } else { "the pot" };
                write!(f, "{name} wins {amount} from {pot} with {hand}")
            }
            Announcement::WonUncontested { name, amount } => {
                write!(f, "{name} wins {amount} uncontested")
            }
            Announcement::Eliminated { name } => write!(f, "{name} is out of chips"),
            Announcement::CashedOut { name, amount } => write!(f, "{name} cashes out {amount}"),
            Announcement::CashOutFailed {
                name,
                amount,
                reason,
            } => write!(f, "Could not return {amount} chips to {name}: {reason}"),
            Announcement::SessionEnded { hands } => {
                write!(f, "The table is closed after {hands} hands")
            }
        }
    }
}

/// Where a table talks to its players.
///
/// Implementations own all presentation (chat embeds, buttons, a terminal).
/// A `None` reply means the player can no longer answer; the session treats
/// it like a timeout.
#[async_trait]
pub trait TableChannel: Send + Sync {
    /// Asks a human seat for its action. The session bounds this with the
    /// table's decision timeout.
    async fn prompt_action(
        &self,
        player: PlayerId,
        legal: &LegalActions,
        context: &PromptContext,
    ) -> Option<ActionChoice>;

    /// Asks for the raise total after a raise was chosen.
    async fn collect_raise_amount(&self, player: PlayerId, min: u32, max: u32)
        -> Option<String>;

    async fn announce(&self, announcement: &Announcement);

    /// Shows a human seat its hole cards.
    async fn deal_private(&self, player: PlayerId, cards: [Card; 2]) {
        let _ = (player, cards);
    }

    /// The session is over and the table can be removed.
    async fn teardown(&self);
}
