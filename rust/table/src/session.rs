use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use holdem_ai::create_ai;
use holdem_engine::deck::Deck;
use holdem_engine::engine::{Engine, TableView};
use holdem_engine::events::{BlindKind, TableEvent};
use holdem_engine::game::clockwise_from;
use holdem_engine::logger::HandLogger;
use holdem_engine::player::{Controller, Difficulty, PlayerAction, PlayerId, Seat};
use holdem_engine::rules::{Blinds, RaiseBounds};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use uuid::Uuid;

use crate::channel::{ActionChoice, Announcement, AutoFoldReason, PromptContext, TableChannel};
use crate::errors::SessionError;
use crate::ledger::Ledger;
use crate::settings::TableSettings;

/// Bots get ids far above any chat-platform user id.
const BOT_ID_BASE: PlayerId = 1 << 62;

pub type SessionId = Uuid;

/// Builds the deck for the given hand number (1-based).
pub type DeckSource = Box<dyn FnMut(u32) -> Deck + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Lobby,
    InProgress,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Fewer than two seats have chips
    LastStackStanding,
    HandLimit,
    /// Fewer than two seats could pay the buy-in
    NotEnoughBuyIns,
    /// Closed early through [`GameSession::end_session`]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatResult {
    pub player: PlayerId,
    pub name: String,
    pub bot: bool,
    pub bought_in: u32,
    pub final_stack: u32,
    /// False when the cash-out credit failed
    pub settled: bool,
}

impl SeatResult {
    pub fn net(&self) -> i64 {
        i64::from(self.final_stack) - i64::from(self.bought_in)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashOutFailure {
    pub player: PlayerId,
    pub amount: u32,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub channel_id: String,
    pub hands_played: u32,
    pub reason: EndReason,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub results: Vec<SeatResult>,
    pub failed_cash_outs: Vec<CashOutFailure>,
}

impl SessionSummary {
    pub fn result_for(&self, player: PlayerId) -> Option<&SeatResult> {
        self.results.iter().find(|r| r.player == player)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSummary {
    pub hand: u32,
    pub pot: u32,
    pub winners: Vec<PlayerId>,
    pub showdown: bool,
    pub eliminated: Vec<PlayerId>,
}

/// One sitting at a table, from lobby to cash-out.
///
/// The session owns its seats. For each hand they are handed to a fresh
/// [`Engine`] and taken back when the pot has been paid. Buy-ins are debited
/// before the first card is dealt and stacks are credited back only after
/// the last hand, one settlement per seat. Bots are funded by the house and
/// never touch the ledger.
pub struct GameSession {
    id: SessionId,
    channel_id: String,
    host: PlayerId,
    settings: TableSettings,
    state: SessionState,
    seats: Vec<Seat>,
    busted: Vec<Seat>,
    bought_in: HashMap<PlayerId, u32>,
    dealer: usize,
    hands_played: u32,
    bots_added: u64,
    started_at: DateTime<Utc>,
    ledger: Arc<dyn Ledger>,
    channel: Arc<dyn TableChannel>,
    rng: StdRng,
    seed: Option<u64>,
    decks: Option<DeckSource>,
    hand_log: Option<HandLogger>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("channel_id", &self.channel_id)
            .field("state", &self.state)
            .field("seats", &self.seats.len())
            .field("hands_played", &self.hands_played)
            .finish()
    }
}

impl GameSession {
    pub fn new(
        channel_id: impl Into<String>,
        host: PlayerId,
        settings: TableSettings,
        ledger: Arc<dyn Ledger>,
        channel: Arc<dyn TableChannel>,
    ) -> Result<Self, SessionError> {
        settings.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            channel_id: channel_id.into(),
            host,
            settings,
            state: SessionState::Lobby,
            seats: Vec::new(),
            busted: Vec::new(),
            bought_in: HashMap::new(),
            dealer: 0,
            hands_played: 0,
            bots_added: 0,
            started_at: Utc::now(),
            ledger,
            channel,
            rng: StdRng::from_os_rng(),
            seed: None,
            decks: None,
            hand_log: None,
        })
    }

    /// Makes shuffles and bot decisions reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_decks<F>(mut self, source: F) -> Self
    where
        F: FnMut(u32) -> Deck + Send + Sync + 'static,
    {
        self.decks = Some(Box::new(source));
        self
    }

    pub fn with_hand_log(mut self, logger: HandLogger) -> Self {
        self.hand_log = Some(logger);
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn host(&self) -> PlayerId {
        self.host
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    /// Index of the button seat for the next hand.
    pub fn dealer(&self) -> usize {
        self.dealer
    }

    fn ensure_lobby(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Lobby {
            Ok(())
        } else {
            Err(SessionError::NotInLobby)
        }
    }

    fn ensure_room(&self, player: PlayerId) -> Result<(), SessionError> {
        self.ensure_lobby()?;
        if self.seats.iter().any(|s| s.id == player) {
            return Err(SessionError::AlreadySeated(player));
        }
        if self.seats.len() >= self.settings.max_seats {
            return Err(SessionError::TableFull(self.settings.max_seats));
        }
        Ok(())
    }

    pub async fn join(&mut self, player: PlayerId, name: &str) -> Result<(), SessionError> {
        self.ensure_room(player)?;
        self.seats
            .push(Seat::human(player, name, self.settings.buy_in));
        tracing::info!(session_id = %self.id, player, name, "player joined lobby");
        self.announce(Announcement::PlayerJoined {
            name: name.to_string(),
        })
        .await;
        Ok(())
    }

    pub async fn add_bot(&mut self, difficulty: Difficulty) -> Result<PlayerId, SessionError> {
        let id = BOT_ID_BASE + self.bots_added;
        self.ensure_room(id)?;
        self.bots_added += 1;
        let name = format!("Bot {} ({difficulty})", self.bots_added);
        self.seats
            .push(Seat::bot(id, name.clone(), self.settings.buy_in, difficulty));
        tracing::info!(session_id = %self.id, bot = id, %difficulty, "bot added to lobby");
        self.announce(Announcement::PlayerJoined { name }).await;
        Ok(id)
    }

    pub async fn leave(&mut self, player: PlayerId) -> Result<(), SessionError> {
        self.ensure_lobby()?;
        let index = self
            .seats
            .iter()
            .position(|s| s.id == player)
            .ok_or(SessionError::NotSeated(player))?;
        let seat = self.seats.remove(index);
        tracing::info!(session_id = %self.id, player, "player left lobby");
        self.announce(Announcement::PlayerLeft { name: seat.name }).await;
        Ok(())
    }

    /// Closes the lobby without moving any chips.
    pub async fn cancel(&mut self, by: PlayerId) -> Result<(), SessionError> {
        self.ensure_lobby()?;
        if by != self.host {
            return Err(SessionError::NotHost);
        }
        self.state = SessionState::Ended;
        tracing::info!(session_id = %self.id, "lobby cancelled by host");
        self.announce(Announcement::LobbyCancelled).await;
        self.channel.teardown().await;
        Ok(())
    }

    /// Collects buy-ins and plays hands until the session ends.
    ///
    /// A seat whose buy-in debit fails is dropped with an announcement. If
    /// fewer than two seats remain, every successful buy-in is refunded and
    /// the session ends without dealing.
    pub async fn start(&mut self, by: PlayerId) -> Result<SessionSummary, SessionError> {
        self.ensure_lobby()?;
        if by != self.host {
            return Err(SessionError::NotHost);
        }
        if self.seats.len() < 2 {
            return Err(SessionError::NotEnoughPlayers(self.seats.len()));
        }

        self.state = SessionState::InProgress;
        self.started_at = Utc::now();
        tracing::info!(
            session_id = %self.id,
            channel_id = %self.channel_id,
            seats = self.seats.len(),
            buy_in = self.settings.buy_in,
            "session starting"
        );

        self.collect_buy_ins().await;
        if self.seats.len() < 2 {
            tracing::warn!(
                session_id = %self.id,
                seats = self.seats.len(),
                "not enough buy-ins, refunding"
            );
            self.announce(Announcement::SessionAborted).await;
            return Ok(self.finish(EndReason::NotEnoughBuyIns).await);
        }

        loop {
            if self.seats.len() < 2 {
                return Ok(self.finish(EndReason::LastStackStanding).await);
            }
            if let Some(limit) = self.settings.hand_limit {
                if self.hands_played >= limit {
                    return Ok(self.finish(EndReason::HandLimit).await);
                }
            }
            if let Err(err) = self.play_hand().await {
                tracing::error!(session_id = %self.id, error = %err, "hand failed, closing table");
                self.finish(EndReason::Closed).await;
                return Err(err);
            }
        }
    }

    async fn collect_buy_ins(&mut self) {
        let buy_in = self.settings.buy_in;
        let seats = std::mem::take(&mut self.seats);
        let mut kept = Vec::with_capacity(seats.len());

        for mut seat in seats {
            if !seat.is_bot() {
                if let Err(err) = self.ledger.debit(seat.id, buy_in).await {
                    tracing::warn!(
                        session_id = %self.id,
                        player = seat.id,
                        error = %err,
                        "buy-in failed, dropping seat"
                    );
                    self.announce(Announcement::BuyInFailed {
                        name: seat.name.clone(),
                        reason: err.to_string(),
                    })
                    .await;
                    continue;
                }
            }
            seat.stack = buy_in;
            self.bought_in.insert(seat.id, buy_in);
            kept.push(seat);
        }

        self.seats = kept;
    }

    fn next_deck(&mut self, hand: u32) -> Deck {
        if let Some(source) = self.decks.as_mut() {
            return source(hand);
        }
        match self.hand_seed(hand) {
            Some(seed) => Deck::new_with_seed(seed),
            None => Deck::new(),
        }
    }

    fn hand_seed(&self, hand: u32) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(u64::from(hand)))
    }

    /// Plays one hand with the current seats and button.
    pub async fn play_hand(&mut self) -> Result<HandSummary, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::NotInProgress);
        }
        let blinds = Blinds::new(self.settings.small_blind, self.settings.big_blind);
        let hand = self.hands_played + 1;
        let deck = self.next_deck(hand);
        let mut engine = Engine::start_hand_seeded(
            self.seats.clone(),
            self.dealer,
            blinds,
            deck,
            self.hand_seed(hand),
        )?;
        self.hands_played = hand;
        tracing::info!(
            session_id = %self.id,
            hand,
            dealer = self.dealer,
            seats = self.seats.len(),
            "hand started"
        );

        for seat in engine.seats().iter().filter(|s| !s.is_bot()) {
            if let Some(cards) = seat.hole_cards() {
                self.channel.deal_private(seat.id, cards).await;
            }
        }
        self.publish(&mut engine, hand).await;

        while let Some(seat) = engine.current_seat() {
            let action = self.decide(&engine, seat, hand).await;
            if let Err(err) = engine.apply_action(seat, action) {
                tracing::warn!(
                    session_id = %self.id,
                    hand,
                    seat,
                    ?action,
                    error = %err,
                    "action rejected, folding seat"
                );
                engine.apply_action(seat, PlayerAction::Fold)?;
            }
            self.publish(&mut engine, hand).await;
        }

        let (pot, winners, showdown) = match engine.outcome() {
            Some(outcome) => (
                outcome.pot,
                outcome
                    .winners()
                    .into_iter()
                    .map(|i| engine.seats()[i].id)
                    .collect(),
                outcome.went_to_showdown,
            ),
            None => (0, Vec::new(), false),
        };
        if let Some(log) = self.hand_log.as_mut() {
            let record = engine.hand_record(log.next_id());
            if let Err(err) = log.write(&record) {
                tracing::warn!(session_id = %self.id, hand, error = %err, "failed to write hand history");
            }
        }
        tracing::info!(session_id = %self.id, hand, pot, ?winners, showdown, "hand complete");

        self.seats = engine.into_seats();
        let eliminated = self.remove_busted().await;
        Ok(HandSummary {
            hand,
            pot,
            winners,
            showdown,
            eliminated,
        })
    }

    /// Drops seats with no chips and moves the button to the next funded seat.
    async fn remove_busted(&mut self) -> Vec<PlayerId> {
        let n = self.seats.len();
        let next_button = clockwise_from(n, self.dealer)
            .find(|&i| self.seats[i].stack > 0)
            .map(|i| self.seats[i].id);

        let (alive, busted): (Vec<Seat>, Vec<Seat>) = std::mem::take(&mut self.seats)
            .into_iter()
            .partition(|s| s.stack > 0);
        self.seats = alive;
        self.dealer = next_button
            .and_then(|id| self.seats.iter().position(|s| s.id == id))
            .unwrap_or(0);

        let mut eliminated = Vec::with_capacity(busted.len());
        for seat in busted {
            tracing::info!(session_id = %self.id, player = seat.id, "seat eliminated");
            self.announce(Announcement::Eliminated {
                name: seat.name.clone(),
            })
            .await;
            eliminated.push(seat.id);
            self.busted.push(seat);
        }
        eliminated
    }

    async fn decide(&mut self, engine: &Engine, seat: usize, hand: u32) -> PlayerAction {
        let Some(view) = engine.view(seat) else {
            return PlayerAction::Fold;
        };
        let player = &engine.seats()[seat];
        match player.controller {
            Controller::Bot(difficulty) => {
                let think = self.settings.bot_think();
                if !think.is_zero() {
                    tokio::time::sleep(think).await;
                }
                let decision = create_ai(difficulty).decide(&view, &mut self.rng);
                tracing::debug!(
                    session_id = %self.id,
                    hand,
                    seat,
                    ?decision,
                    "bot decided"
                );
                decision.into_action(&view)
            }
            Controller::Human => {
                let (id, name) = (player.id, player.name.clone());
                self.ask_human(id, name, view, hand).await
            }
        }
    }

    async fn ask_human(
        &self,
        player: PlayerId,
        name: String,
        view: TableView,
        hand: u32,
    ) -> PlayerAction {
        let legal = view.legal;
        let context = PromptContext {
            hand_number: hand,
            seat_name: name.clone(),
            view,
            timeout_secs: self.settings.decision_timeout_secs,
        };
        let reply = timeout(
            self.settings.decision_timeout(),
            self.channel.prompt_action(player, &legal, &context),
        )
        .await;

        let choice = match reply {
            Ok(Some(choice)) => choice,
            Ok(None) => return self.auto_fold(&name, AutoFoldReason::ChannelClosed).await,
            Err(_) => return self.auto_fold(&name, AutoFoldReason::Timeout).await,
        };

        match choice {
            ActionChoice::Fold => PlayerAction::Fold,
            ActionChoice::Check if legal.can_check => PlayerAction::Check,
            ActionChoice::Call if legal.call.is_some() => PlayerAction::Call,
            ActionChoice::Call if legal.can_check => PlayerAction::Check,
            ActionChoice::Raise => match legal.raise {
                Some(bounds) => self.ask_raise_total(player, &name, bounds).await,
                None => self.auto_fold(&name, AutoFoldReason::IllegalChoice).await,
            },
            _ => self.auto_fold(&name, AutoFoldReason::IllegalChoice).await,
        }
    }

    async fn ask_raise_total(
        &self,
        player: PlayerId,
        name: &str,
        bounds: RaiseBounds,
    ) -> PlayerAction {
        let reply = timeout(
            self.settings.decision_timeout(),
            self.channel
                .collect_raise_amount(player, bounds.min_total, bounds.max_total),
        )
        .await;
        let input = match reply {
            Ok(Some(input)) => input,
            Ok(None) => return self.auto_fold(name, AutoFoldReason::ChannelClosed).await,
            Err(_) => return self.auto_fold(name, AutoFoldReason::Timeout).await,
        };

        match input.trim().parse::<u32>() {
            Ok(total) if (bounds.min_total..=bounds.max_total).contains(&total) => {
                PlayerAction::Raise(total)
            }
            _ => {
                self.auto_fold(name, AutoFoldReason::InvalidRaise(input))
                    .await
            }
        }
    }

    async fn auto_fold(&self, name: &str, reason: AutoFoldReason) -> PlayerAction {
        tracing::info!(session_id = %self.id, name, %reason, "auto-folding seat");
        self.announce(Announcement::AutoFolded {
            name: name.to_string(),
            reason,
        })
        .await;
        PlayerAction::Fold
    }

    async fn publish(&self, engine: &mut Engine, hand: u32) {
        for event in engine.drain_events() {
            let announcement = announcement_for(event, engine.seats(), hand);
            self.announce(announcement).await;
        }
    }

    async fn announce(&self, announcement: Announcement) {
        tracing::debug!(session_id = %self.id, %announcement, "announce");
        self.channel.announce(&announcement).await;
    }

    /// Cashes every seat out and closes the table.
    pub async fn end_session(&mut self) -> Result<SessionSummary, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::NotInProgress);
        }
        Ok(self.finish(EndReason::Closed).await)
    }

    async fn finish(&mut self, reason: EndReason) -> SessionSummary {
        let mut results = Vec::with_capacity(self.seats.len() + self.busted.len());
        let mut failed_cash_outs = Vec::new();

        for seat in &self.seats {
            let bought_in = self.bought_in.get(&seat.id).copied().unwrap_or(0);
            let mut settled = true;
            if !seat.is_bot() && seat.stack > 0 {
                match self.ledger.credit(seat.id, seat.stack).await {
                    Ok(()) => {
                        tracing::info!(
                            session_id = %self.id,
                            player = seat.id,
                            amount = seat.stack,
                            "cashed out"
                        );
                        self.announce(Announcement::CashedOut {
                            name: seat.name.clone(),
                            amount: seat.stack,
                        })
                        .await;
                    }
                    Err(err) => {
                        tracing::error!(
                            session_id = %self.id,
                            player = seat.id,
                            amount = seat.stack,
                            error = %err,
                            "cash-out failed"
                        );
                        self.announce(Announcement::CashOutFailed {
                            name: seat.name.clone(),
                            amount: seat.stack,
                            reason: err.to_string(),
                        })
                        .await;
                        failed_cash_outs.push(CashOutFailure {
                            player: seat.id,
                            amount: seat.stack,
                            error: err.to_string(),
                        });
                        settled = false;
                    }
                }
            }
            results.push(SeatResult {
                player: seat.id,
                name: seat.name.clone(),
                bot: seat.is_bot(),
                bought_in,
                final_stack: seat.stack,
                settled,
            });
        }
        for seat in &self.busted {
            results.push(SeatResult {
                player: seat.id,
                name: seat.name.clone(),
                bot: seat.is_bot(),
                bought_in: self.bought_in.get(&seat.id).copied().unwrap_or(0),
                final_stack: 0,
                settled: true,
            });
        }

        self.state = SessionState::Ended;
        tracing::info!(
            session_id = %self.id,
            hands = self.hands_played,
            ?reason,
            failed = failed_cash_outs.len(),
            "session ended"
        );
        self.announce(Announcement::SessionEnded {
            hands: self.hands_played,
        })
        .await;
        self.channel.teardown().await;

        SessionSummary {
            session_id: self.id,
            channel_id: self.channel_id.clone(),
            hands_played: self.hands_played,
            reason,
            started_at: self.started_at,
            ended_at: Utc::now(),
            results,
            failed_cash_outs,
        }
    }
}

fn announcement_for(event: TableEvent, seats: &[Seat], hand: u32) -> Announcement {
    let name = |i: usize| seats.get(i).map(|s| s.name.clone()).unwrap_or_default();
    match event {
        TableEvent::HandStarted {
            dealer,
            small_blind,
            big_blind,
        } => Announcement::HandStarted {
            hand,
            dealer: name(dealer),
            small_blind: name(small_blind),
            big_blind: name(big_blind),
        },
        TableEvent::BlindPosted {
            seat,
            kind,
            amount,
            all_in,
        } => Announcement::BlindPosted {
            name: name(seat),
            amount,
            big: kind == BlindKind::Big,
            all_in,
        },
        TableEvent::Folded { seat } => Announcement::Folded { name: name(seat) },
        TableEvent::Checked { seat } => Announcement::Checked { name: name(seat) },
        TableEvent::Called {
            seat,
            amount,
            all_in,
        } => Announcement::Called {
            name: name(seat),
            amount,
            all_in,
        },
        TableEvent::Raised { seat, to, all_in } => Announcement::Raised {
            name: name(seat),
            to,
            all_in,
        },
        TableEvent::StreetDealt { street, board, .. } => {
            Announcement::StreetDealt { street, board }
        }
        TableEvent::RunOut => Announcement::RunOut,
        TableEvent::ShowdownReveal { seat, cards, hand } => Announcement::ShowdownReveal {
            name: name(seat),
            cards,
            hand: hand.describe(),
        },
        TableEvent::PotAwarded {
            seat,
            amount,
            pot,
            hand,
        } => Announcement::PotAwarded {
            name: name(seat),
            amount,
            side_pot: pot > 0,
            hand,
        },
        TableEvent::WonUncontested { seat, amount } => Announcement::WonUncontested {
            name: name(seat),
            amount,
        },
    }
}
