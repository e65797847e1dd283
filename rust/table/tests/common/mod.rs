#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::deck::Deck;
use holdem_engine::player::PlayerId;
use holdem_engine::rules::LegalActions;
use holdem_table::{
    ActionChoice, Announcement, GameSession, Ledger, LedgerError, MemoryLedger, PromptContext,
    TableChannel, TableSettings,
};

pub const ANN: PlayerId = 1;
pub const BOB: PlayerId = 2;
pub const CAT: PlayerId = 3;

/// Heads-up with ann on the button: ann holds the aces, bob the kings.
/// Board: 2c 7d 9h 3s Jc.
pub const ACES_OVER_KINGS: &str = "Ks As Kh Ah 4d 2c 7d 9h 5d 3s 6c Jc";

pub enum Reply {
    Act(ActionChoice),
    /// Never answers
    Stall,
}

#[derive(Default)]
pub struct ScriptedChannel {
    replies: Mutex<HashMap<PlayerId, VecDeque<Reply>>>,
    raises: Mutex<HashMap<PlayerId, VecDeque<String>>>,
    announcements: Mutex<Vec<Announcement>>,
    dealt: Mutex<Vec<(PlayerId, [Card; 2])>>,
    teardowns: AtomicUsize,
}

impl ScriptedChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, player: PlayerId, replies: impl IntoIterator<Item = Reply>) {
        self.replies
            .lock()
            .unwrap()
            .entry(player)
            .or_default()
            .extend(replies);
    }

    pub fn acts(&self, player: PlayerId, choices: &[ActionChoice]) {
        self.script(player, choices.iter().map(|c| Reply::Act(*c)));
    }

    pub fn raise_input(&self, player: PlayerId, input: &str) {
        self.raises
            .lock()
            .unwrap()
            .entry(player)
            .or_default()
            .push_back(input.to_string());
    }

    pub fn announcements(&self) -> Vec<Announcement> {
        self.announcements.lock().unwrap().clone()
    }

    pub fn transcript(&self) -> Vec<String> {
        self.announcements().iter().map(|a| a.to_string()).collect()
    }

    pub fn dealt_to(&self, player: PlayerId) -> Vec<[Card; 2]> {
        self.dealt
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|(_, cards)| *cards)
            .collect()
    }

    pub fn teardowns(&self) -> usize {
        self.teardowns.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TableChannel for ScriptedChannel {
    async fn prompt_action(
        &self,
        player: PlayerId,
        _legal: &LegalActions,
        _context: &PromptContext,
    ) -> Option<ActionChoice> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&player)
            .and_then(|q| q.pop_front());
        match reply {
            Some(Reply::Act(choice)) => Some(choice),
            Some(Reply::Stall) => std::future::pending().await,
            None => None,
        }
    }

    async fn collect_raise_amount(&self, player: PlayerId, _min: u32, _max: u32) -> Option<String> {
        self.raises
            .lock()
            .unwrap()
            .get_mut(&player)
            .and_then(|q| q.pop_front())
    }

    async fn announce(&self, announcement: &Announcement) {
        self.announcements.lock().unwrap().push(announcement.clone());
    }

    async fn deal_private(&self, player: PlayerId, cards: [Card; 2]) {
        self.dealt.lock().unwrap().push((player, cards));
    }

    async fn teardown(&self) {
        self.teardowns.fetch_add(1, Ordering::SeqCst);
    }
}

/// Memory ledger whose credits fail for chosen players.
pub struct FlakyLedger {
    pub inner: MemoryLedger,
    failing_credits: HashSet<PlayerId>,
}

impl FlakyLedger {
    pub fn new(balances: &[(PlayerId, u64)], failing_credits: &[PlayerId]) -> Self {
        Self {
            inner: MemoryLedger::with_balances(balances.iter().copied()),
            failing_credits: failing_credits.iter().copied().collect(),
        }
    }
}

#[async_trait]
impl Ledger for FlakyLedger {
    async fn debit(&self, player: PlayerId, amount: u32) -> Result<(), LedgerError> {
        self.inner.debit(player, amount).await
    }

    async fn credit(&self, player: PlayerId, amount: u32) -> Result<(), LedgerError> {
        if self.failing_credits.contains(&player) {
            return Err(LedgerError::Unavailable("bank offline".to_string()));
        }
        self.inner.credit(player, amount).await
    }
}

pub fn quick_settings(hand_limit: Option<u32>) -> TableSettings {
    TableSettings {
        bot_think_ms: 0,
        decision_timeout_secs: 30,
        hand_limit,
        ..Default::default()
    }
}

pub fn stacked(cards: &str) -> Deck {
    Deck::stacked(&parse_cards(cards).unwrap()).unwrap()
}

/// Lobby with ann (host, on the button) and bob seated, dealing `cards` every hand.
pub async fn heads_up(
    settings: TableSettings,
    ledger: Arc<dyn Ledger>,
    channel: Arc<ScriptedChannel>,
    cards: &'static str,
) -> GameSession {
    let mut session = GameSession::new("poker", ANN, settings, ledger, channel)
        .unwrap()
        .with_decks(move |_| stacked(cards));
    session.join(ANN, "ann").await.unwrap();
    session.join(BOB, "bob").await.unwrap();
    session
}
