use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{BlindKind, TableEvent};
use crate::game::{clockwise_from, Positions};
use crate::hand::{compare_hands, find_best_hand, Hand};
use crate::logger::{ActionRecord, HandRecord, ShowdownInfo, Street};
use crate::player::{PlayerAction, Seat};
use crate::pot::PotManager;
use crate::rules::{
    legal_actions, min_raise_to, validate_action, Blinds, LegalActions, ValidatedAction,
};

/// Read-only picture of the table from one seat's point of view.
///
/// Handed to decision makers by value so they cannot touch engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub street: Street,
    pub board: Vec<Card>,
    pub pot: u32,
    pub current_bet: u32,
    pub big_blind: u32,
    pub hole: [Card; 2],
    pub stack: u32,
    pub street_bet: u32,
    pub legal: LegalActions,
    pub live_opponents: usize,
}

impl TableView {
    pub fn to_call(&self) -> u32 {
        self.legal.to_call
    }
}

/// Chips paid out of one pot to one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub seat: usize,
    pub amount: u32,
    pub pot: usize,
    pub hand: Option<Hand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandOutcome {
    pub pot: u32,
    pub payouts: Vec<Payout>,
    pub went_to_showdown: bool,
}

impl HandOutcome {
    /// Seats that received chips, in payout order, without duplicates.
    pub fn winners(&self) -> Vec<usize> {
        let mut seats: Vec<usize> = Vec::new();
        for p in &self.payouts {
            if !seats.contains(&p.seat) {
                seats.push(p.seat);
            }
        }
        seats
    }
}

/// Betting state machine for a single hand of Texas Hold'em.
///
/// Drives a hand from the blinds through pre-flop, flop, turn and river to
/// showdown. Chips enter the pot the moment they are bet, so
/// `pot + Σ stack` stays constant for the whole hand. Exactly one seat is
/// active at a time; every state change is queued as a [`TableEvent`] for the
/// caller to drain and announce.
///
/// # Examples
///
/// ```
/// use holdem_engine::deck::Deck;
/// use holdem_engine::engine::Engine;
/// use holdem_engine::player::{PlayerAction, Seat};
/// use holdem_engine::rules::Blinds;
///
/// let seats = vec![Seat::human(1, "ann", 1000), Seat::human(2, "bob", 1000)];
/// let mut engine = Engine::start_hand(seats, 0, Blinds::new(10, 20), Deck::new_with_seed(7))
///     .expect("two funded seats");
/// assert_eq!(engine.pot(), 30);
///
/// // Heads-up, the dealer acts first pre-flop
/// let seat = engine.current_seat().unwrap();
/// engine.apply_action(seat, PlayerAction::Fold).unwrap();
/// assert!(engine.is_complete());
/// assert_eq!(engine.seats()[1].stack, 1010);
/// ```
#[derive(Debug)]
pub struct Engine {
    deck: Deck,
    seed: Option<u64>,
    seats: Vec<Seat>,
    positions: Positions,
    blinds: Blinds,
    board: Vec<Card>,
    street: Street,
    pot: u32,
    current_bet: u32,
    active: Option<usize>,
    last_aggressor: Option<usize>,
    ran_out: bool,
    events: Vec<TableEvent>,
    actions: Vec<ActionRecord>,
    outcome: Option<HandOutcome>,
}

impl Engine {
    /// Shuffles, posts the blinds, deals hole cards and hands the action to
    /// the first seat after the big blind.
    ///
    /// Every seat must have chips; `dealer` indexes into `seats`.
    pub fn start_hand(
        seats: Vec<Seat>,
        dealer: usize,
        blinds: Blinds,
        deck: Deck,
    ) -> Result<Self, GameError> {
        Self::start_hand_seeded(seats, dealer, blinds, deck, None)
    }

    /// Same as [`Engine::start_hand`], recording the deck seed in the hand history.
    pub fn start_hand_seeded(
        mut seats: Vec<Seat>,
        dealer: usize,
        blinds: Blinds,
        mut deck: Deck,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        let funded = seats.iter().filter(|s| s.stack > 0).count();
        if seats.len() < 2 || funded < seats.len() {
            return Err(GameError::NotEnoughPlayers(funded));
        }
        if dealer >= seats.len() {
            return Err(GameError::SeatOutOfRange(dealer));
        }
        let chips: u64 = seats.iter().map(|s| u64::from(s.stack)).sum();
        if chips > u64::from(u32::MAX) {
            return Err(GameError::TooManyChips(chips));
        }

        for seat in seats.iter_mut() {
            seat.reset_for_hand();
        }
        deck.shuffle();

        let positions = Positions::for_table(seats.len(), dealer);
        let mut engine = Self {
            deck,
            seed,
            seats,
            positions,
            blinds,
            board: Vec::with_capacity(5),
            street: Street::Preflop,
            pot: 0,
            current_bet: 0,
            active: None,
            last_aggressor: None,
            ran_out: false,
            events: Vec::new(),
            actions: Vec::new(),
            outcome: None,
        };

        engine.events.push(TableEvent::HandStarted {
            dealer: positions.dealer,
            small_blind: positions.small_blind,
            big_blind: positions.big_blind,
        });
        engine.post_blind(positions.small_blind, BlindKind::Small, blinds.small);
        engine.post_blind(positions.big_blind, BlindKind::Big, blinds.big);
        engine.deal_hole_cards()?;

        match engine.next_to_act(positions.preflop_first) {
            Some(seat) => engine.active = Some(seat),
            None => engine.finish_round()?,
        }
        Ok(engine)
    }

    fn post_blind(&mut self, seat: usize, kind: BlindKind, amount: u32) {
        let posted = self.seats[seat].commit(amount);
        self.pot += posted;
        self.current_bet = self.current_bet.max(self.seats[seat].street_bet);
        self.events.push(TableEvent::BlindPosted {
            seat,
            kind,
            amount: posted,
            all_in: self.seats[seat].all_in,
        });
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        let n = self.seats.len();
        let order: Vec<usize> = clockwise_from(n, self.positions.dealer).collect();
        let mut first = Vec::with_capacity(n);
        for _ in &order {
            first.push(self.deck.draw_one()?);
        }
        for (k, &seat) in order.iter().enumerate() {
            let second = self.deck.draw_one()?;
            self.seats[seat].give_cards([first[k], second]);
        }
        Ok(())
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    pub fn blinds(&self) -> Blinds {
        self.blinds
    }

    pub fn dealer(&self) -> usize {
        self.positions.dealer
    }

    pub fn positions(&self) -> Positions {
        self.positions
    }

    /// Seat whose decision the hand is waiting on.
    pub fn current_seat(&self) -> Option<usize> {
        self.active
    }

    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&HandOutcome> {
        self.outcome.as_ref()
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Takes the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn legal_actions(&self, seat: usize) -> Result<LegalActions, GameError> {
        let s = self.seats.get(seat).ok_or(GameError::SeatOutOfRange(seat))?;
        Ok(self.legal_for(s))
    }

    /// A seat that already acted and faces only a short all-in may call or
    /// fold but not raise.
    fn legal_for(&self, s: &Seat) -> LegalActions {
        let mut legal = legal_actions(s.stack, s.street_bet, self.current_bet, self.blinds.big);
        if self.raise_closed(s) {
            legal.raise = None;
        }
        legal
    }

    fn raise_closed(&self, s: &Seat) -> bool {
        s.acted && s.street_bet < self.current_bet
    }

    pub fn view(&self, seat: usize) -> Option<TableView> {
        let s = self.seats.get(seat)?;
        let hole = s.hole_cards()?;
        Some(TableView {
            street: self.street,
            board: self.board.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            big_blind: self.blinds.big,
            hole,
            stack: s.stack,
            street_bet: s.street_bet,
            legal: self.legal_for(s),
            live_opponents: self
                .seats
                .iter()
                .enumerate()
                .filter(|(i, o)| *i != seat && o.is_live())
                .count(),
        })
    }

    /// Applies the active seat's action and moves the hand forward.
    ///
    /// Illegal actions are rejected with a [`GameError`] and leave the hand
    /// untouched. When the action closes the betting round the next street is
    /// dealt; when it leaves a single live seat, or the river round closes,
    /// the pot is paid out before returning.
    pub fn apply_action(&mut self, seat: usize, action: PlayerAction) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Err(GameError::HandAlreadyComplete);
        }
        if seat >= self.seats.len() {
            return Err(GameError::SeatOutOfRange(seat));
        }
        if self.active != Some(seat) {
            return Err(GameError::NotPlayersTurn {
                expected: self.active,
                actual: seat,
            });
        }

        let s = &self.seats[seat];
        if s.folded {
            return Err(GameError::PlayerAlreadyFolded);
        }
        if matches!(action, PlayerAction::Raise(_)) && self.raise_closed(s) {
            return Err(GameError::RaiseNotAllowed);
        }
        let validated = validate_action(
            s.stack,
            s.street_bet,
            self.current_bet,
            self.blinds.big,
            action,
        )?;

        let moved = match validated {
            ValidatedAction::Fold => {
                self.seats[seat].folded = true;
                self.events.push(TableEvent::Folded { seat });
                0
            }
            ValidatedAction::Check => {
                self.events.push(TableEvent::Checked { seat });
                0
            }
            ValidatedAction::Call(chips) => {
                let moved = self.commit(seat, chips);
                self.events.push(TableEvent::Called {
                    seat,
                    amount: moved,
                    all_in: self.seats[seat].all_in,
                });
                moved
            }
            ValidatedAction::Raise(total) => {
                let moved = self.commit(seat, total - self.seats[seat].street_bet);
                self.raise_to(seat, total);
                self.events.push(TableEvent::Raised {
                    seat,
                    to: total,
                    all_in: self.seats[seat].all_in,
                });
                moved
            }
            ValidatedAction::AllIn(total) => {
                let stack = self.seats[seat].stack;
                let full_raise = min_raise_to(self.current_bet, self.blinds.big);
                let moved = self.commit(seat, stack);
                if total >= full_raise {
                    self.raise_to(seat, total);
                    self.events.push(TableEvent::Raised {
                        seat,
                        to: total,
                        all_in: true,
                    });
                } else if total > self.current_bet {
                    // short all-in: the bet goes up but the action is not re-opened
                    self.current_bet = total;
                    self.events.push(TableEvent::Raised {
                        seat,
                        to: total,
                        all_in: true,
                    });
                } else {
                    self.events.push(TableEvent::Called {
                        seat,
                        amount: moved,
                        all_in: true,
                    });
                }
                moved
            }
        };
        self.seats[seat].acted = true;
        self.actions.push(ActionRecord {
            player_id: self.seats[seat].id,
            street: self.street,
            action,
            amount: moved,
        });

        self.advance_from(seat)
    }

    fn commit(&mut self, seat: usize, chips: u32) -> u32 {
        let moved = self.seats[seat].commit(chips);
        self.pot += moved;
        moved
    }

    /// Sets a new bet to match and re-opens the action for everyone else.
    fn raise_to(&mut self, seat: usize, total: u32) {
        self.current_bet = total;
        self.last_aggressor = Some(seat);
        for (i, other) in self.seats.iter_mut().enumerate() {
            if i != seat {
                other.acted = false;
            }
        }
    }

    fn needs_action(&self, seat: usize) -> bool {
        let s = &self.seats[seat];
        if !s.can_act() {
            return false;
        }
        if s.street_bet < self.current_bet {
            return true;
        }
        let others_can_act = self
            .seats
            .iter()
            .enumerate()
            .any(|(i, o)| i != seat && o.can_act());
        !s.acted && others_can_act
    }

    /// First seat at or after `start`, clockwise, that still owes a decision.
    fn next_to_act(&self, start: usize) -> Option<usize> {
        let n = self.seats.len();
        (0..n)
            .map(|k| (start + k) % n)
            .find(|&i| self.needs_action(i))
    }

    fn advance_from(&mut self, seat: usize) -> Result<(), GameError> {
        let live: Vec<usize> = (0..self.seats.len())
            .filter(|&i| self.seats[i].is_live())
            .collect();
        if let [winner] = live.as_slice() {
            self.award_uncontested(*winner);
            return Ok(());
        }

        match self.next_to_act(seat + 1) {
            Some(next) => {
                self.active = Some(next);
                Ok(())
            }
            None => self.finish_round(),
        }
    }

    /// Closes the current betting round and deals on until someone has a
    /// decision to make or the hand reaches showdown.
    fn finish_round(&mut self) -> Result<(), GameError> {
        self.active = None;
        loop {
            if self.street == Street::River {
                return self.showdown();
            }
            let run_out = self.seats.iter().filter(|s| s.can_act()).count() <= 1;
            if run_out && !self.ran_out {
                self.ran_out = true;
                self.events.push(TableEvent::RunOut);
            }
            self.deal_street()?;
            if !run_out {
                if let Some(next) = self.next_to_act(self.positions.postflop_first) {
                    self.active = Some(next);
                    return Ok(());
                }
            }
        }
    }

    fn deal_street(&mut self) -> Result<(), GameError> {
        let street = self.street.next();
        self.deck.burn()?;
        let cards = self.deck.draw(street.cards_dealt())?;
        self.board.extend_from_slice(&cards);
        self.street = street;
        self.current_bet = 0;
        self.last_aggressor = None;
        for seat in self.seats.iter_mut() {
            seat.reset_for_street();
        }
        self.events.push(TableEvent::StreetDealt {
            street,
            cards,
            board: self.board.clone(),
        });
        Ok(())
    }

    fn award_uncontested(&mut self, winner: usize) {
        let amount = std::mem::take(&mut self.pot);
        self.seats[winner].add_chips(amount);
        self.active = None;
        self.events.push(TableEvent::WonUncontested {
            seat: winner,
            amount,
        });
        self.outcome = Some(HandOutcome {
            pot: amount,
            payouts: vec![Payout {
                seat: winner,
                amount,
                pot: 0,
                hand: None,
            }],
            went_to_showdown: false,
        });
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        self.street = Street::Showdown;
        self.active = None;

        let n = self.seats.len();
        let order: Vec<usize> = clockwise_from(n, self.positions.dealer).collect();
        let mut hands: Vec<Option<Hand>> = vec![None; n];
        for &i in &order {
            let seat = &self.seats[i];
            if !seat.is_live() {
                continue;
            }
            let Some(hole) = seat.hole_cards() else {
                continue;
            };
            let mut cards = Vec::with_capacity(7);
            cards.extend_from_slice(&hole);
            cards.extend_from_slice(&self.board);
            let hand = find_best_hand(&cards)?;
            self.events.push(TableEvent::ShowdownReveal {
                seat: i,
                cards: hole,
                hand: hand.clone(),
            });
            hands[i] = Some(hand);
        }

        let pots = PotManager::from_seats(&self.seats);
        let mut payouts = Vec::new();
        for (pot_index, pot) in pots.pots().iter().enumerate() {
            // eligible seats in clockwise order from the dealer's left
            let contenders: Vec<usize> = order
                .iter()
                .copied()
                .filter(|i| pot.eligible.contains(i) && hands[*i].is_some())
                .collect();
            let mut winners: Vec<usize> = Vec::new();
            for &i in &contenders {
                let (Some(hand), Some(best)) = (&hands[i], winners.first().and_then(|w| hands[*w].as_ref()))
                else {
                    winners.push(i);
                    continue;
                };
                match compare_hands(hand, best) {
                    std::cmp::Ordering::Greater => winners = vec![i],
                    std::cmp::Ordering::Equal => winners.push(i),
                    std::cmp::Ordering::Less => {}
                }
            }
            if winners.is_empty() {
                continue;
            }

            let share = pot.amount / winners.len() as u32;
            let odd = (pot.amount % winners.len() as u32) as usize;
            for (k, &w) in winners.iter().enumerate() {
                let amount = share + u32::from(k < odd);
                self.seats[w].add_chips(amount);
                let hand = hands[w].clone();
                self.events.push(TableEvent::PotAwarded {
                    seat: w,
                    amount,
                    pot: pot_index,
                    hand: hand.as_ref().map(Hand::describe).unwrap_or_default(),
                });
                payouts.push(Payout {
                    seat: w,
                    amount,
                    pot: pot_index,
                    hand,
                });
            }
        }

        let total = std::mem::take(&mut self.pot);
        self.outcome = Some(HandOutcome {
            pot: total,
            payouts,
            went_to_showdown: true,
        });
        Ok(())
    }

    /// History record of the hand so far.
    pub fn hand_record(&self, hand_id: impl Into<String>) -> HandRecord {
        let (result, showdown, pot) = match &self.outcome {
            Some(outcome) => {
                let winners: Vec<u64> = outcome
                    .winners()
                    .into_iter()
                    .map(|i| self.seats[i].id)
                    .collect();
                let names: Vec<&str> = outcome
                    .winners()
                    .into_iter()
                    .map(|i| self.seats[i].name.as_str())
                    .collect();
                let showdown = outcome.went_to_showdown.then(|| ShowdownInfo {
                    winners: winners.clone(),
                    notes: showdown_notes(&outcome.payouts),
                });
                (
                    Some(format!("{} won {}", names.join(", "), outcome.pot)),
                    showdown,
                    outcome.pot,
                )
            }
            None => (None, None, self.pot),
        };
        HandRecord {
            hand_id: hand_id.into(),
            seed: self.seed,
            actions: self.actions.clone(),
            board: self.board.clone(),
            pot,
            result,
            ts: None,
            meta: Some(serde_json::json!({
                "dealer": self.seats[self.positions.dealer].id,
                "blinds": [self.blinds.small, self.blinds.big],
                "seats": self.seats.iter().map(|s| s.id).collect::<Vec<_>>(),
            })),
            showdown,
        }
    }

    /// Ends the engine's ownership of the seats, clearing per-hand state.
    pub fn into_seats(self) -> Vec<Seat> {
        let mut seats = self.seats;
        for seat in seats.iter_mut() {
            seat.reset_for_hand();
        }
        seats
    }
}

/// "Pair of Aces", "split pot: Flush, King high", or one entry per pot
/// ("main pot: ...; side pot 1: ...") when side pots were paid.
fn showdown_notes(payouts: &[Payout]) -> Option<String> {
    let mut pots: Vec<(usize, usize, &Hand)> = Vec::new();
    for p in payouts {
        let Some(hand) = p.hand.as_ref() else {
            continue;
        };
        match pots.iter_mut().find(|(pot, _, _)| *pot == p.pot) {
            Some((_, winners, _)) => *winners += 1,
            None => pots.push((p.pot, 1, hand)),
        }
    }
    let describe = |winners: usize, hand: &Hand| {
        if winners > 1 {
            format!("split pot: {}", hand.describe())
        } else {
            hand.describe()
        }
    };
    match pots.as_slice() {
        [] => None,
        [(_, winners, hand)] => Some(describe(*winners, *hand)),
        _ => Some(
            pots.iter()
                .map(|(pot, winners, hand)| {
                    let label = match *pot {
                        0 => "main pot".to_string(),
                        n => format!("side pot {n}"),
                    };
                    format!("{label}: {}", describe(*winners, *hand))
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(stacks: &[u32]) -> Vec<Seat> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &s)| Seat::human(i as u64 + 1, format!("p{i}"), s))
            .collect()
    }

    #[test]
    fn rejects_out_of_turn_action() {
        let mut engine =
            Engine::start_hand(table(&[500, 500, 500]), 0, Blinds::new(5, 10), Deck::new_with_seed(1))
                .unwrap();
        // dealer 0, SB 1, BB 2 -> seat 0 opens
        assert_eq!(engine.current_seat(), Some(0));
        let err = engine.apply_action(1, PlayerAction::Fold).unwrap_err();
        assert_eq!(
            err,
            GameError::NotPlayersTurn {
                expected: Some(0),
                actual: 1
            }
        );
    }

    #[test]
    fn illegal_check_leaves_state_untouched() {
        let mut engine =
            Engine::start_hand(table(&[500, 500]), 0, Blinds::new(5, 10), Deck::new_with_seed(1))
                .unwrap();
        let pot = engine.pot();
        assert!(matches!(
            engine.apply_action(0, PlayerAction::Check),
            Err(GameError::CannotCheck { to_call: 5 })
        ));
        assert_eq!(engine.pot(), pot);
        assert_eq!(engine.current_seat(), Some(0));
    }

    #[test]
    fn requires_every_seat_funded() {
        let err = Engine::start_hand(table(&[500, 0, 500]), 0, Blinds::new(5, 10), Deck::new())
            .unwrap_err();
        assert_eq!(err, GameError::NotEnoughPlayers(2));
    }

    #[test]
    fn short_big_blind_forces_all_in() {
        let engine =
            Engine::start_hand(table(&[500, 500, 15]), 0, Blinds::new(10, 20), Deck::new_with_seed(3))
                .unwrap();
        assert!(engine.seats()[2].all_in);
        assert_eq!(engine.current_bet(), 15);
        assert_eq!(engine.pot(), 25);
    }
}
