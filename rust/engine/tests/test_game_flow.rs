use holdem_engine::cards::parse_cards;
use holdem_engine::deck::Deck;
use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::events::TableEvent;
use holdem_engine::logger::Street;
use holdem_engine::player::{PlayerAction as A, Seat};
use holdem_engine::rules::Blinds;

fn seats(stacks: &[u32]) -> Vec<Seat> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, &stack)| Seat::human(100 + i as u64, format!("p{i}"), stack))
        .collect()
}

fn stacked(cards: &str) -> Deck {
    Deck::stacked(&parse_cards(cards).unwrap()).unwrap()
}

fn chips_on_table(engine: &Engine) -> u32 {
    engine.pot() + engine.seats().iter().map(|s| s.stack).sum::<u32>()
}

fn act(engine: &mut Engine, action: A) {
    let seat = engine.current_seat().expect("someone to act");
    engine.apply_action(seat, action).expect("legal action");
}

#[test]
fn scenario_call_and_check_down_aces_beat_kings() {
    // deal order is left of the dealer first: B, A, B, A, then burn/flop/burn/turn/burn/river
    let deck = stacked("Ks As Kh Ah 4d 2c 7d 9h 5d 3s 6c Jc");
    let mut engine = Engine::start_hand(seats(&[1000, 1000]), 0, Blinds::new(10, 20), deck).unwrap();

    assert_eq!(engine.current_seat(), Some(0));
    act(&mut engine, A::Call);
    assert_eq!(engine.current_seat(), Some(1));
    act(&mut engine, A::Check);
    assert_eq!(engine.street(), Street::Flop);

    for _ in 0..3 {
        // post-flop the big blind acts first heads-up
        assert_eq!(engine.current_seat(), Some(1));
        act(&mut engine, A::Check);
        act(&mut engine, A::Check);
    }

    assert!(engine.is_complete());
    assert_eq!(engine.street(), Street::Showdown);
    assert_eq!(engine.board().len(), 5);
    assert_eq!(engine.seats()[0].stack, 1020);
    assert_eq!(engine.seats()[1].stack, 980);
    assert_eq!(engine.pot(), 0);

    let outcome = engine.outcome().unwrap();
    assert!(outcome.went_to_showdown);
    assert_eq!(outcome.winners(), vec![0]);
}

#[test]
fn scenario_short_stack_calls_all_in_and_board_runs_out() {
    let deck = stacked("Ks As Kh Ad 4d 2c 7d Kc 5d 3s 6c Jh");
    let mut engine = Engine::start_hand(seats(&[1000, 50]), 0, Blinds::new(10, 20), deck).unwrap();

    let legal = engine.legal_actions(0).unwrap();
    assert_eq!(legal.raise.unwrap().min_total, 40);
    act(&mut engine, A::Raise(60));
    act(&mut engine, A::Call);

    assert!(engine.is_complete());
    assert_eq!(engine.current_seat(), None);
    let events = engine.drain_events();
    assert!(events.contains(&TableEvent::Called {
        seat: 1,
        amount: 30,
        all_in: true
    }));
    assert_eq!(events.iter().filter(|e| **e == TableEvent::RunOut).count(), 1);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, TableEvent::StreetDealt { .. }))
            .count(),
        3
    );

    // trip kings take the 100 main pot; the unmatched 10 goes back to seat 0
    assert_eq!(engine.seats()[1].stack, 100);
    assert_eq!(engine.seats()[0].stack, 950);
}

#[test]
fn betting_round_advances_exactly_once() {
    let mut engine = Engine::start_hand(
        seats(&[500, 500, 500]),
        0,
        Blinds::new(5, 10),
        Deck::new_with_seed(11),
    )
    .unwrap();
    engine.drain_events();

    act(&mut engine, A::Call);
    act(&mut engine, A::Call);
    // big blind still has the option
    assert_eq!(engine.street(), Street::Preflop);
    assert_eq!(engine.current_seat(), Some(2));
    act(&mut engine, A::Check);

    assert_eq!(engine.street(), Street::Flop);
    assert_eq!(engine.board().len(), 3);
    assert_eq!(engine.current_bet(), 0);
    assert_eq!(engine.current_seat(), Some(1));
    let dealt = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, TableEvent::StreetDealt { .. }))
        .count();
    assert_eq!(dealt, 1);
}

#[test]
fn raise_reopens_action_for_players_who_already_acted() {
    let mut engine = Engine::start_hand(
        seats(&[500, 500, 500]),
        0,
        Blinds::new(5, 10),
        Deck::new_with_seed(5),
    )
    .unwrap();
    act(&mut engine, A::Call); // seat 0
    act(&mut engine, A::Call); // seat 1
    act(&mut engine, A::Raise(40)); // big blind
    assert_eq!(engine.last_aggressor(), Some(2));
    assert_eq!(engine.current_seat(), Some(0));
    act(&mut engine, A::Call);
    assert_eq!(engine.current_seat(), Some(1));
    act(&mut engine, A::Fold);
    assert_eq!(engine.street(), Street::Flop);
    assert_eq!(engine.pot(), 90);
}

#[test]
fn everyone_folding_awards_pot_without_showdown() {
    let mut engine = Engine::start_hand(
        seats(&[500, 500, 500]),
        1,
        Blinds::new(5, 10),
        Deck::new_with_seed(2),
    )
    .unwrap();
    act(&mut engine, A::Raise(30));
    act(&mut engine, A::Fold);
    act(&mut engine, A::Fold);

    assert!(engine.is_complete());
    let outcome = engine.outcome().unwrap();
    assert!(!outcome.went_to_showdown);
    assert_eq!(outcome.pot, 45);
    assert_eq!(engine.board().len(), 0);
    assert!(!engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, TableEvent::ShowdownReveal { .. })));
    assert_eq!(engine.seats()[1].stack, 515);

    assert_eq!(
        engine.apply_action(0, A::Check),
        Err(GameError::HandAlreadyComplete)
    );
}

#[test]
fn side_pots_pay_each_layer_to_its_best_hand() {
    // deal order from dealer 0: seats 1, 2, 0
    let deck = stacked("Ks Qs As Kd Qd Ad 4s 2c 7h 9c 5s 3h 6h Jd");
    let mut engine =
        Engine::start_hand(seats(&[100, 300, 300]), 0, Blinds::new(10, 20), deck).unwrap();

    act(&mut engine, A::Raise(100)); // seat 0 all in
    act(&mut engine, A::Raise(300)); // seat 1 all in
    act(&mut engine, A::Call); // seat 2 all in

    assert!(engine.is_complete());
    assert_eq!(engine.seats()[0].stack, 300);
    assert_eq!(engine.seats()[1].stack, 400);
    assert_eq!(engine.seats()[2].stack, 0);

    let pots: Vec<usize> = engine
        .outcome()
        .unwrap()
        .payouts
        .iter()
        .map(|p| p.pot)
        .collect();
    assert_eq!(pots, vec![0, 1]);
}

#[test]
fn odd_chip_goes_to_first_winner_left_of_dealer() {
    // the board plays a royal flush for everyone
    let deck = stacked("4c 2d 2h 5c 3d 3h 9h Ts Js Qs 8h Ks 7h As");
    let mut engine =
        Engine::start_hand(seats(&[1000, 1000, 1000]), 0, Blinds::new(5, 10), deck).unwrap();

    act(&mut engine, A::Call); // seat 0
    act(&mut engine, A::Fold); // seat 1
    act(&mut engine, A::Check); // seat 2
    while !engine.is_complete() {
        act(&mut engine, A::Check);
    }

    assert_eq!(engine.outcome().unwrap().pot, 25);
    assert_eq!(engine.seats()[2].stack, 1003);
    assert_eq!(engine.seats()[0].stack, 1002);
    assert_eq!(engine.seats()[1].stack, 995);
}

#[test]
fn chips_are_conserved_through_a_hand() {
    for seed in 0..25u64 {
        let mut engine = Engine::start_hand(
            seats(&[400, 250, 900, 60]),
            (seed % 4) as usize,
            Blinds::new(10, 20),
            Deck::new_with_seed(seed),
        )
        .unwrap();
        let total = 400 + 250 + 900 + 60;
        let mut step = seed;
        while let Some(seat) = engine.current_seat() {
            let legal = engine.legal_actions(seat).unwrap();
            let action = match (step % 5, legal.raise) {
                (0, Some(bounds)) => A::Raise(bounds.min_total),
                (1, _) if legal.call.is_some() => A::Fold,
                (4, Some(bounds)) => A::Raise(bounds.max_total),
                _ if legal.can_check => A::Check,
                _ => A::Call,
            };
            engine.apply_action(seat, action).unwrap();
            assert_eq!(chips_on_table(&engine), total, "seed {seed}");
            step += 1;
        }
        assert!(engine.is_complete());
        assert_eq!(engine.pot(), 0);
        let stacks: u32 = engine.into_seats().iter().map(|s| s.stack).sum();
        assert_eq!(stacks, total);
    }
}

#[test]
fn view_exposes_only_own_hole_cards_and_legal_bounds() {
    let engine = Engine::start_hand(
        seats(&[1000, 1000]),
        1,
        Blinds::new(10, 20),
        Deck::new_with_seed(8),
    )
    .unwrap();
    let seat = engine.current_seat().unwrap();
    let view = engine.view(seat).unwrap();
    assert_eq!(view.hole, engine.seats()[seat].hole_cards().unwrap());
    assert_eq!(view.to_call(), 10);
    assert_eq!(view.pot, 30);
    assert_eq!(view.live_opponents, 1);
    assert_eq!(view.legal.raise.unwrap().min_total, 40);
}

#[test]
fn hand_record_lists_actions_and_winners() {
    let deck = stacked("Ks As Kh Ah 4d 2c 7d 9h 5d 3s 6c Jc");
    let mut engine = Engine::start_hand_seeded(
        seats(&[1000, 1000]),
        0,
        Blinds::new(10, 20),
        deck,
        Some(99),
    )
    .unwrap();
    act(&mut engine, A::Call);
    while !engine.is_complete() {
        act(&mut engine, A::Check);
    }
    let record = engine.hand_record("20250101-000001");
    assert_eq!(record.seed, Some(99));
    assert_eq!(record.actions.len(), 8);
    assert_eq!(record.actions[0].amount, 10);
    assert_eq!(record.pot, 40);
    assert_eq!(record.board.len(), 5);
    let showdown = record.showdown.unwrap();
    assert_eq!(showdown.winners, vec![100]);
    assert_eq!(showdown.notes.as_deref(), Some("Pair of Aces"));
}

#[test]
fn stacks_that_overflow_a_pot_are_refused() {
    let result = Engine::start_hand(
        seats(&[3_000_000_000, 3_000_000_000]),
        0,
        Blinds::new(10, 20),
        Deck::new_with_seed(1),
    );
    assert_eq!(result.err(), Some(GameError::TooManyChips(6_000_000_000)));

    let engine = Engine::start_hand(
        seats(&[u32::MAX / 2, u32::MAX / 2]),
        0,
        Blinds::new(10, 20),
        Deck::new_with_seed(1),
    );
    assert!(engine.is_ok());
}

#[test]
fn short_all_in_does_not_reopen_raising() {
    // dealer 0, blinds on seats 1 and 2, seat 3 acts first
    let mut engine = Engine::start_hand(
        seats(&[30, 1000, 1000, 1000]),
        0,
        Blinds::new(10, 20),
        Deck::new_with_seed(3),
    )
    .unwrap();
    act(&mut engine, A::Call); // seat 3 calls 20
    act(&mut engine, A::Raise(30)); // seat 0 all in, short of the 40 minimum
    assert_eq!(engine.last_aggressor(), None);

    // the blinds have not acted yet and may still raise
    assert_eq!(engine.current_seat(), Some(1));
    assert!(engine.legal_actions(1).unwrap().raise.is_some());
    act(&mut engine, A::Call);
    act(&mut engine, A::Call);

    // seat 3 already acted and only faces the short all-in
    assert_eq!(engine.current_seat(), Some(3));
    let legal = engine.view(3).unwrap().legal;
    assert_eq!(legal.call, Some(10));
    assert!(legal.raise.is_none());
    assert_eq!(
        engine.apply_action(3, A::Raise(100)),
        Err(GameError::RaiseNotAllowed)
    );
    act(&mut engine, A::Call);
    assert_eq!(engine.street(), Street::Flop);
    assert_eq!(engine.pot(), 120);
}

#[test]
fn hand_record_notes_every_pot_winner() {
    let deck = stacked("Ks Qs As Kd Qd Ad 4s 2c 7h 9c 5s 3h 6h Jd");
    let mut engine =
        Engine::start_hand(seats(&[100, 300, 300]), 0, Blinds::new(10, 20), deck).unwrap();
    act(&mut engine, A::Raise(100));
    act(&mut engine, A::Raise(300));
    act(&mut engine, A::Call);

    let showdown = engine.hand_record("20250101-000002").showdown.unwrap();
    assert_eq!(showdown.winners, vec![100, 101]);
    assert_eq!(
        showdown.notes.as_deref(),
        Some("main pot: Pair of Aces; side pot 1: Pair of Kings")
    );
}
