mod common;

use std::sync::Arc;

use common::*;
use holdem_engine::player::Difficulty;
use holdem_table::{
    ActionChoice as C, Announcement, AutoFoldReason, EndReason, GameSession, MemoryLedger,
    SessionState, TableSettings, TestLogSubscriber,
};
use tracing::Level;

fn bank() -> Arc<MemoryLedger> {
    Arc::new(MemoryLedger::with_balances([(ANN, 5000), (BOB, 5000), (CAT, 10)]))
}

#[tokio::test]
async fn checked_down_hand_pays_the_aces_and_settles_once() {
    let ledger = bank();
    let channel = ScriptedChannel::new();
    channel.acts(ANN, &[C::Call, C::Check, C::Check, C::Check]);
    channel.acts(BOB, &[C::Check, C::Check, C::Check, C::Check]);
    let mut session = heads_up(quick_settings(Some(1)), ledger.clone(), channel.clone(), ACES_OVER_KINGS).await;

    let summary = session.start(ANN).await.unwrap();

    assert_eq!(summary.reason, EndReason::HandLimit);
    assert_eq!(summary.hands_played, 1);
    assert_eq!(summary.result_for(ANN).unwrap().final_stack, 1020);
    assert_eq!(summary.result_for(BOB).unwrap().net(), -20);
    assert!(summary.failed_cash_outs.is_empty());
    assert_eq!(ledger.balance(ANN), 5020);
    assert_eq!(ledger.balance(BOB), 4980);
    assert_eq!(session.state(), SessionState::Ended);

    assert_eq!(channel.dealt_to(ANN).len(), 1);
    let announcements = channel.announcements();
    assert!(announcements.contains(&Announcement::PotAwarded {
        name: "ann".into(),
        amount: 40,
        side_pot: false,
        hand: "Pair of Aces".into(),
    }));
    let transcript = channel.transcript();
    assert!(transcript.contains(&"Flop: 2c 7d 9h".to_string()));
    assert!(transcript.contains(&"ann cashes out 1020".to_string()));
    assert_eq!(transcript.last().unwrap(), "The table is closed after 1 hands");
    assert_eq!(channel.teardowns(), 1);
}

#[tokio::test]
async fn all_in_loser_is_eliminated_and_session_ends() {
    let ledger = bank();
    let channel = ScriptedChannel::new();
    channel.acts(ANN, &[C::Raise]);
    channel.raise_input(ANN, "100");
    channel.acts(BOB, &[C::Call]);
    let settings = TableSettings {
        buy_in: 100,
        ..quick_settings(None)
    };
    let mut session = heads_up(settings, ledger.clone(), channel.clone(), ACES_OVER_KINGS).await;

    let summary = session.start(ANN).await.unwrap();

    assert_eq!(summary.reason, EndReason::LastStackStanding);
    assert_eq!(summary.hands_played, 1);
    assert_eq!(summary.result_for(BOB).unwrap().final_stack, 0);
    assert_eq!(ledger.balance(ANN), 5100);
    assert_eq!(ledger.balance(BOB), 4900);
    let transcript = channel.transcript();
    assert!(transcript.contains(&"ann is all-in for 100".to_string()));
    assert!(transcript.contains(&"bob is out of chips".to_string()));
    assert!(transcript.contains(&"All players are all-in; running out the board".to_string()));
}

#[tokio::test(start_paused = true)]
async fn silent_player_is_folded_after_the_timeout() {
    let ledger = bank();
    let channel = ScriptedChannel::new();
    channel.script(ANN, [Reply::Stall]);
    let mut session = heads_up(quick_settings(Some(1)), ledger.clone(), channel.clone(), ACES_OVER_KINGS).await;

    let summary = session.start(ANN).await.unwrap();

    assert!(channel.announcements().contains(&Announcement::AutoFolded {
        name: "ann".into(),
        reason: AutoFoldReason::Timeout,
    }));
    assert_eq!(summary.result_for(ANN).unwrap().final_stack, 990);
    assert_eq!(summary.result_for(BOB).unwrap().final_stack, 1010);
    assert_eq!(ledger.balance(BOB), 5010);
}

#[tokio::test]
async fn bad_raise_amounts_fold_the_seat() {
    for input in ["5", "lots", "5000"] {
        let channel = ScriptedChannel::new();
        channel.acts(ANN, &[C::Raise]);
        channel.raise_input(ANN, input);
        let mut session = heads_up(quick_settings(Some(1)), bank(), channel.clone(), ACES_OVER_KINGS).await;

        let summary = session.start(ANN).await.unwrap();

        assert!(
            channel.announcements().contains(&Announcement::AutoFolded {
                name: "ann".into(),
                reason: AutoFoldReason::InvalidRaise(input.to_string()),
            }),
            "{input} was accepted"
        );
        assert_eq!(summary.result_for(ANN).unwrap().final_stack, 990);
    }
}

#[tokio::test]
async fn raise_then_fold_wins_the_blinds() {
    let channel = ScriptedChannel::new();
    channel.acts(ANN, &[C::Raise]);
    channel.raise_input(ANN, " 60 ");
    channel.acts(BOB, &[C::Fold]);
    let mut session = heads_up(quick_settings(Some(1)), bank(), channel.clone(), ACES_OVER_KINGS).await;

    let summary = session.start(ANN).await.unwrap();

    assert_eq!(summary.result_for(ANN).unwrap().final_stack, 1020);
    let transcript = channel.transcript();
    assert!(transcript.contains(&"ann raises to 60".to_string()));
    assert!(transcript.contains(&"ann wins 80 uncontested".to_string()));
}

#[tokio::test]
async fn check_facing_a_bet_is_an_illegal_choice() {
    let channel = ScriptedChannel::new();
    channel.acts(ANN, &[C::Check]);
    let mut session = heads_up(quick_settings(Some(1)), bank(), channel.clone(), ACES_OVER_KINGS).await;

    session.start(ANN).await.unwrap();

    assert!(channel.announcements().contains(&Announcement::AutoFolded {
        name: "ann".into(),
        reason: AutoFoldReason::IllegalChoice,
    }));
}

#[tokio::test]
async fn failed_buy_in_drops_only_that_seat() {
    let ledger = bank();
    let channel = ScriptedChannel::new();
    channel.acts(ANN, &[C::Fold]);
    let mut session = heads_up(quick_settings(Some(1)), ledger.clone(), channel.clone(), ACES_OVER_KINGS).await;
    session.join(CAT, "cat").await.unwrap();

    let summary = session.start(ANN).await.unwrap();

    assert_eq!(summary.hands_played, 1);
    assert!(summary.result_for(CAT).is_none());
    assert_eq!(ledger.balance(CAT), 10);
    assert!(channel
        .transcript()
        .iter()
        .any(|line| line.starts_with("cat could not buy in")));
    // ann and bob were both charged and paid back
    assert_eq!(ledger.balance(ANN) + ledger.balance(BOB), 10_000);
}

#[tokio::test]
async fn too_few_buy_ins_refunds_everyone() {
    let ledger = Arc::new(MemoryLedger::with_balances([(ANN, 5000), (BOB, 100)]));
    let channel = ScriptedChannel::new();
    let mut session = heads_up(quick_settings(None), ledger.clone(), channel.clone(), ACES_OVER_KINGS).await;

    let summary = session.start(ANN).await.unwrap();

    assert_eq!(summary.reason, EndReason::NotEnoughBuyIns);
    assert_eq!(summary.hands_played, 0);
    assert_eq!(ledger.balance(ANN), 5000);
    assert_eq!(ledger.balance(BOB), 100);
    assert!(channel.announcements().contains(&Announcement::SessionAborted));
    assert!(!channel
        .announcements()
        .iter()
        .any(|a| matches!(a, Announcement::HandStarted { .. })));
    assert_eq!(channel.teardowns(), 1);
}

#[tokio::test]
async fn failed_cash_out_is_logged_and_does_not_block_others() {
    let logs = TestLogSubscriber::new();
    let _guard = logs.install();
    let ledger = Arc::new(FlakyLedger::new(&[(ANN, 5000), (BOB, 5000)], &[ANN]));
    let channel = ScriptedChannel::new();
    channel.acts(ANN, &[C::Fold]);
    let mut session = heads_up(quick_settings(Some(1)), ledger.clone(), channel.clone(), ACES_OVER_KINGS).await;

    let summary = session.start(ANN).await.unwrap();

    assert_eq!(summary.failed_cash_outs.len(), 1);
    assert_eq!(summary.failed_cash_outs[0].player, ANN);
    assert_eq!(summary.failed_cash_outs[0].amount, 990);
    assert!(!summary.result_for(ANN).unwrap().settled);
    assert!(summary.result_for(BOB).unwrap().settled);
    assert_eq!(ledger.inner.balance(BOB), 5010);
    assert_eq!(ledger.inner.balance(ANN), 4000);

    let errors = logs.at_level(Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "cash-out failed");
    assert_eq!(errors[0].field("player"), Some("1"));
    assert!(channel
        .transcript()
        .contains(&"Could not return 990 chips to ann: Ledger unavailable: bank offline".to_string()));
    assert_eq!(channel.teardowns(), 1);
}

#[tokio::test]
async fn bot_table_conserves_chips_without_touching_the_ledger() {
    let ledger = bank();
    let channel = ScriptedChannel::new();
    let mut session =
        GameSession::new("bots", ANN, quick_settings(Some(40)), ledger.clone(), channel.clone())
            .unwrap()
            .with_seed(7);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        session.add_bot(difficulty).await.unwrap();
    }

    let summary = session.start(ANN).await.unwrap();

    assert!(summary.hands_played >= 1);
    let chips: u32 = summary.results.iter().map(|r| r.final_stack).sum();
    assert_eq!(chips, 3000);
    assert!(summary.results.iter().all(|r| r.bot && r.settled));
    assert_eq!(ledger.total(), 10_010);
    assert!(channel.dealt_to(ANN).is_empty());
}

#[tokio::test]
async fn button_moves_each_hand() {
    let channel = ScriptedChannel::new();
    channel.acts(ANN, &[C::Fold]);
    channel.acts(BOB, &[C::Fold]);
    let mut session = heads_up(quick_settings(Some(2)), bank(), channel.clone(), ACES_OVER_KINGS).await;

    let summary = session.start(ANN).await.unwrap();

    assert_eq!(summary.hands_played, 2);
    let transcript = channel.transcript();
    assert!(transcript.contains(&"Hand #1: ann has the button, ann posts the small blind, bob the big blind".to_string()));
    assert!(transcript.contains(&"Hand #2: bob has the button, bob posts the small blind, ann the big blind".to_string()));
    // each folded their small blind once
    assert_eq!(summary.result_for(ANN).unwrap().final_stack, 1000);
}
