//! Terminal implementations of [`TableChannel`].

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use holdem_engine::cards::Card;
use holdem_engine::player::PlayerId;
use holdem_engine::rules::LegalActions;
use holdem_table::{ActionChoice, Announcement, PromptContext, TableChannel};
use tokio::sync::mpsc;

use crate::formatters::{format_board, format_options, format_view};
use crate::io_utils::read_stdin_line;
use crate::validation::{ParseResult, parse_choice};

/// One human at a terminal; everyone else at the table is a bot.
///
/// A single reader thread owns the input and queues each line. A prompt
/// that times out leaves the queue untouched, so the next line typed goes
/// to the next prompt.
pub struct ConsoleChannel {
    player: PlayerId,
    lines: tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>,
    output: Mutex<Box<dyn Write + Send>>,
    pending_raise: Mutex<Option<String>>,
    quit: AtomicBool,
}

impl ConsoleChannel {
    pub fn new(
        player: PlayerId,
        mut input: Box<dyn BufRead + Send>,
        output: Box<dyn Write + Send>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            while let Some(line) = read_stdin_line(&mut *input) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            player,
            lines: tokio::sync::Mutex::new(rx),
            output: Mutex::new(output),
            pending_raise: Mutex::new(None),
            quit: AtomicBool::new(false),
        }
    }

    /// The player typed quit or closed stdin.
    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }

    fn say(&self, line: &str) {
        if let Ok(mut out) = self.output.lock() {
            let _ = writeln!(out, "{line}");
            let _ = out.flush();
        }
    }

    async fn read_line(&self) -> Option<String> {
        let line = self.lines.lock().await.recv().await;
        if line.is_none() {
            self.quit.store(true, Ordering::SeqCst);
        }
        line
    }
}

#[async_trait]
impl TableChannel for ConsoleChannel {
    async fn prompt_action(
        &self,
        player: PlayerId,
        legal: &LegalActions,
        context: &PromptContext,
    ) -> Option<ActionChoice> {
        if player != self.player || self.quit_requested() {
            return None;
        }
        self.say(&format!(
            "Hand #{} | {}",
            context.hand_number,
            format_view(&context.view)
        ));
        self.say(&format!("Your cards: {}", format_board(&context.view.hole)));
        self.say(&format!(
            "{} ({}s): {}",
            context.seat_name,
            context.timeout_secs,
            format_options(legal)
        ));

        loop {
            let line = self.read_line().await?;
            match parse_choice(&line, legal) {
                ParseResult::Choice(choice, amount) => {
                    if let Ok(mut pending) = self.pending_raise.lock() {
                        *pending = amount;
                    }
                    return Some(choice);
                }
                ParseResult::Quit => {
                    self.quit.store(true, Ordering::SeqCst);
                    self.say("You leave the table; your seat folds until the session ends.");
                    return None;
                }
                ParseResult::Invalid(msg) => self.say(&msg),
            }
        }
    }

    async fn collect_raise_amount(&self, player: PlayerId, min: u32, max: u32) -> Option<String> {
        if player != self.player {
            return None;
        }
        let typed = self
            .pending_raise
            .lock()
            .ok()
            .and_then(|mut pending| pending.take());
        if typed.is_some() {
            return typed;
        }
        self.say(&format!("Raise to ({min}-{max}):"));
        self.read_line().await
    }

    async fn announce(&self, announcement: &Announcement) {
        self.say(&announcement.to_string());
    }

    async fn deal_private(&self, player: PlayerId, cards: [Card; 2]) {
        if player == self.player {
            self.say(&format!("You are dealt {}", format_board(&cards)));
        }
    }

    async fn teardown(&self) {
        if let Ok(mut out) = self.output.lock() {
            let _ = out.flush();
        }
    }
}

/// Collects announcements as text; used for bots-only tables.
#[derive(Default)]
pub struct TranscriptChannel {
    lines: Mutex<Vec<String>>,
}

impl TranscriptChannel {
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TableChannel for TranscriptChannel {
    async fn prompt_action(
        &self,
        _player: PlayerId,
        _legal: &LegalActions,
        _context: &PromptContext,
    ) -> Option<ActionChoice> {
        None
    }

    async fn collect_raise_amount(&self, _player: PlayerId, _min: u32, _max: u32) -> Option<String> {
        None
    }

    async fn announce(&self, announcement: &Announcement) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(announcement.to_string());
        }
    }

    async fn teardown(&self) {}
}
