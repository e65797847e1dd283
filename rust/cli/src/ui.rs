//! UI helper functions for terminal output formatting.

use std::io::Write;

use holdem_table::SessionSummary;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Final standings, best stack first.
pub fn write_standings(out: &mut dyn Write, summary: &SessionSummary) -> std::io::Result<()> {
    let elapsed = summary.ended_at - summary.started_at;
    writeln!(
        out,
        "Session ended after {} hands ({}) in {}s",
        summary.hands_played,
        reason_label(summary),
        elapsed.num_seconds()
    )?;
    let mut results: Vec<_> = summary.results.iter().collect();
    results.sort_by(|a, b| b.final_stack.cmp(&a.final_stack).then(a.player.cmp(&b.player)));

    writeln!(out, "{:<20} {:>8} {:>8}", "seat", "stack", "net")?;
    for r in results {
        let marker = if r.settled { "" } else { "  (not settled)" };
        writeln!(
            out,
            "{:<20} {:>8} {:>+8}{}",
            r.name,
            r.final_stack,
            r.net(),
            marker
        )?;
    }
    Ok(())
}

fn reason_label(summary: &SessionSummary) -> &'static str {
    use holdem_table::EndReason;
    match summary.reason {
        EndReason::LastStackStanding => "one stack left",
        EndReason::HandLimit => "hand limit reached",
        EndReason::NotEnoughBuyIns => "not enough buy-ins",
        EndReason::Closed => "table closed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_table::{EndReason, SeatResult};

    fn summary() -> SessionSummary {
        let now = chrono::Utc::now();
        SessionSummary {
            session_id: Default::default(),
            channel_id: "cli".into(),
            hands_played: 3,
            reason: EndReason::HandLimit,
            started_at: now,
            ended_at: now,
            results: vec![
                SeatResult {
                    player: 2,
                    name: "Bot 1 (easy)".into(),
                    bot: true,
                    bought_in: 1000,
                    final_stack: 900,
                    settled: true,
                },
                SeatResult {
                    player: 1,
                    name: "you".into(),
                    bot: false,
                    bought_in: 1000,
                    final_stack: 1100,
                    settled: false,
                },
            ],
            failed_cash_outs: Vec::new(),
        }
    }

    #[test]
    fn standings_sort_by_stack() {
        let mut out = Vec::new();
        write_standings(&mut out, &summary()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Session ended after 3 hands (hand limit reached) in 0s");
        assert!(lines[2].starts_with("you"));
        assert!(lines[2].contains("+100"));
        assert!(lines[2].ends_with("(not settled)"));
        assert!(lines[3].contains("-100"));
    }

    #[test]
    fn errors_are_prefixed() {
        let mut err = Vec::new();
        write_error(&mut err, "bad card").unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "Error: bad card\n");
    }
}
