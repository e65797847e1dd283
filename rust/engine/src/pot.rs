use serde::{Deserialize, Serialize};

use crate::player::Seat;

/// One layer of the pot and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Seat indexes still in the hand that contributed up to this layer
    pub eligible: Vec<usize>,
}

/// Splits the chips committed in a hand into a main pot and side pots.
///
/// Layers are cut at every distinct contribution level. Folded seats' chips
/// stay in the layers they reached but those seats are never eligible.
/// Consecutive layers with the same eligible seats are merged, and a layer
/// nobody live reached is folded into the layer below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
}

impl PotManager {
    pub fn from_seats(seats: &[Seat]) -> Self {
        Self::from_entries(
            seats
                .iter()
                .enumerate()
                .map(|(i, s)| (i, s.total_bet, s.is_live())),
        )
    }

    /// Contributions of seats that are all still live, indexed by position.
    pub fn from_contributions<I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        Self::from_entries(
            contributions
                .into_iter()
                .enumerate()
                .map(|(i, c)| (i, c, true)),
        )
    }

    /// `(seat, contributed, live)` triples.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, u32, bool)>,
    {
        let entries: Vec<(usize, u32, bool)> =
            entries.into_iter().filter(|(_, c, _)| *c > 0).collect();

        let mut levels: Vec<u32> = entries.iter().map(|(_, c, _)| *c).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::new();
        let mut orphaned = 0u32;
        let mut prev = 0u32;
        for level in levels {
            let amount: u32 = entries
                .iter()
                .map(|(_, c, _)| (*c).min(level) - (*c).min(prev))
                .sum();
            let eligible: Vec<usize> = entries
                .iter()
                .filter(|(_, c, live)| *live && *c >= level)
                .map(|(seat, _, _)| *seat)
                .collect();
            prev = level;

            if eligible.is_empty() {
                match pots.last_mut() {
                    Some(last) => last.amount += amount,
                    None => orphaned += amount,
                }
                continue;
            }
            let amount = amount + std::mem::take(&mut orphaned);
            match pots.last_mut() {
                Some(last) if last.eligible == eligible => last.amount += amount,
                _ => pots.push(Pot { amount, eligible }),
            }
        }

        Self { pots }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn main_pot(&self) -> u32 {
        self.pots.first().map_or(0, |p| p.amount)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.pots.iter().skip(1).map(|p| p.amount).collect()
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }
}
