/// Seat indexes that matter for one hand, derived from the dealer button.
///
/// Heads-up the dealer posts the small blind and acts first pre-flop; with
/// three or more seats the blinds sit to the dealer's left and the seat after
/// the big blind opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Positions {
    pub dealer: usize,
    pub small_blind: usize,
    pub big_blind: usize,
    /// Where the pre-flop search for the first actor starts
    pub preflop_first: usize,
    /// Where the search starts on every later street
    pub postflop_first: usize,
}

impl Positions {
    pub fn for_table(seat_count: usize, dealer: usize) -> Self {
        let n = seat_count.max(1);
        let dealer = dealer % n;
        let (small_blind, big_blind) = if n == 2 {
            (dealer, (dealer + 1) % n)
        } else {
            ((dealer + 1) % n, (dealer + 2) % n)
        };
        Self {
            dealer,
            small_blind,
            big_blind,
            preflop_first: (big_blind + 1) % n,
            postflop_first: (dealer + 1) % n,
        }
    }
}

/// Seat indexes clockwise from the seat after `from`, ending with `from`.
pub fn clockwise_from(seat_count: usize, from: usize) -> impl Iterator<Item = usize> {
    (1..=seat_count).map(move |k| (from + k) % seat_count)
}
