//! Streak counters: scan the tick sequence from the most recent entry
//! backward and count while consecutive ticks share the tested property.

use crate::model::tick::Tick;

/// Consecutive most-recent ticks whose last digit has the given parity.
pub fn parity_streak(ticks: &[Tick], even: bool) -> usize {
    ticks
        .iter()
        .rev()
        .take_while(|t| (t.digit % 2 == 0) == even)
        .count()
}

/// Consecutive most-recent ticks with strictly increasing price.
pub fn rise_streak(ticks: &[Tick]) -> usize {
    let mut count = 0;
    for i in (1..ticks.len()).rev() {
        if ticks[i].price > ticks[i - 1].price {
            count += 1;
        } else {
            break;
        }
    }
    count
}
