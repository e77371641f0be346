use crate::error::{IncentiveError, Result};
use colearn_types::TokenAmount;

pub const SECONDS_PER_HOUR: u64 = 3600;

/// Floor of the square root of `n`.
///
/// Newton's method with an initial guess that is always >= sqrt(n), so the
/// iteration decreases monotonically and terminates at the floor.
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = n / 2 + 1;
    let mut y = (x + n / x) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Price of the next submission as a function of time since the last one.
///
/// The price starts at `cost_weight * 3600` when no time has elapsed and
/// decays as `1 / isqrt(elapsed)`, so rapid-fire submissions pay the most
/// and the price is non-increasing as the store goes quiet.
pub fn next_cost(cost_weight: u64, last_update_time: i64, now: i64) -> Result<TokenAmount> {
    if now < last_update_time {
        return Err(IncentiveError::ClockInversion {
            now,
            last_update: last_update_time,
        });
    }

    let elapsed = (now - last_update_time) as u64;
    let divisor = if elapsed == 0 { 1 } else { isqrt(elapsed) };

    let cost = cost_weight
        .checked_mul(SECONDS_PER_HOUR)
        .ok_or(IncentiveError::Overflow("submission cost"))?
        / divisor;

    Ok(TokenAmount::from_units(cost))
}
