use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::account::Account;
use super::obligation::{PostedTransaction, RecurringObligation};
use super::transaction::GeneratedTransaction;
use super::window::ProjectionWindow;
use crate::errors::CoreError;
use crate::schedule::expand;

/// Sorts the timeline and fills in the running balance after each entry,
/// starting from `starting_balance`.
///
/// Entries sort ascending by date; at equal instants settled history lands
/// before projected occurrences, and otherwise input order is kept. Each step
/// rounds to cents, half away from zero, so the stored balance matches what a
/// statement would show. The final balance therefore equals the starting
/// balance plus the rounded sum of every entry's net effect.
pub fn project(
    mut entries: Vec<GeneratedTransaction>,
    starting_balance: Decimal,
) -> Result<Vec<GeneratedTransaction>, CoreError> {
    entries.sort_by_key(|entry| (entry.date, !entry.is_posted()));
    let mut running = starting_balance;
    for entry in &mut entries {
        running = running
            .checked_add(entry.total)
            .map(round_cents)
            .ok_or_else(|| {
                CoreError::ProjectionInput(format!("balance overflow at {}", entry.date))
            })?;
        entry.balance = Some(running);
    }
    Ok(entries)
}

/// Expands every obligation over the window into dated timeline entries,
/// unsorted and without balances. Fails on the first invalid rule, producing
/// nothing.
pub fn expand_obligations(
    obligations: &[RecurringObligation],
    window: &ProjectionWindow,
) -> Result<Vec<GeneratedTransaction>, CoreError> {
    let mut entries = Vec::new();
    for obligation in obligations {
        for date in expand(&obligation.rule, window.start, window.end)? {
            entries.push(GeneratedTransaction::projected(obligation, date));
        }
    }
    Ok(entries)
}

/// Full account projection: expands the obligations over the window, merges
/// in settled history, and walks the balance forward from the account's
/// current balance. Supplying history dated in the past recomputes those
/// running balances retroactively.
pub fn project_account(
    account: &Account,
    obligations: &[RecurringObligation],
    posted: &[PostedTransaction],
    window: &ProjectionWindow,
) -> Result<Vec<GeneratedTransaction>, CoreError> {
    let mut entries = expand_obligations(obligations, window)?;
    entries.extend(posted.iter().map(GeneratedTransaction::from_posted));
    debug!(
        account = %account.id,
        projected = entries.len() - posted.len(),
        posted = posted.len(),
        "projecting account timeline"
    );
    project(entries, account.current_balance)
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_cents(dec!(10.005)), dec!(10.01));
        assert_eq!(round_cents(dec!(-10.005)), dec!(-10.01));
        assert_eq!(round_cents(dec!(10.004)), dec!(10.00));
    }
}
