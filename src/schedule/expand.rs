use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use super::rule::{Anchor, Frequency, RecurrenceRule};
use crate::errors::CoreError;

/// Hard cap on occurrences per expansion, above any five-year horizon at
/// daily granularity. Hitting it truncates the tail.
const MAX_OCCURRENCES: usize = 10_000;

/// Expands `rule` into every occurrence within `[window_start, window_end]`,
/// ascending and fully materialized.
///
/// Occurrences before `rule.begin` or after `rule.end` are excluded; both
/// window bounds are inclusive. Every produced instant carries `begin`'s
/// time-of-day. Identical inputs always yield the identical sequence.
pub fn expand(
    rule: &RecurrenceRule,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Result<Vec<NaiveDateTime>, CoreError> {
    let anchor = rule.anchor()?;
    let lo = window_start.max(rule.begin);
    let hi = match rule.end {
        Some(end) => window_end.min(end),
        None => window_end,
    };
    if hi < lo {
        return Ok(Vec::new());
    }

    let occurrences = match rule.frequency {
        Frequency::Daily => walk_linear(rule.begin, i64::from(rule.step()), lo, hi),
        Frequency::Weekly => match anchor {
            Anchor::Weekday(weekday) => {
                let first = first_weekday_on_or_after(rule.begin.date(), weekday)
                    .and_time(rule.begin.time());
                walk_linear(first, i64::from(rule.step()) * 7, lo, hi)
            }
            _ => walk_linear(rule.begin, i64::from(rule.step()) * 7, lo, hi),
        },
        Frequency::Monthly => walk_monthly(rule, anchor, lo, hi),
        Frequency::Yearly => walk_yearly(rule, anchor, lo, hi),
    };
    debug!(occurrences = occurrences.len(), "expanded recurrence rule");
    Ok(occurrences)
}

/// Fixed-step walk used by daily and weekly rules. Jumps arithmetically to
/// the window instead of iterating from a distant `start`.
fn walk_linear(
    start: NaiveDateTime,
    step_days: i64,
    lo: NaiveDateTime,
    hi: NaiveDateTime,
) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    let mut k = if lo > start {
        (lo - start).num_days().div_euclid(step_days)
    } else {
        0
    };
    loop {
        let Some(candidate) = start.checked_add_signed(Duration::days(k * step_days)) else {
            break;
        };
        if candidate > hi {
            break;
        }
        if candidate >= lo {
            out.push(candidate);
            if out.len() >= MAX_OCCURRENCES {
                warn!(cap = MAX_OCCURRENCES, "occurrence cap hit, truncating");
                break;
            }
        }
        k += 1;
    }
    out
}

fn walk_monthly(
    rule: &RecurrenceRule,
    anchor: Anchor,
    lo: NaiveDateTime,
    hi: NaiveDateTime,
) -> Vec<NaiveDateTime> {
    let step = i64::from(rule.step());
    let time = rule.begin.time();
    let start_index = month_index(rule.begin.date());
    let mut j = (month_index(lo.date()) - start_index)
        .div_euclid(step)
        .max(0);
    let mut out = Vec::new();
    loop {
        let Some((year, month)) = from_month_index(start_index + j * step) else {
            break;
        };
        let Some(month_first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            break;
        };
        if month_first.and_time(time) > hi {
            break;
        }
        if let Some(date) = resolve_in_month(year, month, anchor) {
            let candidate = date.and_time(time);
            if candidate >= lo && candidate <= hi && candidate >= rule.begin {
                out.push(candidate);
                if out.len() >= MAX_OCCURRENCES {
                    warn!(cap = MAX_OCCURRENCES, "occurrence cap hit, truncating");
                    break;
                }
            }
        }
        j += 1;
    }
    out
}

fn walk_yearly(
    rule: &RecurrenceRule,
    anchor: Anchor,
    lo: NaiveDateTime,
    hi: NaiveDateTime,
) -> Vec<NaiveDateTime> {
    let step = i64::from(rule.step());
    let time = rule.begin.time();
    let month = rule.anchor_month();
    let start_year = i64::from(rule.begin.date().year());
    let mut j = (i64::from(lo.date().year()) - start_year)
        .div_euclid(step)
        .max(0);
    let mut out = Vec::new();
    loop {
        let Ok(year) = i32::try_from(start_year + j * step) else {
            break;
        };
        let Some(year_first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
            break;
        };
        if year_first.and_time(time) > hi {
            break;
        }
        if let Some(date) = resolve_in_month(year, month, anchor) {
            let candidate = date.and_time(time);
            if candidate >= lo && candidate <= hi && candidate >= rule.begin {
                out.push(candidate);
                if out.len() >= MAX_OCCURRENCES {
                    warn!(cap = MAX_OCCURRENCES, "occurrence cap hit, truncating");
                    break;
                }
            }
        }
        j += 1;
    }
    out
}

/// Resolves a monthly/yearly anchor to at most one date inside the given
/// month. Joint day+weekday anchors produce none in months where the day
/// misses the weekday.
fn resolve_in_month(year: i32, month: u32, anchor: Anchor) -> Option<NaiveDate> {
    match anchor {
        Anchor::FixedDay { day } => {
            let clamped = day.min(days_in_month(year, month));
            NaiveDate::from_ymd_opt(year, month, clamped)
        }
        Anchor::NthWeekday { weekday, week } => nth_weekday_in_month(year, month, weekday, week),
        Anchor::DayAndWeekday { weekday, day } => {
            let clamped = day.min(days_in_month(year, month));
            let date = NaiveDate::from_ymd_opt(year, month, clamped)?;
            (date.weekday().num_days_from_sunday() == weekday).then_some(date)
        }
        // interval and weekday anchors never reach monthly resolution
        Anchor::Interval | Anchor::Weekday(_) => None,
    }
}

/// The Nth (0-3) or last (4) occurrence of `weekday` within a month.
fn nth_weekday_in_month(year: i32, month: u32, weekday: u32, week: u32) -> Option<NaiveDate> {
    let length = days_in_month(year, month);
    if week == 4 {
        let last = NaiveDate::from_ymd_opt(year, month, length)?;
        let offset = (last.weekday().num_days_from_sunday() + 7 - weekday) % 7;
        return Some(last - Duration::days(offset as i64));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (weekday + 7 - first.weekday().num_days_from_sunday()) % 7;
    let day = 1 + offset + 7 * week;
    if day > length {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn first_weekday_on_or_after(date: NaiveDate, weekday: u32) -> NaiveDate {
    let offset = (weekday + 7 - date.weekday().num_days_from_sunday()) % 7;
    date + Duration::days(offset as i64)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn from_month_index(index: i64) -> Option<(i32, u32)> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    Some((year, (index.rem_euclid(12) + 1) as u32))
}
