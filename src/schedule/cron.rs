use chrono::{Datelike, Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expand::expand;
use super::rule::{Anchor, Frequency, RecurrenceRule};
use crate::errors::CoreError;
use crate::projection::obligation::RecurringObligation;

/// How far ahead of the reference instant the next due date is searched.
const LOOKAHEAD_DAYS: i64 = 365 * 5;

/// One reminder job handed to an external scheduler: a stable id, a
/// five-field cron expression, and the command the scheduler should run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub unique_id: Uuid,
    pub expression: String,
    pub command: String,
}

/// Port for whatever actually schedules reminder jobs. Implementations keep
/// their own transport; resubmitting an id replaces the previous job.
pub trait JobScheduler: Send + Sync {
    fn submit(&mut self, job: JobRequest) -> Result<(), CoreError>;
}

/// Renders `rule` as a five-field cron expression
/// (`minute hour day-of-month month day-of-week`).
///
/// Cron has no field for multi-week or multi-year intervals, so those rules
/// render at base granularity; the due date embedded in the job command stays
/// authoritative.
pub fn cron_expression(rule: &RecurrenceRule) -> Result<String, CoreError> {
    let anchor = rule.anchor()?;
    let minute = rule.begin.time().format("%M");
    let hour = rule.begin.time().format("%H");
    let expression = match rule.frequency {
        Frequency::Daily => {
            let dom = interval_field(rule.step());
            format!("{minute} {hour} {dom} * *")
        }
        Frequency::Weekly => {
            let weekday = match anchor {
                Anchor::Weekday(weekday) => weekday,
                _ => rule.begin.date().weekday().num_days_from_sunday(),
            };
            format!("{minute} {hour} * * {weekday}")
        }
        Frequency::Monthly => {
            let (dom, dow) = dom_dow_fields(rule, anchor);
            let month = interval_field(rule.step());
            format!("{minute} {hour} {dom} {month} {dow}")
        }
        Frequency::Yearly => {
            let (dom, dow) = dom_dow_fields(rule, anchor);
            format!("{minute} {hour} {dom} {} {dow}", rule.anchor_month())
        }
    };
    Ok(expression)
}

/// First occurrence of `rule` on or after `reference`, within the reminder
/// lookahead. `None` means the rule has run out.
pub fn next_occurrence(
    rule: &RecurrenceRule,
    reference: NaiveDateTime,
) -> Result<Option<NaiveDateTime>, CoreError> {
    let horizon = reference + Duration::days(LOOKAHEAD_DAYS);
    Ok(expand(rule, reference, horizon)?.into_iter().next())
}

/// Builds the scheduler job for one obligation, or `None` when the rule has
/// no occurrence left within the lookahead.
pub fn submission(
    obligation: &RecurringObligation,
    reference: NaiveDateTime,
) -> Result<Option<JobRequest>, CoreError> {
    let Some(due) = next_occurrence(&obligation.rule, reference)? else {
        return Ok(None);
    };
    Ok(Some(JobRequest {
        unique_id: obligation.id,
        expression: cron_expression(&obligation.rule)?,
        command: format!(
            "{} {} due {}",
            obligation.title,
            obligation.total,
            due.format("%Y-%m-%d %H:%M")
        ),
    }))
}

fn interval_field(step: u32) -> String {
    if step == 1 {
        "*".to_string()
    } else {
        format!("*/{step}")
    }
}

/// Day-of-month and day-of-week fields for monthly and yearly rules. The Nth
/// weekday maps onto a seven-day day-of-month range; the last weekday uses
/// the `L` suffix.
fn dom_dow_fields(rule: &RecurrenceRule, anchor: Anchor) -> (String, String) {
    match anchor {
        Anchor::FixedDay { day } => (day.to_string(), "*".to_string()),
        Anchor::NthWeekday { weekday, week } if week == 4 => {
            ("*".to_string(), format!("{weekday}L"))
        }
        Anchor::NthWeekday { weekday, week } => {
            let from = week * 7 + 1;
            let to = week * 7 + 7;
            (format!("{from}-{to}"), weekday.to_string())
        }
        Anchor::DayAndWeekday { weekday, day } => (day.to_string(), weekday.to_string()),
        Anchor::Interval | Anchor::Weekday(_) => {
            (rule.begin.date().day().to_string(), "*".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn daily_interval_renders_step_field() {
        let rule = RecurrenceRule::new(Frequency::Daily, 3, at(2024, 1, 1, 9, 30));
        assert_eq!(cron_expression(&rule).unwrap(), "30 09 */3 * *");
    }

    #[test]
    fn weekly_rule_defaults_to_begin_weekday() {
        // 2024-01-01 is a Monday.
        let rule = RecurrenceRule::new(Frequency::Weekly, 1, at(2024, 1, 1, 8, 0));
        assert_eq!(cron_expression(&rule).unwrap(), "00 08 * * 1");
    }

    #[test]
    fn nth_weekday_maps_to_day_range() {
        let rule = RecurrenceRule::new(Frequency::Monthly, 1, at(2024, 1, 1, 7, 15))
            .on_weekday(4)
            .in_week(1);
        assert_eq!(cron_expression(&rule).unwrap(), "15 07 8-14 * 4");
    }

    #[test]
    fn last_weekday_uses_l_suffix() {
        let rule = RecurrenceRule::new(Frequency::Monthly, 1, at(2024, 1, 1, 7, 15))
            .on_weekday(5)
            .in_week(4);
        assert_eq!(cron_expression(&rule).unwrap(), "15 07 * * 5L");
    }

    #[test]
    fn yearly_rule_pins_month() {
        let rule = RecurrenceRule::new(Frequency::Yearly, 1, at(2024, 3, 10, 12, 0)).on_day(10);
        assert_eq!(cron_expression(&rule).unwrap(), "00 12 10 3 *");
    }
}
