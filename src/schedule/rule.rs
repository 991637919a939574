use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// How often a recurring obligation repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Describes the schedule of one recurring obligation.
///
/// A rule is anchored in exactly one way, resolved from which optional
/// fields are populated: a plain interval from `begin`, a weekday
/// (`day_of_week`), an Nth weekday of the month (`day_of_week` plus
/// `week_of_month`), or a fixed calendar day (`day_of_month`). See
/// [`expand`](super::expand::expand) for the per-frequency semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Interval multiplier: every N days/weeks/months/years. Zero is
    /// tolerated and treated as one.
    #[serde(default)]
    pub every: u32,
    /// Weekday anchor, 0-6 with Sunday = 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u32>,
    /// Week-of-month anchor, 0-3 = first..fourth, 4 = last. Requires
    /// `day_of_week`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of_month: Option<u32>,
    /// Calendar-day anchor, 1-31. Days past a month's end clamp to its
    /// final day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    /// Month anchor for yearly rules, 0-11 with January = 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<u32>,
    /// Schedule start; its time-of-day is stamped onto every occurrence.
    pub begin: NaiveDateTime,
    /// No occurrences are produced after this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, every: u32, begin: NaiveDateTime) -> Self {
        Self {
            frequency,
            every,
            day_of_week: None,
            week_of_month: None,
            day_of_month: None,
            month_of_year: None,
            begin,
            end: None,
        }
    }

    pub fn on_weekday(mut self, day_of_week: u32) -> Self {
        self.day_of_week = Some(day_of_week);
        self
    }

    pub fn in_week(mut self, week_of_month: u32) -> Self {
        self.week_of_month = Some(week_of_month);
        self
    }

    pub fn on_day(mut self, day_of_month: u32) -> Self {
        self.day_of_month = Some(day_of_month);
        self
    }

    pub fn in_month(mut self, month_of_year: u32) -> Self {
        self.month_of_year = Some(month_of_year);
        self
    }

    pub fn until(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Effective interval multiplier; never zero.
    pub fn step(&self) -> u32 {
        self.every.max(1)
    }

    /// Month (1-12) a yearly rule is pinned to.
    pub(crate) fn anchor_month(&self) -> u32 {
        self.month_of_year
            .map(|month| month + 1)
            .unwrap_or_else(|| self.begin.month())
    }

    /// Resolves the anchoring mode, validating field ranges first.
    pub(crate) fn anchor(&self) -> Result<Anchor, CoreError> {
        self.validate_ranges()?;
        if self.week_of_month.is_some() && self.day_of_week.is_none() {
            return Err(CoreError::InvalidRule(
                "week_of_month requires day_of_week".into(),
            ));
        }
        let anchor = match self.frequency {
            Frequency::Daily => Anchor::Interval,
            Frequency::Weekly => match self.day_of_week {
                Some(weekday) => Anchor::Weekday(weekday),
                None => Anchor::Interval,
            },
            Frequency::Monthly | Frequency::Yearly => {
                match (self.day_of_week, self.week_of_month) {
                    (Some(weekday), Some(week)) => Anchor::NthWeekday { weekday, week },
                    (Some(weekday), None) => Anchor::DayAndWeekday {
                        weekday,
                        day: self.day_of_month.unwrap_or_else(|| self.begin.day()),
                    },
                    (None, _) => Anchor::FixedDay {
                        day: self.day_of_month.unwrap_or_else(|| self.begin.day()),
                    },
                }
            }
        };
        Ok(anchor)
    }

    fn validate_ranges(&self) -> Result<(), CoreError> {
        if let Some(weekday) = self.day_of_week {
            if weekday > 6 {
                return Err(CoreError::InvalidRule(format!(
                    "day_of_week {weekday} outside 0-6"
                )));
            }
        }
        if let Some(week) = self.week_of_month {
            if week > 4 {
                return Err(CoreError::InvalidRule(format!(
                    "week_of_month {week} outside 0-4"
                )));
            }
        }
        if let Some(day) = self.day_of_month {
            if day == 0 || day > 31 {
                return Err(CoreError::InvalidRule(format!(
                    "day_of_month {day} outside 1-31"
                )));
            }
        }
        if let Some(month) = self.month_of_year {
            if month > 11 {
                return Err(CoreError::InvalidRule(format!(
                    "month_of_year {month} outside 0-11"
                )));
            }
        }
        Ok(())
    }
}

/// The single active anchoring mode of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// Plain interval from `begin`, no calendar constraint.
    Interval,
    /// Weekly rules pinned to a weekday (0-6, Sunday = 0).
    Weekday(u32),
    /// Monthly/yearly rules pinned to a calendar day, clamped to the
    /// month's length.
    FixedDay { day: u32 },
    /// Monthly/yearly rules pinned to the Nth weekday of the month
    /// (week 4 = last).
    NthWeekday { weekday: u32, week: u32 },
    /// Monthly/yearly rules that fire only in months where `day` falls on
    /// `weekday`. Matches the cron translation of these rules, which ANDs
    /// the two constraints; flagged for product review.
    DayAndWeekday { weekday: u32, day: u32 },
}
