//! Recurrence rules, their expansion into concrete occurrences, and the cron
//! adapter for reminder scheduling.

pub mod cron;
pub mod expand;
pub mod rule;

pub use cron::{cron_expression, next_occurrence, submission, JobRequest, JobScheduler};
pub use expand::expand;
pub use rule::{Frequency, RecurrenceRule};
