use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::obligation::{PostedTransaction, RecurringObligation, SourceKind};

/// One entry on an account's projected timeline, either a future occurrence
/// of an obligation or a settled historical transaction.
///
/// `balance` is empty until the projector fills it. `transaction_id` and
/// `date_modified` are carried only for settled history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedTransaction {
    pub date: NaiveDateTime,
    pub amount: Decimal,
    pub total: Decimal,
    pub source_id: Uuid,
    pub kind: SourceKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<NaiveDateTime>,
}

impl GeneratedTransaction {
    /// A future occurrence of `source` falling on `date`.
    pub fn projected(source: &RecurringObligation, date: NaiveDateTime) -> Self {
        Self {
            date,
            amount: source.amount,
            total: source.total,
            source_id: source.id,
            kind: source.kind,
            title: source.title.clone(),
            description: source.description.clone(),
            balance: None,
            transaction_id: None,
            date_modified: None,
        }
    }

    pub fn from_posted(posted: &PostedTransaction) -> Self {
        Self {
            date: posted.date,
            amount: posted.amount,
            total: posted.total,
            source_id: posted.source_id,
            kind: posted.kind,
            title: posted.title.clone(),
            description: posted.description.clone(),
            balance: None,
            transaction_id: Some(posted.transaction_id),
            date_modified: posted.date_modified,
        }
    }

    pub fn is_posted(&self) -> bool {
        self.transaction_id.is_some()
    }
}
