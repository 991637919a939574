use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::RecurrenceRule;

/// Which obligation table a timeline entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Expense,
    Income,
    Loan,
    Transfer,
    Payroll,
}

/// One recurring cash flow: a recurrence rule plus the signed amounts each
/// occurrence applies to the account.
///
/// `amount` is the gross figure shown to the user; `total` is the net effect
/// on the balance after withholdings and fees. Constructors fix the sign by
/// kind so callers pass magnitudes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringObligation {
    pub id: Uuid,
    pub kind: SourceKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Decimal,
    pub total: Decimal,
    pub rule: RecurrenceRule,
}

impl RecurringObligation {
    fn with_signed(
        kind: SourceKind,
        title: impl Into<String>,
        amount: Decimal,
        rule: RecurrenceRule,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            description: None,
            amount,
            total: amount,
            rule,
        }
    }

    pub fn expense(title: impl Into<String>, amount: Decimal, rule: RecurrenceRule) -> Self {
        Self::with_signed(SourceKind::Expense, title, -amount.abs(), rule)
    }

    pub fn income(title: impl Into<String>, amount: Decimal, rule: RecurrenceRule) -> Self {
        Self::with_signed(SourceKind::Income, title, amount.abs(), rule)
    }

    pub fn loan_payment(title: impl Into<String>, amount: Decimal, rule: RecurrenceRule) -> Self {
        Self::with_signed(SourceKind::Loan, title, -amount.abs(), rule)
    }

    /// Payroll keeps the gross figure for display while the net figure drives
    /// the balance.
    pub fn payroll(
        title: impl Into<String>,
        gross: Decimal,
        net: Decimal,
        rule: RecurrenceRule,
    ) -> Self {
        Self::with_signed(SourceKind::Payroll, title, gross.abs(), rule).with_total(net)
    }

    pub fn transfer_out(title: impl Into<String>, amount: Decimal, rule: RecurrenceRule) -> Self {
        Self::with_signed(SourceKind::Transfer, title, -amount.abs(), rule)
    }

    pub fn transfer_in(title: impl Into<String>, amount: Decimal, rule: RecurrenceRule) -> Self {
        Self::with_signed(SourceKind::Transfer, title, amount.abs(), rule)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the net effect; the sign keeps following the obligation's
    /// direction, so callers pass a magnitude.
    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total = if self.amount.is_sign_negative() {
            -total.abs()
        } else {
            total.abs()
        };
        self
    }
}

/// An already-settled transaction supplied alongside the obligations, so the
/// projector can recompute running balances over history. Amounts arrive
/// signed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostedTransaction {
    pub transaction_id: Uuid,
    pub source_id: Uuid,
    pub kind: SourceKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub amount: Decimal,
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<NaiveDateTime>,
}

impl PostedTransaction {
    pub fn new(
        source_id: Uuid,
        kind: SourceKind,
        title: impl Into<String>,
        date: NaiveDateTime,
        amount: Decimal,
    ) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            source_id,
            kind,
            title: title.into(),
            description: None,
            date,
            amount,
            total: amount,
            date_modified: None,
        }
    }

    /// Overrides the signed net effect as stored.
    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total = total;
        self
    }

    pub fn with_date_modified(mut self, date_modified: NaiveDateTime) -> Self {
        self.date_modified = Some(date_modified);
        self
    }
}
