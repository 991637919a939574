use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A financial account whose settled balance is the projection baseline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub current_balance: Decimal,
}

impl Account {
    pub fn new(name: impl Into<String>, current_balance: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            current_balance,
        }
    }
}
