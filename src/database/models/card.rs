use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted cash card. `owner` is always stamped by the service from the
/// authenticated principal, never taken from client input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CashCard {
    pub id: Uuid,
    pub amount: Decimal,
    pub owner: String,
}

/// A card as submitted to the store for persistence. A missing id means
/// the store assigns one; a present id replaces that record in full.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub id: Option<Uuid>,
    pub amount: Decimal,
    pub owner: String,
}

impl CardRecord {
    pub fn new(amount: Decimal, owner: impl Into<String>) -> Self {
        Self {
            id: None,
            amount,
            owner: owner.into(),
        }
    }

    pub fn replacing(id: Uuid, amount: Decimal, owner: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            amount,
            owner: owner.into(),
        }
    }
}
