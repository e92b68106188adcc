use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Food item record in the database.
///
/// `receipt_id` is a weak reference: no foreign key, resolved only by an
/// explicit receipt lookup. Deleting the receipt leaves the item untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Date,
    pub receipt_id: Option<Uuid>,
    pub consumed: bool,
    pub created_at: OffsetDateTime,
}
