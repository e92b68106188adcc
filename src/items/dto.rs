use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::expiry::{classify, days_until, Bucket};
use super::repo_types::FoodItem;

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Date,
    pub receipt_id: Option<Uuid>,
    #[serde(default)]
    pub consumed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_consumed: bool,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Date,
    pub receipt_id: Option<Uuid>,
    pub consumed: bool,
    pub created_at: OffsetDateTime,
    pub bucket: Bucket,
    pub days_until_expiry: i64,
}

impl ItemResponse {
    pub fn from_item(item: FoodItem, today: Date) -> Self {
        let bucket = classify(item.expiry_date, today);
        let days_until_expiry = days_until(item.expiry_date, today);
        Self {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            unit: item.unit,
            category: item.category,
            expiry_date: item.expiry_date,
            receipt_id: item.receipt_id,
            consumed: item.consumed,
            created_at: item.created_at,
            bucket,
            days_until_expiry,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub expired: Vec<ItemResponse>,
    pub expiring_soon: Vec<ItemResponse>,
    pub use_soon: Vec<ItemResponse>,
    pub fresh: Vec<ItemResponse>,
    pub urgent_count: usize,
    pub active_total: usize,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: Date,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn item_response_carries_bucket_and_day_count() {
        let today = date!(2025 - 03 - 10);
        let item = FoodItem {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Milk".into(),
            quantity: 1.0,
            unit: Some("liter".into()),
            category: Some("Dairy".into()),
            expiry_date: date!(2025 - 03 - 11),
            receipt_id: None,
            consumed: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };

        let response = ItemResponse::from_item(item, today);
        assert_eq!(response.bucket, Bucket::ExpiringSoon);
        assert_eq!(response.days_until_expiry, 1);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"bucket\":\"expiring_soon\""));
        assert!(json.contains("Milk"));
    }
}
