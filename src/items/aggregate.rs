use std::collections::BTreeMap;

use time::Date;

use super::expiry::{classify, Bucket};
use super::repo_types::FoodItem;

/// Derived view over a snapshot of items: a stable partition by urgency
/// bucket plus per-date counts for the calendar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryView {
    pub expired: Vec<FoodItem>,
    pub expiring_soon: Vec<FoodItem>,
    pub use_soon: Vec<FoodItem>,
    pub fresh: Vec<FoodItem>,
    pub by_date: BTreeMap<Date, i64>,
}

impl InventoryView {
    /// The urgent-action badge merges already-expired and about-to-expire.
    pub fn urgent_count(&self) -> usize {
        self.expired.len() + self.expiring_soon.len()
    }

    pub fn active_total(&self) -> usize {
        self.expired.len() + self.expiring_soon.len() + self.use_soon.len() + self.fresh.len()
    }

    pub fn bucket(&self, bucket: Bucket) -> &[FoodItem] {
        match bucket {
            Bucket::Expired => &self.expired,
            Bucket::ExpiringSoon => &self.expiring_soon,
            Bucket::UseSoon => &self.use_soon,
            Bucket::Fresh => &self.fresh,
        }
    }
}

/// Partitions non-consumed items by urgency and counts them per expiry date.
/// Input order is preserved within each bucket; `today` is explicit so the
/// same snapshot always produces the same view.
pub fn aggregate(items: &[FoodItem], today: Date) -> InventoryView {
    let mut view = InventoryView::default();
    for item in items {
        if item.consumed {
            continue;
        }
        *view.by_date.entry(item.expiry_date).or_insert(0) += 1;
        let slot = match classify(item.expiry_date, today) {
            Bucket::Expired => &mut view.expired,
            Bucket::ExpiringSoon => &mut view.expiring_soon,
            Bucket::UseSoon => &mut view.use_soon,
            Bucket::Fresh => &mut view.fresh,
        };
        slot.push(item.clone());
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    const TODAY: Date = date!(2025 - 03 - 10);

    fn item(name: &str, offset_days: i64, consumed: bool) -> FoodItem {
        FoodItem {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.into(),
            quantity: 1.0,
            unit: None,
            category: None,
            expiry_date: TODAY + Duration::days(offset_days),
            receipt_id: None,
            consumed,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn partitions_three_items_and_counts_urgent() {
        let items = vec![item("bread", -1, false), item("milk", 0, false), item("yogurt", 10, false)];
        let view = aggregate(&items, TODAY);

        assert_eq!(view.expired.len(), 1);
        assert_eq!(view.expired[0].name, "bread");
        assert_eq!(view.expiring_soon.len(), 1);
        assert_eq!(view.expiring_soon[0].name, "milk");
        assert!(view.use_soon.is_empty());
        assert_eq!(view.fresh.len(), 1);
        assert_eq!(view.fresh[0].name, "yogurt");
        assert_eq!(view.urgent_count(), 2);
        assert_eq!(view.active_total(), 3);
    }

    #[test]
    fn consumed_items_are_invisible() {
        let items = vec![item("a", -1, true), item("b", 1, true), item("c", 9, true)];
        let view = aggregate(&items, TODAY);
        assert_eq!(view, InventoryView::default());
        assert_eq!(view.urgent_count(), 0);
    }

    #[test]
    fn bucket_order_follows_input_order() {
        let items = vec![
            item("first", 1, false),
            item("skip", 5, false),
            item("second", 0, false),
            item("third", 2, false),
        ];
        let view = aggregate(&items, TODAY);
        let names: Vec<&str> = view.expiring_soon.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn by_date_counts_every_active_item_regardless_of_bucket() {
        let items = vec![
            item("a", -1, false),
            item("b", 2, false),
            item("c", 2, false),
            item("d", 2, true), // consumed: not counted
            item("e", 12, false),
        ];
        let view = aggregate(&items, TODAY);
        assert_eq!(view.by_date.get(&(TODAY - Duration::days(1))), Some(&1));
        assert_eq!(view.by_date.get(&(TODAY + Duration::days(2))), Some(&2));
        assert_eq!(view.by_date.get(&(TODAY + Duration::days(12))), Some(&1));
        assert_eq!(view.by_date.len(), 3);
    }

    #[test]
    fn repeated_aggregation_is_identical() {
        let items = vec![item("a", -3, false), item("b", 0, false), item("c", 4, false)];
        assert_eq!(aggregate(&items, TODAY), aggregate(&items, TODAY));
    }

    #[test]
    fn bucket_accessor_matches_fields() {
        let items = vec![item("a", 4, false)];
        let view = aggregate(&items, TODAY);
        assert_eq!(view.bucket(super::Bucket::UseSoon).len(), 1);
        assert!(view.bucket(super::Bucket::Fresh).is_empty());
    }
}
