use thiserror::Error;

/// Field validation failures, rejected before any storage call or derived
/// computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidItem {
    #[error("name must not be empty")]
    EmptyName,
    #[error("quantity must be a positive number")]
    NonPositiveQuantity,
}

pub fn validate_item_fields(name: &str, quantity: f64) -> Result<(), InvalidItem> {
    if name.trim().is_empty() {
        return Err(InvalidItem::EmptyName);
    }
    // the negated comparison also rejects NaN
    if !(quantity > 0.0) {
        return Err(InvalidItem::NonPositiveQuantity);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_fields() {
        assert_eq!(validate_item_fields("Milk", 1.0), Ok(()));
        assert_eq!(validate_item_fields("Chicken Breast", 0.5), Ok(()));
    }

    #[test]
    fn rejects_blank_names() {
        assert_eq!(validate_item_fields("", 1.0), Err(InvalidItem::EmptyName));
        assert_eq!(validate_item_fields("   ", 1.0), Err(InvalidItem::EmptyName));
    }

    #[test]
    fn rejects_non_positive_quantities() {
        assert_eq!(validate_item_fields("Milk", 0.0), Err(InvalidItem::NonPositiveQuantity));
        assert_eq!(validate_item_fields("Milk", -2.0), Err(InvalidItem::NonPositiveQuantity));
        assert_eq!(
            validate_item_fields("Milk", f64::NAN),
            Err(InvalidItem::NonPositiveQuantity)
        );
    }
}
