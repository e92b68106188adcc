use serde::Serialize;
use time::Date;

/// Urgency bucket derived from an item's expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Expired,
    ExpiringSoon,
    UseSoon,
    Fresh,
}

/// Whole-day difference between expiry and `today`; time of day never enters
/// into it. Both sides are civil dates, UTC by convention of the callers.
pub fn days_until(expiry: Date, today: Date) -> i64 {
    i64::from(expiry.to_julian_day() - today.to_julian_day())
}

/// An item expiring today is ExpiringSoon, not Expired: the expiry date is a
/// last usable day, not an elapsed one.
pub fn classify(expiry: Date, today: Date) -> Bucket {
    match days_until(expiry, today) {
        i64::MIN..=-1 => Bucket::Expired,
        0..=2 => Bucket::ExpiringSoon,
        3..=6 => Bucket::UseSoon,
        _ => Bucket::Fresh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Duration;

    const TODAY: Date = date!(2025 - 03 - 10);

    #[test]
    fn expires_today_is_expiring_soon() {
        assert_eq!(classify(TODAY, TODAY), Bucket::ExpiringSoon);
    }

    #[test]
    fn yesterday_is_expired() {
        assert_eq!(classify(TODAY - Duration::days(1), TODAY), Bucket::Expired);
    }

    #[test]
    fn lower_bucket_boundaries() {
        assert_eq!(classify(TODAY + Duration::days(2), TODAY), Bucket::ExpiringSoon);
        assert_eq!(classify(TODAY + Duration::days(3), TODAY), Bucket::UseSoon);
        assert_eq!(classify(TODAY + Duration::days(6), TODAY), Bucket::UseSoon);
        assert_eq!(classify(TODAY + Duration::days(7), TODAY), Bucket::Fresh);
    }

    #[test]
    fn every_day_offset_lands_in_exactly_one_bucket() {
        // The four buckets cover the whole day-difference line with no gaps:
        // walking the line crosses each boundary exactly once.
        let mut last = classify(TODAY - Duration::days(400), TODAY);
        let mut transitions = 0;
        for offset in -399..=400 {
            let bucket = classify(TODAY + Duration::days(offset), TODAY);
            if bucket != last {
                transitions += 1;
                last = bucket;
            }
        }
        assert_eq!(transitions, 3);
        assert_eq!(classify(TODAY - Duration::days(400), TODAY), Bucket::Expired);
        assert_eq!(classify(TODAY + Duration::days(400), TODAY), Bucket::Fresh);
    }

    #[test]
    fn far_past_expiry_dates_are_allowed() {
        assert_eq!(classify(date!(1999 - 01 - 01), TODAY), Bucket::Expired);
        assert_eq!(days_until(date!(2025 - 03 - 09), TODAY), -1);
    }

    #[test]
    fn classification_crosses_month_and_year_boundaries() {
        let eve = date!(2025 - 12 - 31);
        assert_eq!(classify(date!(2026 - 01 - 02), eve), Bucket::ExpiringSoon);
        assert_eq!(classify(date!(2026 - 01 - 07), eve), Bucket::Fresh);
    }
}
