//! Discount domain entity

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    pub id: i32,
    /// Unique across all discounts
    pub name: String,
    /// 0..=100
    pub percentage_amount: f64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub is_active: bool,
}

impl Discount {
    /// Whether a rental starting at `start` may use this discount.
    ///
    /// Both window bounds are inclusive.
    pub fn is_eligible_at(&self, start: DateTime<Utc>) -> bool {
        self.is_active && self.valid_from <= start && start <= self.valid_to
    }
}

#[derive(Debug, Clone)]
pub struct NewDiscount {
    pub name: String,
    pub percentage_amount: f64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DiscountPatch {
    pub name: Option<String>,
    pub percentage_amount: Option<f64>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

impl DiscountPatch {
    pub fn apply(self, discount: &mut Discount) {
        if let Some(name) = self.name {
            discount.name = name;
        }
        if let Some(percentage) = self.percentage_amount {
            discount.percentage_amount = percentage;
        }
        if let Some(from) = self.valid_from {
            discount.valid_from = from;
        }
        if let Some(to) = self.valid_to {
            discount.valid_to = to;
        }
        if let Some(is_active) = self.is_active {
            discount.is_active = is_active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn new_year_discount() -> Discount {
        Discount {
            id: 1,
            name: "New Year".into(),
            percentage_amount: 15.0,
            valid_from: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            valid_to: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            is_active: true,
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let d = new_year_discount();
        assert!(d.is_eligible_at(d.valid_from));
        assert!(d.is_eligible_at(d.valid_to));
    }

    #[test]
    fn one_microsecond_outside_is_rejected() {
        let d = new_year_discount();
        assert!(!d.is_eligible_at(d.valid_from - Duration::microseconds(1)));
        assert!(!d.is_eligible_at(d.valid_to + Duration::microseconds(1)));
    }

    #[test]
    fn inactive_discount_is_never_eligible() {
        let mut d = new_year_discount();
        d.is_active = false;
        assert!(!d.is_eligible_at(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()));
    }

    #[test]
    fn naive_start_inside_window_is_eligible() {
        let d = new_year_discount();
        let start = crate::shared::time::parse_timestamp("2024-01-01T10:00:00").unwrap();
        assert!(d.is_eligible_at(start));
    }
}
