//! Rental domain entity

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub id: i32,
    pub user_id: i32,
    pub bicycle_id: i32,
    pub rental_start_time: DateTime<Utc>,
    /// Planned end of the rental
    pub rental_end_time: DateTime<Utc>,
    /// Set once the bicycle is brought back
    pub actual_return_time: Option<DateTime<Utc>>,
    /// Supplied by the caller, not computed here
    pub total_price: f64,
    pub discount_id: Option<i32>,
}

impl Rental {
    pub fn is_returned(&self) -> bool {
        self.actual_return_time.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewRental {
    pub user_id: i32,
    pub bicycle_id: i32,
    pub rental_start_time: DateTime<Utc>,
    pub rental_end_time: DateTime<Utc>,
    pub actual_return_time: Option<DateTime<Utc>>,
    pub total_price: f64,
    pub discount_id: Option<i32>,
}

/// Partial update of a rental. Nullable columns use `Option<Option<_>>`:
/// `Some(None)` clears the value, `None` keeps it.
#[derive(Debug, Clone, Default)]
pub struct RentalPatch {
    pub user_id: Option<i32>,
    pub bicycle_id: Option<i32>,
    pub rental_start_time: Option<DateTime<Utc>>,
    pub rental_end_time: Option<DateTime<Utc>>,
    pub actual_return_time: Option<Option<DateTime<Utc>>>,
    pub total_price: Option<f64>,
    pub discount_id: Option<Option<i32>>,
}

impl RentalPatch {
    /// New bicycle referenced by the patch, when it differs from the current one.
    pub fn changed_bicycle(&self, current: &Rental) -> Option<i32> {
        self.bicycle_id.filter(|id| *id != current.bicycle_id)
    }

    /// New discount referenced by the patch, when it differs from the current one.
    /// Clearing the discount is not a change that needs checking.
    pub fn changed_discount(&self, current: &Rental) -> Option<i32> {
        self.discount_id
            .flatten()
            .filter(|id| Some(*id) != current.discount_id)
    }

    /// Whether applying the patch records the return of a bicycle that was still out.
    pub fn records_return(&self, current: &Rental) -> bool {
        !current.is_returned() && matches!(self.actual_return_time, Some(Some(_)))
    }

    pub fn apply(self, rental: &mut Rental) {
        if let Some(user_id) = self.user_id {
            rental.user_id = user_id;
        }
        if let Some(bicycle_id) = self.bicycle_id {
            rental.bicycle_id = bicycle_id;
        }
        if let Some(start) = self.rental_start_time {
            rental.rental_start_time = start;
        }
        if let Some(end) = self.rental_end_time {
            rental.rental_end_time = end;
        }
        if let Some(returned) = self.actual_return_time {
            rental.actual_return_time = returned;
        }
        if let Some(price) = self.total_price {
            rental.total_price = price;
        }
        if let Some(discount) = self.discount_id {
            rental.discount_id = discount;
        }
    }
}
