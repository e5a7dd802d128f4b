use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Well-known order status labels.
///
/// The status column is free text; these are the values the CRM writes itself.
pub mod status {
    pub const PENDING: &str = "PENDING";
    pub const CONFIRMED: &str = "CONFIRMED";
    pub const CANCELLED: &str = "CANCELLED";
}

/// A rental order. Line items are not loaded with it; fetch them separately.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub bill: f64,
    pub status: String,
    pub start_date: NaiveDate,
}

/// Insert payload for an [`Order`]; the identifier is generated by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: i64,
    pub bill: f64,
    pub status: String,
    pub start_date: NaiveDate,
}

impl NewOrder {
    /// A new order in the `PENDING` state.
    pub fn pending(user_id: i64, bill: f64, start_date: NaiveDate) -> Self {
        Self {
            user_id,
            bill,
            status: status::PENDING.to_string(),
            start_date,
        }
    }
}

/// A line entry linking an order to a rented car.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub car_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
}
