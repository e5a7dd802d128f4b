use chrono::NaiveDate;
use garde::Validate;
use rental_data::{status, NewOrder};
use serde::Deserialize;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[garde(range(min = 1))]
    pub user_id: i64,
    #[garde(range(min = 0.0))]
    pub bill: f64,
    /// Defaults to `PENDING`.
    #[garde(length(min = 1, max = 32))]
    pub status: Option<String>,
    #[garde(skip)]
    pub start_date: NaiveDate,
    /// Cars rented with this order, one line item each.
    #[serde(default)]
    #[garde(skip)]
    pub vehicle_ids: Vec<i64>,
}

impl CreateOrderRequest {
    pub fn to_new_order(&self) -> NewOrder {
        NewOrder {
            user_id: self.user_id,
            bill: self.bill,
            status: self
                .status
                .clone()
                .unwrap_or_else(|| status::PENDING.to_string()),
            start_date: self.start_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[garde(length(min = 1, max = 32))]
    pub status: String,
}
