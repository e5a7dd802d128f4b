//! Query-shaped read models. None of these is persisted; each is computed by
//! one query in the repository.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An order joined with the name of the user who placed it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderUserDetail {
    pub order_id: i64,
    pub user_name: String,
    pub bill: f64,
}

/// Money spent by one user across all of their orders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderStatistics {
    pub user_id: i64,
    pub user_name: String,
    pub total_bill: f64,
}

/// Takings and order count for one start date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderDaily {
    pub total_bill: f64,
    pub order_count: i64,
    pub day: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderInfo {
    pub id: i64,
    pub user_id: i64,
    pub bill: f64,
}

/// An order's bill next to the average bill of the user who placed it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderBillComparison {
    pub id: i64,
    pub user_id: i64,
    pub bill: f64,
    pub user_average_bill: f64,
}

impl OrderBillComparison {
    /// How far this order's bill sits above (positive) or below the user's average.
    pub fn deviation(&self) -> f64 {
        self.bill - self.user_average_bill
    }
}
