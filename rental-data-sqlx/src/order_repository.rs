use rental_data::{
    NewOrder, Order, OrderBillComparison, OrderDaily, OrderInfo, OrderItem, OrderStatistics,
    OrderUserDetail, DataError,
};
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{SqlxErrorExt, SqlxResult};
use crate::tx::{HasPool, Tx};

/// Statement templates. Every value reaches the store as a bound parameter.
mod sql {
    pub const INSERT_ORDER: &str = "INSERT INTO orders (user_id, bill, status, start_date) \
         VALUES (?, ?, ?, ?) \
         RETURNING id, user_id, bill, status, start_date";

    pub const INSERT_ORDER_ITEM: &str = "INSERT INTO order_items (order_id, car_id) VALUES (?, ?)";

    pub const UPDATE_ORDER_STATUS: &str = "UPDATE orders SET status = ? WHERE id = ?";

    pub const SELECT_ORDER: &str =
        "SELECT id, user_id, bill, status, start_date FROM orders WHERE id = ?";

    pub const SELECT_ORDERS: &str =
        "SELECT id, user_id, bill, status, start_date FROM orders ORDER BY id";

    pub const SELECT_ORDER_ITEMS: &str =
        "SELECT id, order_id, car_id FROM order_items WHERE order_id = ? ORDER BY id";

    pub const SELECT_ORDERS_BY_USER: &str =
        "SELECT id, user_id, bill, status, start_date FROM orders WHERE user_id = ? ORDER BY id";

    pub const SELECT_ORDERS_DETAILS: &str = "SELECT o.id AS order_id, u.name AS user_name, o.bill AS bill \
         FROM orders o INNER JOIN users u ON o.user_id = u.id \
         ORDER BY o.id";

    pub const SELECT_STATISTICS_BY_USERS: &str = "SELECT u.id AS user_id, u.name AS user_name, SUM(o.bill) AS total_bill \
         FROM orders o INNER JOIN users u ON o.user_id = u.id \
         GROUP BY u.id, u.name \
         ORDER BY u.id";

    pub const SELECT_DAILY_REPORTS: &str = "SELECT SUM(bill) AS total_bill, COUNT(id) AS order_count, start_date AS day \
         FROM orders \
         GROUP BY start_date \
         ORDER BY start_date DESC";

    pub const SELECT_ORDERS_INFO: &str = "SELECT id, user_id, bill FROM orders ORDER BY id";

    pub const SELECT_BILL_COMPARISON: &str = "SELECT id, user_id, bill, \
         AVG(bill) OVER (PARTITION BY user_id) AS user_average_bill \
         FROM orders \
         ORDER BY user_id, id";
}

/// Data access for rental orders and their line items.
///
/// Reads go straight to the pool. Writes run inside a [`Tx`]: either one the
/// repository opens and commits itself ([`add_order`](Self::add_order)) or one
/// supplied by the caller, which decides when to commit.
#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl HasPool<Sqlite> for OrderRepository {
    fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an order and one line item per vehicle, atomically.
    ///
    /// The order row is written first so its generated id can be stamped on
    /// each item. If any insert fails, nothing from this call persists.
    pub async fn add_order(&self, order: &NewOrder, vehicle_ids: &[i64]) -> SqlxResult<Order> {
        let mut tx = Tx::begin(&self.pool).await?;
        let created = self.insert_order(&mut tx, order, vehicle_ids).await?;
        tx.commit().await?;

        info!(
            order_id = created.id,
            user_id = created.user_id,
            items = vehicle_ids.len(),
            "order created"
        );
        Ok(created)
    }

    /// The inserts of [`add_order`](Self::add_order) against a caller-owned
    /// transaction. Nothing is committed here.
    pub async fn insert_order(
        &self,
        tx: &mut Tx<'_, Sqlite>,
        order: &NewOrder,
        vehicle_ids: &[i64],
    ) -> SqlxResult<Order> {
        let created = sqlx::query_as::<_, Order>(sql::INSERT_ORDER)
            .bind(order.user_id)
            .bind(order.bill)
            .bind(&order.status)
            .bind(order.start_date)
            .fetch_one(tx.as_mut())
            .await
            .map_err(SqlxErrorExt::into_data_error)?;

        for car_id in vehicle_ids {
            sqlx::query(sql::INSERT_ORDER_ITEM)
                .bind(created.id)
                .bind(car_id)
                .execute(tx.as_mut())
                .await
                .map_err(|e| {
                    debug!(order_id = created.id, car_id, error = %e, "line item insert failed");
                    e.into_data_error()
                })?;
        }

        Ok(created)
    }

    /// Overwrite the status of an order inside the caller's transaction.
    ///
    /// The change becomes visible when the caller commits `tx`. Returns
    /// `DataError::NotFound` when no order has this id.
    pub async fn update_order_status(
        &self,
        tx: &mut Tx<'_, Sqlite>,
        id: i64,
        status: &str,
    ) -> SqlxResult<()> {
        let result = sqlx::query(sql::UPDATE_ORDER_STATUS)
            .bind(status)
            .bind(id)
            .execute(tx.as_mut())
            .await
            .map_err(SqlxErrorExt::into_data_error)?;

        if result.rows_affected() == 0 {
            return Err(DataError::NotFound(format!("order {id}")));
        }
        debug!(order_id = id, status, "order status updated");
        Ok(())
    }

    /// Point lookup; `Ok(None)` when no order has this id.
    pub async fn get_order(&self, id: i64) -> SqlxResult<Option<Order>> {
        sqlx::query_as::<_, Order>(sql::SELECT_ORDER)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    /// Every order, without line items.
    pub async fn get_orders(&self) -> SqlxResult<Vec<Order>> {
        sqlx::query_as::<_, Order>(sql::SELECT_ORDERS)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    pub async fn get_order_items(&self, order_id: i64) -> SqlxResult<Vec<OrderItem>> {
        sqlx::query_as::<_, OrderItem>(sql::SELECT_ORDER_ITEMS)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    pub async fn get_orders_by_user(&self, user_id: i64) -> SqlxResult<Vec<Order>> {
        sqlx::query_as::<_, Order>(sql::SELECT_ORDERS_BY_USER)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    /// Orders joined with their user's name. Orders whose user does not
    /// exist are left out.
    pub async fn get_orders_details(&self) -> SqlxResult<Vec<OrderUserDetail>> {
        sqlx::query_as::<_, OrderUserDetail>(sql::SELECT_ORDERS_DETAILS)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    /// One row per user with the sum of that user's bills.
    pub async fn get_orders_statistic_by_users(&self) -> SqlxResult<Vec<OrderStatistics>> {
        sqlx::query_as::<_, OrderStatistics>(sql::SELECT_STATISTICS_BY_USERS)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    /// Takings and order count per start date, newest date first.
    pub async fn get_order_reports(&self) -> SqlxResult<Vec<OrderDaily>> {
        sqlx::query_as::<_, OrderDaily>(sql::SELECT_DAILY_REPORTS)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    pub async fn get_orders_info(&self) -> SqlxResult<Vec<OrderInfo>> {
        sqlx::query_as::<_, OrderInfo>(sql::SELECT_ORDERS_INFO)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    /// Each order's bill next to the average bill of its user, computed with a
    /// window over the user's orders.
    pub async fn get_bill_comparison(&self) -> SqlxResult<Vec<OrderBillComparison>> {
        let rows = sqlx::query_as::<_, OrderBillComparison>(sql::SELECT_BILL_COMPARISON)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;

        for row in &rows {
            debug!(
                order_id = row.id,
                user_id = row.user_id,
                bill = row.bill,
                user_average_bill = row.user_average_bill,
                "bill comparison"
            );
        }
        Ok(rows)
    }
}
