use rental_data::{
    DataError, NewOrder, Order, OrderBillComparison, OrderDaily, OrderInfo, OrderItem,
    OrderStatistics, OrderUserDetail,
};
use rental_data_sqlx::{OrderRepository, SqlxResult, Tx};
use sqlx::{Sqlite, SqlitePool};

/// Order use cases on top of [`OrderRepository`].
#[derive(Clone)]
pub struct OrderService {
    repository: OrderRepository,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: OrderRepository::new(pool),
        }
    }

    pub async fn place_order(&self, order: &NewOrder, vehicle_ids: &[i64]) -> SqlxResult<Order> {
        self.repository.add_order(order, vehicle_ids).await
    }

    /// Fails with `NotFound` when the order does not exist.
    pub async fn find(&self, id: i64) -> SqlxResult<Order> {
        self.repository
            .get_order(id)
            .await?
            .ok_or_else(|| DataError::NotFound(format!("Order {id} not found")))
    }

    pub async fn list(&self) -> SqlxResult<Vec<Order>> {
        self.repository.get_orders().await
    }

    /// Line items of an existing order.
    pub async fn items(&self, order_id: i64) -> SqlxResult<Vec<OrderItem>> {
        self.find(order_id).await?;
        self.repository.get_order_items(order_id).await
    }

    pub async fn by_user(&self, user_id: i64) -> SqlxResult<Vec<Order>> {
        self.repository.get_orders_by_user(user_id).await
    }

    pub async fn change_status(
        &self,
        tx: &mut Tx<'_, Sqlite>,
        id: i64,
        status: &str,
    ) -> SqlxResult<()> {
        self.repository.update_order_status(tx, id, status).await
    }

    pub async fn details(&self) -> SqlxResult<Vec<OrderUserDetail>> {
        self.repository.get_orders_details().await
    }

    pub async fn statistics(&self) -> SqlxResult<Vec<OrderStatistics>> {
        self.repository.get_orders_statistic_by_users().await
    }

    pub async fn daily_reports(&self) -> SqlxResult<Vec<OrderDaily>> {
        self.repository.get_order_reports().await
    }

    pub async fn info(&self) -> SqlxResult<Vec<OrderInfo>> {
        self.repository.get_orders_info().await
    }

    pub async fn bill_comparison(&self) -> SqlxResult<Vec<OrderBillComparison>> {
        self.repository.get_bill_comparison().await
    }
}
