use rental_core::http::{routing, Json, Path, Router, State, StatusCode};
use rental_core::managed::ManagedResource;
use rental_core::{validate, HttpError};
use rental_data::{
    Order, OrderBillComparison, OrderDaily, OrderInfo, OrderItem, OrderStatistics,
    OrderUserDetail,
};
use rental_data_sqlx::Tx;
use sqlx::Sqlite;

use crate::models::{CreateOrderRequest, UpdateStatusRequest};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, HttpError>;
type StatusTx = Tx<'static, Sqlite>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", routing::get(list).post(create))
        .route("/orders/details", routing::get(details))
        .route("/orders/statistics", routing::get(statistics))
        .route("/orders/reports", routing::get(reports))
        .route("/orders/info", routing::get(info))
        .route("/orders/bill-comparison", routing::get(bill_comparison))
        .route("/orders/{id}", routing::get(get_one))
        .route("/orders/{id}/items", routing::get(items))
        .route("/orders/{id}/status", routing::put(update_status))
        .route("/users/{id}/orders", routing::get(by_user))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), HttpError> {
    validate(&body)?;
    let order = state
        .order_service
        .place_order(&body.to_new_order(), &body.vehicle_ids)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    Ok(Json(state.order_service.list().await?))
}

async fn get_one(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Order> {
    Ok(Json(state.order_service.find(id).await?))
}

async fn items(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<OrderItem>> {
    Ok(Json(state.order_service.items(id).await?))
}

/// The status change runs in a request-scoped transaction, committed only
/// when the update succeeds.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusRequest>,
) -> ApiResult<Order> {
    validate(&body)?;

    let mut tx = <StatusTx as ManagedResource<AppState>>::acquire(&state).await?;
    let result = state
        .order_service
        .change_status(&mut tx, id, &body.status)
        .await;
    <StatusTx as ManagedResource<AppState>>::release(tx, result.is_ok()).await?;
    result?;

    Ok(Json(state.order_service.find(id).await?))
}

async fn by_user(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<Order>> {
    Ok(Json(state.order_service.by_user(id).await?))
}

async fn details(State(state): State<AppState>) -> ApiResult<Vec<OrderUserDetail>> {
    Ok(Json(state.order_service.details().await?))
}

async fn statistics(State(state): State<AppState>) -> ApiResult<Vec<OrderStatistics>> {
    Ok(Json(state.order_service.statistics().await?))
}

async fn reports(State(state): State<AppState>) -> ApiResult<Vec<OrderDaily>> {
    Ok(Json(state.order_service.daily_reports().await?))
}

async fn info(State(state): State<AppState>) -> ApiResult<Vec<OrderInfo>> {
    Ok(Json(state.order_service.info().await?))
}

async fn bill_comparison(State(state): State<AppState>) -> ApiResult<Vec<OrderBillComparison>> {
    Ok(Json(state.order_service.bill_comparison().await?))
}
