//! Order lifecycle handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use vastra_core::{OrderId, ReturnKind};

use crate::db::SurveyRepository;
use crate::error::Result;
use crate::middleware::{OptionalAuth, RequireAdmin, RequireAuth};
use crate::models::{AbandonmentSurvey, NewOrder, NewSurvey, Order, OrderWithUser};
use crate::services::OrderService;
use crate::state::AppState;

/// Shipping details supplied when marking an order shipped.
#[derive(Debug, Deserialize)]
pub struct ShipBody {
    pub courier: String,
    #[serde(rename = "trackingId")]
    pub tracking_id: String,
}

/// Return/exchange request body.
#[derive(Debug, Deserialize)]
pub struct ReturnBody {
    pub kind: ReturnKind,
    pub reason: String,
}

/// `POST /api/orders`
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>)> {
    let service = OrderService::new(state.pool());
    let order = service.create_order(user.id, &body).await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %user.id,
        payment_method = %order.payment_method,
        "order placed"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders/myorders`
pub async fn my_orders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let service = OrderService::new(state.pool());
    let orders = service.list_my_orders(user.id).await?;
    Ok(Json(orders))
}

/// `GET /api/orders` (admin)
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderWithUser>>> {
    let service = OrderService::new(state.pool());
    let orders = service.list_all_orders().await?;
    Ok(Json(orders))
}

/// `PUT /api/orders/{id}/ship` (admin)
pub async fn ship(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ShipBody>,
) -> Result<Json<Order>> {
    let service = OrderService::new(state.pool());
    let order = service
        .ship(OrderId::new(id), &body.courier, &body.tracking_id)
        .await?;
    Ok(Json(order))
}

/// `PUT /api/orders/{id}/deliver` (admin)
pub async fn deliver(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Order>> {
    let service = OrderService::new(state.pool());
    let order = service.deliver(OrderId::new(id), Utc::now()).await?;
    Ok(Json(order))
}

/// `POST /api/orders/{id}/return`
pub async fn request_return(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ReturnBody>,
) -> Result<Json<Order>> {
    let service = OrderService::new(state.pool());
    let order = service
        .request_return(OrderId::new(id), user.id, body.kind, &body.reason, Utc::now())
        .await?;
    Ok(Json(order))
}

/// `POST /api/orders/abandonment`
///
/// Accepts both guests and logged-in users; the user is attached when a
/// valid token accompanies the request.
pub async fn abandonment(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
    Json(body): Json<NewSurvey>,
) -> Result<(StatusCode, Json<AbandonmentSurvey>)> {
    let repo = SurveyRepository::new(state.pool());
    let survey = repo.create(user.map(|u| u.id), &body).await?;
    Ok((StatusCode::CREATED, Json(survey)))
}
