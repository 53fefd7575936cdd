use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{error::Result, middleware::auth::Claims, models::notification::Notification, AppState};

#[utoipa::path(
    get,
    path = "/api/notifications",
    responses((status = 200, description = "Caller's notifications, newest first", body = [Notification]))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let notifications = state
        .notification_service
        .list_for_user(claims.user_id()?)
        .await?;
    Ok(Json(notifications))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{notification_id}/read",
    params(("notification_id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 404, description = "No such notification for the caller")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(notification_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let notification = state
        .notification_service
        .mark_read(notification_id, claims.user_id()?)
        .await?;
    Ok(Json(notification))
}
