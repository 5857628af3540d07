use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::dashboard::DashboardKpis, error::AppResult, middleware::auth::AuthUser,
    response::ApiResponse, services::dashboard_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Month-to-date KPIs", body = ApiResponse<DashboardKpis>)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardKpis>>> {
    let resp = dashboard_service::dashboard(&state).await?;
    Ok(Json(resp))
}
