use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        customers::CreatedId,
        leads::{CreateLeadRequest, LeadList, UpdateLeadStatusRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Lead,
    response::ApiResponse,
    routes::params::LeadListQuery,
    services::lead_service,
    state::AppState,
};

/// Pre-quote form posted from the public site.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", post(create_lead))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leads))
        .route("/{id}/status", patch(update_lead_status))
}

#[utoipa::path(
    post,
    path = "/api/leads",
    request_body = CreateLeadRequest,
    responses(
        (status = 200, description = "Lead received", body = ApiResponse<CreatedId>),
        (status = 400, description = "Missing required fields")
    ),
    security(()),
    tag = "Leads"
)]
pub async fn create_lead(
    State(state): State<AppState>,
    Json(payload): Json<CreateLeadRequest>,
) -> AppResult<Json<ApiResponse<CreatedId>>> {
    let resp = lead_service::create_lead(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/leads",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "pending, contacted, converted or rejected"),
    ),
    responses(
        (status = 200, description = "Leads, newest first", body = ApiResponse<LeadList>)
    ),
    tag = "Leads"
)]
pub async fn list_leads(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<LeadListQuery>,
) -> AppResult<Json<ApiResponse<LeadList>>> {
    let resp = lead_service::list_leads(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/leads/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Lead ID")
    ),
    request_body = UpdateLeadStatusRequest,
    responses(
        (status = 200, description = "Lead updated", body = ApiResponse<Lead>),
        (status = 400, description = "Converted without an order"),
        (status = 404, description = "Lead not found")
    ),
    tag = "Leads"
)]
pub async fn update_lead_status(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadStatusRequest>,
) -> AppResult<Json<ApiResponse<Lead>>> {
    let resp = lead_service::update_lead_status(&state, id, payload).await?;
    Ok(Json(resp))
}
