use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    domain::lead::{LeadStatus, converted_order_for},
    dto::{
        customers::CreatedId,
        leads::{CreateLeadRequest, LeadList, UpdateLeadStatusRequest},
    },
    entity::{
        leads::{ActiveModel as LeadActive, Column as LeadCol, Entity as Leads},
        service_orders::Entity as ServiceOrders,
    },
    error::{AppError, AppResult},
    models::Lead,
    response::{ApiResponse, Meta},
    routes::params::LeadListQuery,
    services::customer_service::non_blank,
    state::AppState,
};

pub async fn create_lead(
    state: &AppState,
    payload: CreateLeadRequest,
) -> AppResult<ApiResponse<CreatedId>> {
    let required = [
        &payload.customer_name,
        &payload.customer_phone,
        &payload.device_brand,
        &payload.device_model,
        &payload.problem_type,
    ];
    if required.iter().any(|v| v.trim().is_empty()) {
        return Err(AppError::BadRequest(
            "Preencha nome, telefone, aparelho e problema".into(),
        ));
    }

    let lead = LeadActive {
        id: Set(Uuid::new_v4()),
        customer_name: Set(payload.customer_name.trim().to_string()),
        customer_phone: Set(payload.customer_phone.trim().to_string()),
        device_brand: Set(payload.device_brand.trim().to_string()),
        device_model: Set(payload.device_model.trim().to_string()),
        device_password: Set(non_blank(payload.device_password)),
        problem_type: Set(payload.problem_type),
        problem_description: Set(non_blank(payload.problem_description)),
        delivery_type: Set(payload.delivery_type.as_str().to_string()),
        delivery_address: Set(non_blank(payload.delivery_address)),
        status: Set(LeadStatus::Pending.as_str().to_string()),
        converted_order_id: Set(None),
        notes: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(lead_id = %lead.id, problem_type = %lead.problem_type, "lead received");

    Ok(ApiResponse::success(
        "Orçamento enviado com sucesso! Entraremos em contato em breve.",
        CreatedId { id: lead.id },
        Some(Meta::empty()),
    ))
}

pub async fn list_leads(
    state: &AppState,
    query: LeadListQuery,
) -> AppResult<ApiResponse<LeadList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(LeadCol::Status.eq(status.as_str()));
    }

    let finder = Leads::find()
        .filter(condition)
        .order_by_desc(LeadCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let pending = Leads::find()
        .filter(LeadCol::Status.eq(LeadStatus::Pending.as_str()))
        .count(&state.orm)
        .await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Lead::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(
        "Leads",
        LeadList { items, pending },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn update_lead_status(
    state: &AppState,
    id: Uuid,
    payload: UpdateLeadStatusRequest,
) -> AppResult<ApiResponse<Lead>> {
    let converted_order_id = converted_order_for(payload.status, payload.converted_order_id)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if let Some(order_id) = converted_order_id {
        if ServiceOrders::find_by_id(order_id)
            .one(&state.orm)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest("Ordem de serviço não encontrada".into()));
        }
    }

    let lead = Leads::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: LeadActive = lead.into();
    active.status = Set(payload.status.as_str().to_string());
    active.converted_order_id = Set(converted_order_id);
    active.updated_at = Set(Utc::now().fixed_offset());
    let lead = active.update(&state.orm).await?;

    tracing::info!(lead_id = %id, status = %payload.status, "lead status updated");

    Ok(ApiResponse::success(
        "Lead atualizado!",
        Lead::try_from(lead)?,
        Some(Meta::empty()),
    ))
}
