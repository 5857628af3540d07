use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    domain::{
        lead::LeadStatus,
        status::{
            CREATED_NOTE, KANBAN_SEQUENCE, ServiceOrderStatus, StatusTimestamp, plan_transition,
        },
    },
    dto::orders::{
        AdvanceRequest, CreateServiceOrderRequest, KanbanBoard, KanbanCard, KanbanColumn,
        OrderDetail, OrderList, OrderWithCustomer, ProblemTypeList, UpdateServiceOrderRequest,
        UpdateStatusRequest,
    },
    entity::{
        customers::Entity as Customers,
        leads::{ActiveModel as LeadActive, Entity as Leads},
        problem_types::{Column as ProblemTypeCol, Entity as ProblemTypes},
        service_order_history::{
            ActiveModel as HistoryActive, Column as HistoryCol, Entity as History,
        },
        service_orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as ServiceOrders,
            Model as OrderModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{
        Customer, EntryChecklist, ProblemType, ServiceOrder, ServiceOrderHistory,
    },
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::customer_service::non_blank,
    state::AppState,
};

fn checklist_json(checklist: &EntryChecklist) -> AppResult<serde_json::Value> {
    serde_json::to_value(checklist).map_err(|e| AppError::Internal(e.into()))
}

async fn record_history(
    txn: &DatabaseTransaction,
    order_id: Uuid,
    user_id: Uuid,
    previous: Option<ServiceOrderStatus>,
    status: ServiceOrderStatus,
    notes: Option<String>,
) -> AppResult<()> {
    HistoryActive {
        id: Set(Uuid::new_v4()),
        service_order_id: Set(order_id),
        user_id: Set(Some(user_id)),
        previous_status: Set(previous.map(|s| s.as_str().to_string())),
        new_status: Set(status.as_str().to_string()),
        notes: Set(notes),
        created_at: NotSet,
    }
    .insert(txn)
    .await?;
    Ok(())
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateServiceOrderRequest,
) -> AppResult<ApiResponse<ServiceOrder>> {
    if payload.device_brand.trim().is_empty()
        || payload.device_model.trim().is_empty()
        || payload.problem_description.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Marca, modelo e descrição do problema são obrigatórios".into(),
        ));
    }

    let checklist = checklist_json(&payload.entry_checklist.unwrap_or_default())?;
    let status = ServiceOrderStatus::AwaitingDevice;

    let txn = state.orm.begin().await?;

    if Customers::find_by_id(payload.customer_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("Cliente não encontrado".into()));
    }

    let lead = match payload.lead_id {
        Some(lead_id) => {
            let lead = Leads::find_by_id(lead_id)
                .lock(LockType::Update)
                .one(&txn)
                .await?
                .ok_or(AppError::NotFound)?;
            if lead.status == LeadStatus::Converted.as_str() {
                return Err(AppError::BadRequest(
                    "Este orçamento já foi convertido em ordem de serviço".into(),
                ));
            }
            Some(lead)
        }
        None => None,
    };

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        order_number: NotSet,
        customer_id: Set(payload.customer_id),
        technician_id: Set(None),
        device_brand: Set(payload.device_brand.trim().to_string()),
        device_model: Set(payload.device_model.trim().to_string()),
        device_password: Set(non_blank(payload.device_password)),
        device_imei: Set(non_blank(payload.device_imei)),
        device_color: Set(non_blank(payload.device_color)),
        problem_description: Set(payload.problem_description),
        problem_type_id: Set(payload.problem_type_id),
        diagnosis: Set(None),
        status: Set(status.as_str().to_string()),
        entry_checklist: Set(checklist),
        estimated_price: Set(payload.estimated_price),
        final_price: Set(None),
        parts_cost: NotSet,
        delivery_type: Set(payload.delivery_type.as_str().to_string()),
        delivery_address: Set(non_blank(payload.delivery_address)),
        received_at: Set(None),
        approved_at: Set(None),
        completed_at: Set(None),
        delivered_at: Set(None),
        notes: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    record_history(
        &txn,
        order.id,
        user.user_id,
        None,
        status,
        Some(CREATED_NOTE.to_string()),
    )
    .await?;

    if let Some(lead) = lead {
        let mut lead: LeadActive = lead.into();
        lead.status = Set(LeadStatus::Converted.as_str().to_string());
        lead.converted_order_id = Set(Some(order.id));
        lead.updated_at = Set(Utc::now().fixed_offset());
        lead.update(&txn).await?;
    }

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        order_number = order.order_number,
        lead_id = ?payload.lead_id,
        "service order created"
    );

    Ok(ApiResponse::success(
        "Ordem de serviço criada com sucesso!",
        ServiceOrder::try_from(order)?,
        Some(Meta::empty()),
    ))
}

/// Move a locked order to `target` and write its history row.
async fn apply_transition(
    txn: &DatabaseTransaction,
    user: &AuthUser,
    order: OrderModel,
    target: ServiceOrderStatus,
    notes: Option<String>,
) -> AppResult<OrderModel> {
    let current: ServiceOrderStatus = order.status.parse()?;
    let patch = plan_transition(Some(current), target);
    let now = Utc::now().fixed_offset();

    let mut active: OrderActive = order.into();
    active.status = Set(patch.status.as_str().to_string());
    match patch.stamp {
        Some(StatusTimestamp::ReceivedAt) => active.received_at = Set(Some(now)),
        Some(StatusTimestamp::ApprovedAt) => active.approved_at = Set(Some(now)),
        Some(StatusTimestamp::CompletedAt) => active.completed_at = Set(Some(now)),
        Some(StatusTimestamp::DeliveredAt) => active.delivered_at = Set(Some(now)),
        None => {}
    }
    active.updated_at = Set(now);
    let updated = active.update(txn).await?;

    record_history(
        txn,
        updated.id,
        user.user_id,
        patch.previous,
        patch.status,
        non_blank(notes),
    )
    .await?;

    Ok(updated)
}

async fn lock_order(txn: &DatabaseTransaction, id: Uuid) -> AppResult<OrderModel> {
    ServiceOrders::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn update_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateStatusRequest,
) -> AppResult<ApiResponse<ServiceOrder>> {
    let txn = state.orm.begin().await?;
    let order = lock_order(&txn, id).await?;
    let previous = order.status.clone();
    let updated = apply_transition(&txn, user, order, payload.status, payload.notes).await?;
    txn.commit().await?;

    tracing::info!(
        order_id = %id,
        from = %previous,
        to = %payload.status,
        "service order status changed"
    );

    Ok(ApiResponse::success(
        "Status atualizado com sucesso!",
        ServiceOrder::try_from(updated)?,
        Some(Meta::empty()),
    ))
}

pub async fn advance_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: AdvanceRequest,
) -> AppResult<ApiResponse<ServiceOrder>> {
    let txn = state.orm.begin().await?;
    let order = lock_order(&txn, id).await?;
    let current: ServiceOrderStatus = order.status.parse()?;
    let next = current.next().ok_or_else(|| {
        AppError::BadRequest(format!(
            "A ordem em \"{}\" não pode avançar",
            current.column_title()
        ))
    })?;

    let updated = apply_transition(&txn, user, order, next, payload.notes).await?;
    txn.commit().await?;

    tracing::info!(order_id = %id, from = %current, to = %next, "service order advanced");

    Ok(ApiResponse::success(
        "Status atualizado com sucesso!",
        ServiceOrder::try_from(updated)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status.as_str()));
    }

    let total = ServiceOrders::find()
        .filter(condition.clone())
        .count(&state.orm)
        .await? as i64;

    let mut finder = ServiceOrders::find()
        .filter(condition)
        .find_also_related(Customers);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(order, customer)| {
            Ok(OrderWithCustomer {
                order: ServiceOrder::try_from(order)?,
                customer: customer.map(Customer::from),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Ordens de serviço",
        OrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderDetail>> {
    let (order, customer) = ServiceOrders::find_by_id(id)
        .find_also_related(Customers)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let history = History::find()
        .filter(HistoryCol::ServiceOrderId.eq(id))
        .order_by_asc(HistoryCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ServiceOrderHistory::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(
        "OK",
        OrderDetail {
            order: ServiceOrder::try_from(order)?,
            customer: customer.map(Customer::from),
            history,
        },
        None,
    ))
}

pub async fn update_order(
    state: &AppState,
    id: Uuid,
    payload: UpdateServiceOrderRequest,
) -> AppResult<ApiResponse<ServiceOrder>> {
    let existing = ServiceOrders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    if let Some(technician_id) = payload.technician_id {
        active.technician_id = Set(Some(technician_id));
    }
    if let Some(diagnosis) = payload.diagnosis {
        active.diagnosis = Set(non_blank(Some(diagnosis)));
    }
    if let Some(checklist) = payload.entry_checklist {
        active.entry_checklist = Set(checklist_json(&checklist)?);
    }
    if let Some(price) = payload.estimated_price {
        active.estimated_price = Set(Some(price));
    }
    if let Some(price) = payload.final_price {
        active.final_price = Set(Some(price));
    }
    if let Some(cost) = payload.parts_cost {
        active.parts_cost = Set(cost);
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(non_blank(Some(notes)));
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let order = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Ordem de serviço atualizada!",
        ServiceOrder::try_from(order)?,
        Some(Meta::empty()),
    ))
}

pub async fn kanban_board(state: &AppState) -> AppResult<ApiResponse<KanbanBoard>> {
    let statuses: Vec<&str> = KANBAN_SEQUENCE.iter().map(|s| s.as_str()).collect();
    let rows = ServiceOrders::find()
        .filter(OrderCol::Status.is_in(statuses))
        .find_also_related(Customers)
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut columns: Vec<KanbanColumn> = KANBAN_SEQUENCE
        .iter()
        .map(|status| KanbanColumn {
            status: *status,
            title: status.column_title().to_string(),
            cards: Vec::new(),
        })
        .collect();

    for (order, customer) in rows {
        let status: ServiceOrderStatus = order.status.parse()?;
        let Some(column) = columns.iter_mut().find(|c| c.status == status) else {
            continue;
        };
        column.cards.push(KanbanCard {
            id: order.id,
            order_number: order.order_number,
            device_brand: order.device_brand,
            device_model: order.device_model,
            problem_description: order.problem_description,
            customer_name: customer.map(|c| c.name),
            final_price: order.final_price,
            next_status: status.next(),
        });
    }

    Ok(ApiResponse::success("OK", KanbanBoard { columns }, None))
}

pub async fn list_problem_types(state: &AppState) -> AppResult<ApiResponse<ProblemTypeList>> {
    let items = ProblemTypes::find()
        .filter(ProblemTypeCol::IsActive.eq(true))
        .order_by_asc(ProblemTypeCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ProblemType::from)
        .collect();

    Ok(ApiResponse::success("OK", ProblemTypeList { items }, None))
}
