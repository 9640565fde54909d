use crate::{
    api::{AppService, models::*},
    core::models::{ActivityEntry, BalanceSheet, Expense, Group, GroupSummary, LedgerSnapshot, Member, Settlement},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use std::sync::Arc;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/groups", post(create_group).get(list_groups))
        .route("/groups/{group_id}", get(get_group).put(update_group).delete(delete_group))
        .route("/groups/{group_id}/members", post(add_member))
        .route("/members/{member_id}", delete(remove_member))
        .route("/expenses", post(add_expense).get(list_expenses))
        .route(
            "/expenses/{expense_id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
        .route("/settlements", post(create_settlement).get(list_settlements))
        .route("/balances/compute", post(compute_balances))
        .route("/balances/{group_id}", get(get_group_balances))
        .route("/activity", get(get_activity))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created successfully", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn create_group(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service.create_group(&req.name, req.description).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group to retrieve")
    ),
    responses(
        (status = 200, description = "Group retrieved successfully", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.get_group(&group_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "All groups, newest first", body = Vec<GroupSummary>)
    )
)]
pub(crate) async fn list_groups(State(service): State<Arc<AppService>>) -> Result<Json<Vec<GroupSummary>>, ApiError> {
    Ok(Json(service.list_groups().await?))
}

#[utoipa::path(
    put,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group to update")
    ),
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "Group updated", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn update_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.update_group(&group_id, &req.name, req.description).await?))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group to delete")
    ),
    responses(
        (status = 204, description = "Group deleted with its expenses and settlements"),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_group(&group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added successfully", body = Member),
        (status = 400, description = "Member name is required", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn add_member(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<Member>), ApiError> {
    let member = service.add_member(&group_id, &req.name).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    delete,
    path = "/api/members/{member_id}",
    params(
        ("member_id" = String, Path, description = "ID of the member to remove")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 404, description = "Member not found", body = ErrorResponse),
        (status = 409, description = "Member still has expenses or settlements", body = ErrorResponse)
    )
)]
pub(crate) async fn remove_member(
    State(service): State<Arc<AppService>>,
    Path(member_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.remove_member(&member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = AddExpenseRequest,
    responses(
        (status = 201, description = "Expense created successfully", body = Expense),
        (status = 400, description = "Invalid amount or split", body = ErrorResponse),
        (status = 403, description = "Payer is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn add_expense(
    State(service): State<Arc<AppService>>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let expense = service.add_expense(req.into()).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    get,
    path = "/api/expenses",
    params(ExpenseQuery),
    responses(
        (status = 200, description = "Expenses of the group, newest first", body = Vec<Expense>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn list_expenses(
    State(service): State<Arc<AppService>>,
    Query(query): Query<ExpenseQuery>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    Ok(Json(service.list_expenses(&query.group_id, &query.filter()).await?))
}

#[utoipa::path(
    get,
    path = "/api/expenses/{expense_id}",
    params(
        ("expense_id" = String, Path, description = "ID of the expense")
    ),
    responses(
        (status = 200, description = "Expense with its splits", body = Expense),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_expense(
    State(service): State<Arc<AppService>>,
    Path(expense_id): Path<String>,
) -> Result<Json<Expense>, ApiError> {
    Ok(Json(service.get_expense(&expense_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/expenses/{expense_id}",
    params(
        ("expense_id" = String, Path, description = "ID of the expense to update")
    ),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Expense updated and splits rebuilt", body = Expense),
        (status = 400, description = "Invalid amount or split", body = ErrorResponse),
        (status = 403, description = "Payer is not a group member", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub(crate) async fn update_expense(
    State(service): State<Arc<AppService>>,
    Path(expense_id): Path<String>,
    Json(req): Json<UpdateExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    Ok(Json(service.update_expense(&expense_id, req.into()).await?))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{expense_id}",
    params(
        ("expense_id" = String, Path, description = "ID of the expense to delete")
    ),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_expense(
    State(service): State<Arc<AppService>>,
    Path(expense_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_expense(&expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/settlements",
    request_body = CreateSettlementRequest,
    responses(
        (status = 201, description = "Settlement recorded", body = Settlement),
        (status = 400, description = "Invalid amount or self settlement", body = ErrorResponse),
        (status = 403, description = "Member is not in the group", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn create_settlement(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateSettlementRequest>,
) -> Result<(StatusCode, Json<Settlement>), ApiError> {
    let settlement = service.record_settlement(req.into()).await?;
    Ok((StatusCode::CREATED, Json(settlement)))
}

#[utoipa::path(
    get,
    path = "/api/settlements",
    params(GroupQuery),
    responses(
        (status = 200, description = "Settlements of the group, newest first", body = Vec<Settlement>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn list_settlements(
    State(service): State<Arc<AppService>>,
    Query(query): Query<GroupQuery>,
) -> Result<Json<Vec<Settlement>>, ApiError> {
    Ok(Json(service.list_settlements(&query.group_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/balances/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Member balances and suggested payments", body = BalanceSheet),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group_balances(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<BalanceSheet>, ApiError> {
    Ok(Json(service.get_group_balances(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/balances/compute",
    request_body = ComputeBalancesRequest,
    responses(
        (status = 200, description = "Balances for the supplied ledger rows", body = BalanceSheet)
    )
)]
pub(crate) async fn compute_balances(
    State(service): State<Arc<AppService>>,
    Json(req): Json<ComputeBalancesRequest>,
) -> Json<BalanceSheet> {
    let snapshot = LedgerSnapshot::from(req);
    Json(service.compute_balances(&snapshot))
}

#[utoipa::path(
    get,
    path = "/api/activity",
    params(GroupQuery),
    responses(
        (status = 200, description = "Activity feed of the group, newest first", body = Vec<ActivityEntry>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_activity(
    State(service): State<Arc<AppService>>,
    Query(query): Query<GroupQuery>,
) -> Result<Json<Vec<ActivityEntry>>, ApiError> {
    Ok(Json(service.get_activity(&query.group_id).await?))
}
