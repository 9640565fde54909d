use utoipa::OpenApi;

use crate::{
    api::models::{
        AddExpenseRequest, AddMemberRequest, ComputeBalancesRequest, CreateGroupRequest, CreateSettlementRequest,
        ErrorResponse, ExpenseRowRecord, SettlementRecord, UpdateExpenseRequest, UpdateGroupRequest,
    },
    core::models::{
        ActivityEntry, BalanceSheet, CustomShare, Expense, ExpenseSplit, Group, GroupSummary, Member, MemberBalance,
        Settlement, SimplifiedDebt, SplitSpec,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_group,
        super::handlers::list_groups,
        super::handlers::get_group,
        super::handlers::update_group,
        super::handlers::delete_group,
        super::handlers::add_member,
        super::handlers::remove_member,
        super::handlers::add_expense,
        super::handlers::list_expenses,
        super::handlers::get_expense,
        super::handlers::update_expense,
        super::handlers::delete_expense,
        super::handlers::create_settlement,
        super::handlers::list_settlements,
        super::handlers::get_group_balances,
        super::handlers::compute_balances,
        super::handlers::get_activity
    ),
    components(schemas(
        CreateGroupRequest,
        UpdateGroupRequest,
        AddMemberRequest,
        AddExpenseRequest,
        UpdateExpenseRequest,
        CreateSettlementRequest,
        ComputeBalancesRequest,
        ExpenseRowRecord,
        SettlementRecord,
        ErrorResponse,
        Group,
        GroupSummary,
        Member,
        Expense,
        ExpenseSplit,
        SplitSpec,
        CustomShare,
        Settlement,
        ActivityEntry,
        MemberBalance,
        SimplifiedDebt,
        BalanceSheet
    )),
    info(
        title = "Group Ledger API",
        description = "API for recording shared expenses and settling group balances",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
