// Activity action types.
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const GROUP_UPDATED: &str = "GROUP_UPDATED";
pub const MEMBER_ADDED: &str = "MEMBER_ADDED";
pub const MEMBER_REMOVED: &str = "MEMBER_REMOVED";
pub const EXPENSE_CREATED: &str = "EXPENSE_CREATED";
pub const EXPENSE_UPDATED: &str = "EXPENSE_UPDATED";
pub const EXPENSE_DELETED: &str = "EXPENSE_DELETED";
pub const SETTLEMENT_RECORDED: &str = "SETTLEMENT_RECORDED";

// Activity entity types.
pub const ENTITY_GROUP: &str = "group";
pub const ENTITY_MEMBER: &str = "member";
pub const ENTITY_EXPENSE: &str = "expense";
pub const ENTITY_SETTLEMENT: &str = "settlement";

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000;
pub const DEFAULT_CATEGORY: &str = "other";
