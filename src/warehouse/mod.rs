mod models;
mod schema;
mod statements;
mod store;

pub use models::*;
pub use schema::WAREHOUSE_SCHEMA;
pub use statements::{ConflictPolicy, StatementId, Statements};
pub use store::WarehouseStore;
