//! The concrete tables this service exposes.

mod area;
mod office;
mod permission;
mod user_action;

pub use area::Area;
pub use office::Office;
pub use permission::AccPermission;
pub use user_action::UserActionLog;
