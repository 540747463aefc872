pub mod cors;
pub mod require_permission;
