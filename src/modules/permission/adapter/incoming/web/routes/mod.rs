mod get_permissions;
mod set_permissions;

pub use get_permissions::*;
pub use set_permissions::*;
