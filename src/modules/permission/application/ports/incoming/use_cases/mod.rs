pub mod get_permissions;
pub mod set_permissions;

pub use get_permissions::{GetPermissionsError, GetPermissionsUseCase};
pub use set_permissions::{SetPermissionsError, SetPermissionsUseCase};
