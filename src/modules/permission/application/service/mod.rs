pub mod get_permissions_service;
pub mod set_permissions_service;

pub use get_permissions_service::GetPermissionsService;
pub use set_permissions_service::SetPermissionsService;
