pub mod user_permissions;
