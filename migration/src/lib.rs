pub use sea_orm_migration::prelude::*;

mod m20250304_105428_create_users_table;
mod m20250305_084945_create_login_histories_table;
mod m20250310_101500_create_orders_table;
mod m20250310_102000_create_tracks_table;
mod m20250312_083000_create_user_permissions_table;
mod m20250312_084500_create_notifications_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250304_105428_create_users_table::Migration),
            Box::new(m20250305_084945_create_login_histories_table::Migration),
            Box::new(m20250310_101500_create_orders_table::Migration),
            Box::new(m20250310_102000_create_tracks_table::Migration),
            Box::new(m20250312_083000_create_user_permissions_table::Migration),
            Box::new(m20250312_084500_create_notifications_table::Migration),
        ]
    }
}
