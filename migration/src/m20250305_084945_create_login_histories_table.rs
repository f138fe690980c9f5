use sea_orm_migration::prelude::*;

use crate::m20250304_105428_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoginHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoginHistories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // Null when the identifier did not resolve to a user.
                    .col(ColumnDef::new(LoginHistories::UserId).uuid().null())
                    .col(
                        ColumnDef::new(LoginHistories::Phone)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LoginHistories::Ip).string_len(64).null())
                    .col(ColumnDef::new(LoginHistories::UserAgent).text().null())
                    .col(ColumnDef::new(LoginHistories::Success).boolean().not_null())
                    .col(
                        ColumnDef::new(LoginHistories::FailureReason)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(LoginHistories::Action)
                            .string_len(16)
                            .not_null()
                            .default("login"),
                    )
                    .col(
                        ColumnDef::new(LoginHistories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_login_histories_user")
                            .from(LoginHistories::Table, LoginHistories::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_login_histories_user_created
                ON login_histories (user_id, created_at DESC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_login_histories_phone_created
                ON login_histories (phone, created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoginHistories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LoginHistories {
    Table,
    Id,
    UserId,
    Phone,
    Ip,
    UserAgent,
    Success,
    FailureReason,
    Action,
    CreatedAt,
}
