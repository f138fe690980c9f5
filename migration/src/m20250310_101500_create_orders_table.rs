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
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Orders::TrackId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Orders::Parcel).json_binary().not_null())
                    .col(ColumnDef::new(Orders::PType).string_len(32).null())
                    .col(money(Orders::PAmount))
                    .col(money(Orders::POfferDiscount))
                    .col(money(Orders::PExtraCharge))
                    .col(money(Orders::PDiscount))
                    .col(money(Orders::PReceived))
                    .col(money(Orders::PRefunded))
                    .col(ColumnDef::new(Orders::HandoverBy).json_binary().null())
                    .col(ColumnDef::new(Orders::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_created_by")
                            .from(Orders::Table, Orders::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Ownership checks match on sender/receiver phone inside the parcel document.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_orders_sender_phone
                ON orders ((parcel->'sender'->>'phone'));

                CREATE INDEX idx_orders_receiver_phone
                ON orders ((parcel->'receiver'->>'phone'));

                CREATE INDEX idx_orders_created_at
                ON orders (created_at DESC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_orders_updated_at
                BEFORE UPDATE ON orders
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS update_orders_updated_at ON orders")
            .await?;

        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

fn money(column: Orders) -> ColumnDef {
    ColumnDef::new(column)
        .double()
        .not_null()
        .default(0.0)
        .to_owned()
}

#[derive(DeriveIden)]
pub enum Orders {
    Table,
    Id,
    TrackId,
    Parcel,
    PType,
    PAmount,
    POfferDiscount,
    PExtraCharge,
    PDiscount,
    PReceived,
    PRefunded,
    HandoverBy,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
