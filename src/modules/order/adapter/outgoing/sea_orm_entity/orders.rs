use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub track_id: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub parcel: Json,
    pub p_type: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub p_amount: f64,
    #[sea_orm(column_type = "Double")]
    pub p_offer_discount: f64,
    #[sea_orm(column_type = "Double")]
    pub p_extra_charge: f64,
    #[sea_orm(column_type = "Double")]
    pub p_discount: f64,
    #[sea_orm(column_type = "Double")]
    pub p_received: f64,
    #[sea_orm(column_type = "Double")]
    pub p_refunded: f64,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub handover_by: Option<Json>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
