use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;
use uuid::Uuid;

use crate::order::application::domain::entities::{Handover, Order, Parcel, Payment};
use crate::order::application::ports::outgoing::{OrderQuery, OrderQueryError};

use super::sea_orm_entity::orders::{Entity as OrderEntity, Model as OrderModel};

#[derive(Clone, Debug)]
pub struct OrderQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl OrderQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Decodes the JSONB columns back into the typed aggregate. A row whose
/// parcel no longer matches the shape is reported, not skipped.
pub(crate) fn model_to_order(model: OrderModel) -> Result<Order, String> {
    let parcel: Parcel = serde_json::from_value(model.parcel)
        .map_err(|e| format!("order {} parcel: {}", model.id, e))?;

    let handover_by: Option<Handover> = model
        .handover_by
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| format!("order {} handover: {}", model.id, e))?;

    Ok(Order {
        id: model.id,
        track_id: model.track_id,
        parcel,
        payment: Payment {
            p_type: model.p_type,
            p_amount: model.p_amount,
            p_offer_discount: model.p_offer_discount,
            p_extra_charge: model.p_extra_charge,
            p_discount: model.p_discount,
            p_received: model.p_received,
            p_refunded: model.p_refunded,
        },
        handover_by,
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    })
}

#[async_trait]
impl OrderQuery for OrderQueryPostgres {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderQueryError> {
        let model = OrderEntity::find_by_id(order_id)
            .one(&*self.db)
            .await
            .map_err(|e| OrderQueryError::DatabaseError(e.to_string()))?;

        model
            .map(model_to_order)
            .transpose()
            .map_err(OrderQueryError::CorruptedRecord)
    }
}
