use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::order::application::domain::entities::{NewOrder, Order};
use crate::order::application::domain::payment_update::PaymentUpdate;
use crate::order::application::ports::outgoing::{OrderRepository, OrderRepositoryError};
use crate::shared::infrastructure::is_unique_violation;

use super::order_query_postgres::model_to_order;
use super::sea_orm_entity::orders::{
    ActiveModel as OrderActiveModel, Column as OrderColumn, Entity as OrderEntity,
    Model as OrderModel,
};

#[derive(Clone, Debug)]
pub struct OrderRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl OrderRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_order(model: OrderModel) -> Result<Order, OrderRepositoryError> {
        model_to_order(model).map_err(OrderRepositoryError::CorruptedRecord)
    }

    async fn load(&self, order_id: Uuid) -> Result<Order, OrderRepositoryError> {
        let model = OrderEntity::find_by_id(order_id)
            .one(&*self.db)
            .await
            .map_err(|e| OrderRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(OrderRepositoryError::NotFound)?;

        Self::to_order(model)
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryPostgres {
    async fn create(&self, order: NewOrder) -> Result<Order, OrderRepositoryError> {
        let parcel = serde_json::to_value(&order.parcel)
            .map_err(|e| OrderRepositoryError::DatabaseError(e.to_string()))?;

        let active = OrderActiveModel {
            id: Set(Uuid::new_v4()),
            track_id: Set(order.track_id),
            parcel: Set(parcel),
            p_type: Set(order.payment.p_type),
            p_amount: Set(order.payment.p_amount),
            p_offer_discount: Set(order.payment.p_offer_discount),
            p_extra_charge: Set(order.payment.p_extra_charge),
            p_discount: Set(order.payment.p_discount),
            p_received: Set(order.payment.p_received),
            p_refunded: Set(order.payment.p_refunded),
            handover_by: Set(None),
            created_by: Set(Some(order.created_by)),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                return OrderRepositoryError::DuplicateTrackId;
            }
            OrderRepositoryError::DatabaseError(e.to_string())
        })?;

        Self::to_order(inserted)
    }

    async fn update_payment(
        &self,
        order_id: Uuid,
        update: PaymentUpdate,
    ) -> Result<Order, OrderRepositoryError> {
        if update.is_empty() {
            return self.load(order_id).await;
        }

        let mut query = OrderEntity::update_many();
        if let Some(p_type) = update.p_type {
            query = query.col_expr(OrderColumn::PType, Expr::value(p_type));
        }
        let amounts = [
            (OrderColumn::PAmount, update.p_amount),
            (OrderColumn::POfferDiscount, update.p_offer_discount),
            (OrderColumn::PExtraCharge, update.p_extra_charge),
            (OrderColumn::PDiscount, update.p_discount),
            (OrderColumn::PReceived, update.p_received),
            (OrderColumn::PRefunded, update.p_refunded),
        ];
        for (column, value) in amounts {
            if let Some(v) = value {
                query = query.col_expr(column, Expr::value(v));
            }
        }

        let updated = query
            .col_expr(OrderColumn::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(OrderColumn::Id.eq(order_id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| OrderRepositoryError::DatabaseError(e.to_string()))?;

        match updated.into_iter().next() {
            Some(model) => Self::to_order(model),
            None => Err(OrderRepositoryError::NotFound),
        }
    }
}
