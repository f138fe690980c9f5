use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::shared::infrastructure::is_unique_violation;
use crate::tracking::application::domain::entities::{NewTrack, Track, TrackStep};
use crate::tracking::application::ports::outgoing::{TrackRepository, TrackRepositoryError};

use super::sea_orm_entity::tracks::{
    ActiveModel as TrackActiveModel, Column as TrackColumn, Entity as TrackEntity,
    Model as TrackModel,
};
use super::track_query_postgres::model_to_track;

#[derive(Clone, Debug)]
pub struct TrackRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl TrackRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_track(model: TrackModel) -> Result<Track, TrackRepositoryError> {
        model_to_track(model).map_err(TrackRepositoryError::CorruptedRecord)
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, TrackRepositoryError> {
    serde_json::to_value(value).map_err(|e| TrackRepositoryError::DatabaseError(e.to_string()))
}

#[async_trait]
impl TrackRepository for TrackRepositoryPostgres {
    async fn create(&self, track: NewTrack) -> Result<Track, TrackRepositoryError> {
        let status = track.initial.status;
        let history = encode(&vec![track.initial])?;

        let active = TrackActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(track.order_id),
            track_id: Set(track.track_id),
            current_status: Set(status.as_str().to_string()),
            history: Set(history),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                return TrackRepositoryError::DuplicateTrackId;
            }
            TrackRepositoryError::DatabaseError(e.to_string())
        })?;

        Self::to_track(inserted)
    }

    async fn append_step(
        &self,
        track_id: &str,
        step: TrackStep,
    ) -> Result<Track, TrackRepositoryError> {
        let status = step.status;
        let appended = encode(&vec![step])?;

        let updated = TrackEntity::update_many()
            .col_expr(
                TrackColumn::History,
                Expr::cust_with_values(r#""history" || $1"#, [appended]),
            )
            .col_expr(TrackColumn::CurrentStatus, Expr::value(status.as_str()))
            .col_expr(TrackColumn::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(TrackColumn::TrackId.eq(track_id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| TrackRepositoryError::DatabaseError(e.to_string()))?;

        match updated.into_iter().next() {
            Some(model) => Self::to_track(model),
            None => Err(TrackRepositoryError::NotFound),
        }
    }

    async fn delete(&self, track_id: &str) -> Result<(), TrackRepositoryError> {
        let result = TrackEntity::delete_many()
            .filter(TrackColumn::TrackId.eq(track_id))
            .exec(&*self.db)
            .await
            .map_err(|e| TrackRepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(TrackRepositoryError::NotFound);
        }
        Ok(())
    }
}
