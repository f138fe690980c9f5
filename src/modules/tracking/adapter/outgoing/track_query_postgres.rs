use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::sync::Arc;

use crate::shared::api::{PageRequest, PageResult};
use crate::tracking::application::domain::entities::{
    contains_pattern, SortDirection, Track, TrackIdPattern, TrackListFilter, TrackSort,
    TrackSortField, TrackStatus, TrackStep,
};
use crate::tracking::application::ports::outgoing::{TrackQuery, TrackQueryError};

use super::sea_orm_entity::tracks::{
    Column as TrackColumn, Entity as TrackEntity, Model as TrackModel,
};

const HISTORY_DESCRIPTION_SEARCH: &str = r#"EXISTS (SELECT 1 FROM jsonb_array_elements("tracks"."history") AS step WHERE step->>'description' ILIKE $1)"#;

#[derive(Clone, Debug)]
pub struct TrackQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl TrackQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn condition(filter: &TrackListFilter) -> Condition {
        let mut condition = Condition::all();

        match &filter.track_id {
            Some(TrackIdPattern::Exact(id)) => {
                condition = condition.add(TrackColumn::TrackId.eq(id.as_str()));
            }
            Some(TrackIdPattern::Like(pattern)) => {
                condition = condition.add(Expr::col(TrackColumn::TrackId).ilike(pattern.as_str()));
            }
            None => {}
        }

        if let Some(status) = filter.status {
            condition = condition.add(TrackColumn::CurrentStatus.eq(status.as_str()));
        }

        if let Some(search) = &filter.search {
            condition = condition.add(Expr::cust_with_values(
                HISTORY_DESCRIPTION_SEARCH,
                [contains_pattern(search)],
            ));
        }

        condition
    }
}

fn sort_column(field: TrackSortField) -> TrackColumn {
    match field {
        TrackSortField::CreatedAt => TrackColumn::CreatedAt,
        TrackSortField::UpdatedAt => TrackColumn::UpdatedAt,
        TrackSortField::CurrentStatus => TrackColumn::CurrentStatus,
        TrackSortField::TrackId => TrackColumn::TrackId,
    }
}

pub(crate) fn model_to_track(model: TrackModel) -> Result<Track, String> {
    let current_status: TrackStatus = model
        .current_status
        .parse()
        .map_err(|e| format!("track {}: {}", model.track_id, e))?;

    let history: Vec<TrackStep> = serde_json::from_value(model.history)
        .map_err(|e| format!("track {} history: {}", model.track_id, e))?;

    Ok(Track {
        id: model.id,
        order_id: model.order_id,
        track_id: model.track_id,
        current_status,
        history,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    })
}

#[async_trait]
impl TrackQuery for TrackQueryPostgres {
    async fn find_by_track_id(&self, track_id: &str) -> Result<Option<Track>, TrackQueryError> {
        let model = TrackEntity::find()
            .filter(TrackColumn::TrackId.eq(track_id))
            .one(&*self.db)
            .await
            .map_err(|e| TrackQueryError::DatabaseError(e.to_string()))?;

        model
            .map(model_to_track)
            .transpose()
            .map_err(TrackQueryError::CorruptedRecord)
    }

    async fn list(
        &self,
        filter: TrackListFilter,
        sort: TrackSort,
        page: PageRequest,
    ) -> Result<PageResult<Track>, TrackQueryError> {
        let condition = Self::condition(&filter);

        let total = TrackEntity::find()
            .filter(condition.clone())
            .count(&*self.db)
            .await
            .map_err(|e| TrackQueryError::DatabaseError(e.to_string()))?;

        let direction = match sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        let rows = TrackEntity::find()
            .filter(condition)
            .order_by(sort_column(sort.field), direction.clone())
            .order_by(TrackColumn::Id, direction)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(|e| TrackQueryError::DatabaseError(e.to_string()))?;

        let tracks = rows
            .into_iter()
            .map(model_to_track)
            .collect::<Result<Vec<_>, _>>()
            .map_err(TrackQueryError::CorruptedRecord)?;

        Ok(PageResult::new(tracks, page, total))
    }
}
