use async_trait::async_trait;

use crate::shared::api::{PageRequest, PageResult};
use crate::tracking::application::domain::entities::{Track, TrackListFilter, TrackSort};
use crate::tracking::application::ports::incoming::use_cases::{
    ListTracksError, ListTracksUseCase,
};
use crate::tracking::application::ports::outgoing::TrackQuery;

pub struct ListTracksService<Q>
where
    Q: TrackQuery,
{
    query: Q,
}

impl<Q> ListTracksService<Q>
where
    Q: TrackQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListTracksUseCase for ListTracksService<Q>
where
    Q: TrackQuery + Send + Sync,
{
    async fn execute(
        &self,
        mut filter: TrackListFilter,
        sort: TrackSort,
        page: PageRequest,
    ) -> Result<PageResult<Track>, ListTracksError> {
        filter.search = filter
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        self.query
            .list(filter, sort, page)
            .await
            .map_err(|e| ListTracksError::QueryError(e.to_string()))
    }
}
