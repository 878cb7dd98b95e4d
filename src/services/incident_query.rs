use crate::api::types::{IncidentView, IncidentsResponse};
use crate::store::{IncidentFilter, IncidentStore};
use anyhow::Result;
use std::sync::Arc;

/// Read side of the dashboard: filtered incident listings with embedded
/// cameras, newest first
pub struct IncidentQueryService {
    store: Arc<dyn IncidentStore>,
}

impl IncidentQueryService {
    pub fn new(store: Arc<dyn IncidentStore>) -> Self {
        Self { store }
    }

    /// List incidents matching the filter. No side effects.
    pub async fn list(&self, filter: IncidentFilter) -> Result<IncidentsResponse> {
        let rows = self.store.list_incidents(filter).await?;
        let total = rows.len() as i64;
        let incidents = rows
            .into_iter()
            .map(|(incident, camera)| IncidentView::from_parts(incident, camera))
            .collect();

        Ok(IncidentsResponse { incidents, total })
    }
}
