use crate::api::types::{IncidentView, ResolveIncidentResponse};
use crate::error::Error;
use crate::store::IncidentStore;
use anyhow::Result;
use log::info;
use std::sync::Arc;

/// Resolve toggle for one incident.
///
/// The operation flips the resolved flag, it does not set it. Calling it
/// twice undoes the first call, so callers must never retry blindly on a
/// network timeout without re-reading current state first.
pub struct IncidentResolveService {
    store: Arc<dyn IncidentStore>,
}

impl IncidentResolveService {
    pub fn new(store: Arc<dyn IncidentStore>) -> Self {
        Self { store }
    }

    /// Toggle the incident's resolved flag and return the updated record
    /// joined with its camera.
    pub async fn resolve(&self, id: &str) -> Result<ResolveIncidentResponse> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::Validation("Missing incident ID".to_string()).into());
        }

        match self.store.toggle_resolved(id).await? {
            Some((incident, camera)) => {
                info!(
                    "Incident {} toggled to resolved={}",
                    incident.id, incident.resolved
                );
                Ok(ResolveIncidentResponse {
                    incident: IncidentView::from_parts(incident, camera),
                    success: true,
                })
            }
            None => Err(Error::NotFound(format!("Incident not found: {}", id)).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Camera, Incident};
    use crate::services::IncidentQueryService;
    use crate::store::{IncidentFilter, MemoryIncidentStore};
    use chrono::{TimeZone, Utc};

    async fn seeded_store() -> Arc<dyn IncidentStore> {
        let store = MemoryIncidentStore::new();
        store
            .create_camera(&Camera::new("cam1", "Lobby", "HQ"))
            .await
            .unwrap();
        store
            .create_incident(&Incident {
                id: "inc1".to_string(),
                camera_id: "cam1".to_string(),
                incident_type: "Motion Detection".to_string(),
                ts_start: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
                ts_end: None,
                thumbnail_url: "/t.jpg".to_string(),
                resolved: false,
            })
            .await
            .unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn resolve_toggles_and_embeds_the_camera() {
        let service = IncidentResolveService::new(seeded_store().await);

        let response = service.resolve("inc1").await.unwrap();
        assert!(response.success);
        assert!(response.incident.resolved);
        assert_eq!(response.incident.camera.location, "HQ");
    }

    #[tokio::test]
    async fn double_resolve_returns_to_the_original_state() {
        let service = IncidentResolveService::new(seeded_store().await);

        let first = service.resolve("inc1").await.unwrap();
        assert!(first.incident.resolved);
        let second = service.resolve("inc1").await.unwrap();
        assert!(!second.incident.resolved);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_and_store_is_unchanged() {
        let store = seeded_store().await;
        let service = IncidentResolveService::new(store.clone());
        let query = IncidentQueryService::new(store);

        let before = query.list(IncidentFilter::default()).await.unwrap();

        let err = service.resolve("missing").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NotFound(_))
        ));

        let after = query.list(IncidentFilter::default()).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn blank_id_is_rejected_before_the_store_is_touched() {
        let service = IncidentResolveService::new(seeded_store().await);

        for id in ["", "   "] {
            let err = service.resolve(id).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<Error>(),
                Some(Error::Validation(_))
            ));
        }
    }
}
