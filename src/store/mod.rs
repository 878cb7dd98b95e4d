use crate::config::{DatabaseConfig, StoreBackend};
use crate::db::models::{Camera, Incident};
use crate::db::DatabaseService;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub mod memory;
pub mod postgres;

pub use memory::MemoryIncidentStore;
pub use postgres::PgIncidentStore;

/// Filter for incident listings. `resolved: None` means no filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncidentFilter {
    pub resolved: Option<bool>,
}

impl IncidentFilter {
    pub fn resolved(resolved: bool) -> Self {
        Self {
            resolved: Some(resolved),
        }
    }
}

/// Persistence interface for cameras and incidents.
///
/// Constructed once at process start and handed to the services, so the rest
/// of the system never touches a concrete backend. Listings are always joined
/// with the owning camera and ordered by start time descending (id ascending
/// on ties, so the order is deterministic).
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Insert a camera. Fails with `Error::AlreadyExists` on a duplicate id.
    async fn create_camera(&self, camera: &Camera) -> Result<Camera>;

    /// Insert an incident. The referenced camera must already exist and the
    /// record must pass `Incident::validate`.
    async fn create_incident(&self, incident: &Incident) -> Result<Incident>;

    /// Point lookup by id, joined with the camera.
    async fn get_incident(&self, id: &str) -> Result<Option<(Incident, Camera)>>;

    /// Filtered listing, newest first.
    async fn list_incidents(&self, filter: IncidentFilter) -> Result<Vec<(Incident, Camera)>>;

    /// Atomically flip the resolved flag of one incident and return the
    /// updated record. `None` when the id matches nothing; the store is left
    /// unchanged in that case.
    async fn toggle_resolved(&self, id: &str) -> Result<Option<(Incident, Camera)>>;

    /// Cheap liveness probe for the health endpoint.
    async fn ping(&self) -> Result<()>;
}

/// Build the configured store backend
pub async fn build_store(config: &DatabaseConfig) -> Result<Arc<dyn IncidentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory incident store");
            Ok(Arc::new(MemoryIncidentStore::new()))
        }
        StoreBackend::Postgres => {
            let db = DatabaseService::new(config).await?;
            Ok(Arc::new(PgIncidentStore::new(db.pool.clone())))
        }
    }
}
