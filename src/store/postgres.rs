use crate::db::models::{Camera, Incident};
use crate::db::repositories::{CamerasRepository, IncidentsRepository};
use crate::error::Error;
use crate::store::{IncidentFilter, IncidentStore};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

/// PostgreSQL-backed incident store over the sqlx repositories
pub struct PgIncidentStore {
    pool: Arc<PgPool>,
    cameras: CamerasRepository,
    incidents: IncidentsRepository,
}

impl PgIncidentStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            cameras: CamerasRepository::new(pool.clone()),
            incidents: IncidentsRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl IncidentStore for PgIncidentStore {
    async fn create_camera(&self, camera: &Camera) -> Result<Camera> {
        if self.cameras.get_by_id(&camera.id).await?.is_some() {
            return Err(Error::AlreadyExists(format!("Camera {}", camera.id)).into());
        }
        self.cameras.create(camera).await
    }

    async fn create_incident(&self, incident: &Incident) -> Result<Incident> {
        incident.validate()?;
        // Friendlier than surfacing the foreign key violation
        if self.cameras.get_by_id(&incident.camera_id).await?.is_none() {
            return Err(Error::NotFound(format!("Camera {}", incident.camera_id)).into());
        }
        self.incidents.create(incident).await
    }

    async fn get_incident(&self, id: &str) -> Result<Option<(Incident, Camera)>> {
        self.incidents.get_with_camera(id).await
    }

    async fn list_incidents(&self, filter: IncidentFilter) -> Result<Vec<(Incident, Camera)>> {
        self.incidents.list_with_camera(filter.resolved).await
    }

    async fn toggle_resolved(&self, id: &str) -> Result<Option<(Incident, Camera)>> {
        self.incidents.toggle_resolved(id).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Database ping failed: {}", e)))?;
        Ok(())
    }
}
