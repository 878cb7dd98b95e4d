use crate::db::models::{Camera, Incident};
use crate::error::Error;
use crate::store::{IncidentFilter, IncidentStore};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryInner {
    cameras: HashMap<String, Camera>,
    incidents: HashMap<String, Incident>,
}

/// In-process incident store.
///
/// Serves two purposes: the `memory` backend lets the dashboard run seeded
/// demo data without a database, and the tests use it as the store double.
/// The single write lock makes the resolve toggle an atomic
/// read-modify-write, matching the transactional guarantee of the Postgres
/// backend.
#[derive(Default)]
pub struct MemoryIncidentStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryIncidentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn camera_for<'a>(
    cameras: &'a HashMap<String, Camera>,
    incident: &Incident,
) -> Result<&'a Camera> {
    cameras.get(&incident.camera_id).ok_or_else(|| {
        Error::Internal(format!(
            "incident {} references missing camera {}",
            incident.id, incident.camera_id
        ))
        .into()
    })
}

#[async_trait]
impl IncidentStore for MemoryIncidentStore {
    async fn create_camera(&self, camera: &Camera) -> Result<Camera> {
        let mut inner = self.inner.write().await;
        if inner.cameras.contains_key(&camera.id) {
            return Err(Error::AlreadyExists(format!("Camera {}", camera.id)).into());
        }
        inner.cameras.insert(camera.id.clone(), camera.clone());
        Ok(camera.clone())
    }

    async fn create_incident(&self, incident: &Incident) -> Result<Incident> {
        incident.validate()?;
        let mut inner = self.inner.write().await;
        if !inner.cameras.contains_key(&incident.camera_id) {
            return Err(Error::NotFound(format!("Camera {}", incident.camera_id)).into());
        }
        if inner.incidents.contains_key(&incident.id) {
            return Err(Error::AlreadyExists(format!("Incident {}", incident.id)).into());
        }
        inner.incidents.insert(incident.id.clone(), incident.clone());
        Ok(incident.clone())
    }

    async fn get_incident(&self, id: &str) -> Result<Option<(Incident, Camera)>> {
        let inner = self.inner.read().await;
        match inner.incidents.get(id) {
            Some(incident) => {
                let camera = camera_for(&inner.cameras, incident)?;
                Ok(Some((incident.clone(), camera.clone())))
            }
            None => Ok(None),
        }
    }

    async fn list_incidents(&self, filter: IncidentFilter) -> Result<Vec<(Incident, Camera)>> {
        let inner = self.inner.read().await;
        let mut rows = Vec::new();
        for incident in inner.incidents.values() {
            if let Some(resolved) = filter.resolved {
                if incident.resolved != resolved {
                    continue;
                }
            }
            let camera = camera_for(&inner.cameras, incident)?;
            rows.push((incident.clone(), camera.clone()));
        }
        // Newest first, id breaks ties
        rows.sort_by(|(a, _), (b, _)| {
            b.ts_start
                .cmp(&a.ts_start)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn toggle_resolved(&self, id: &str) -> Result<Option<(Incident, Camera)>> {
        let mut inner = self.inner.write().await;
        let Some(incident) = inner.incidents.get_mut(id) else {
            return Ok(None);
        };
        incident.resolved = !incident.resolved;
        let incident = incident.clone();
        let camera = camera_for(&inner.cameras, &incident)?.clone();
        Ok(Some((incident, camera)))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
