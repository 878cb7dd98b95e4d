use crate::db::models::camera_models::Camera;
use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Incident model (persisted entity)
///
/// Strictly the fields the store holds. Presentation-only attributes
/// (severity, confidence, bounding boxes) are deliberately not part of this
/// type; the wire view-model is built from it at the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Incident {
    pub id: String,
    pub camera_id: String,
    pub incident_type: String,
    pub ts_start: DateTime<Utc>,
    /// None while the incident is still ongoing
    pub ts_end: Option<DateTime<Utc>>,
    pub thumbnail_url: String,
    pub resolved: bool,
}

impl Incident {
    /// Check the entity invariants before the record reaches a store
    pub fn validate(&self) -> Result<(), Error> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation("incident id must not be empty".to_string()));
        }
        if self.camera_id.trim().is_empty() {
            return Err(Error::Validation(
                "incident camera_id must not be empty".to_string(),
            ));
        }
        if let Some(ts_end) = self.ts_end {
            if ts_end < self.ts_start {
                return Err(Error::Validation(format!(
                    "incident {} ends before it starts ({} < {})",
                    self.id, ts_end, self.ts_start
                )));
            }
        }
        Ok(())
    }
}

/// Flat row produced by the incidents-join-cameras queries
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IncidentWithCameraRow {
    pub id: String,
    pub camera_id: String,
    pub incident_type: String,
    pub ts_start: DateTime<Utc>,
    pub ts_end: Option<DateTime<Utc>>,
    pub thumbnail_url: String,
    pub resolved: bool,
    pub camera_name: String,
    pub camera_location: String,
}

impl IncidentWithCameraRow {
    /// Split the joined row back into its two entities
    pub fn into_parts(self) -> (Incident, Camera) {
        let camera = Camera {
            id: self.camera_id.clone(),
            name: self.camera_name,
            location: self.camera_location,
        };
        let incident = Incident {
            id: self.id,
            camera_id: self.camera_id,
            incident_type: self.incident_type,
            ts_start: self.ts_start,
            ts_end: self.ts_end,
            thumbnail_url: self.thumbnail_url,
            resolved: self.resolved,
        };
        (incident, camera)
    }
}
