//! Wire types for the dashboard API.
//!
//! The persisted entities stay snake_case inside the store; everything that
//! crosses the HTTP boundary is mapped into these camelCase view-models. The
//! client module consumes the same shapes it would receive over the wire.

use crate::db::models::{Camera, Incident};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Incident as the dashboard sees it: the persisted fields plus the owning
/// camera embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentView {
    pub id: String,
    pub camera_id: String,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub ts_start: DateTime<Utc>,
    pub ts_end: Option<DateTime<Utc>>,
    pub thumbnail_url: String,
    pub resolved: bool,
    pub camera: Camera,
}

impl IncidentView {
    /// Explicit entity-to-view mapping, done once at the service boundary
    pub fn from_parts(incident: Incident, camera: Camera) -> Self {
        Self {
            id: incident.id,
            camera_id: incident.camera_id,
            incident_type: incident.incident_type,
            ts_start: incident.ts_start,
            ts_end: incident.ts_end,
            thumbnail_url: incident.thumbnail_url,
            resolved: incident.resolved,
            camera,
        }
    }
}

/// Response for `GET /incidents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentsResponse {
    pub incidents: Vec<IncidentView>,
    pub total: i64,
}

/// Response for `PATCH /incidents/{id}/resolve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveIncidentResponse {
    pub incident: IncidentView,
    pub success: bool,
}
