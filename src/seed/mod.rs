//! Demo data generator: a handful of cameras and a day's worth of incidents.
//!
//! Used at startup by the memory backend and by the `seed_db` binary against
//! PostgreSQL.

use crate::db::models::{Camera, Incident};
use crate::store::IncidentStore;
use anyhow::Result;
use chrono::{Duration, Utc};
use log::info;
use rand::Rng;
use uuid::Uuid;

const CAMERAS: &[(&str, &str)] = &[
    ("Shop Floor A", "Building A - Manufacturing Floor"),
    ("Vault", "Building B - Secure Vault Area"),
    ("Entrance", "Main Building - Front Entrance"),
    ("Parking Lot East", "External - East Parking Area"),
];

const INCIDENT_TYPES: &[&str] = &[
    "Unauthorised Access",
    "Gun Threat",
    "Face Recognised",
    "Suspicious Activity",
    "Motion Detection",
    "Object Left Behind",
];

const INCIDENT_COUNT: usize = 15;

#[derive(Debug, Clone, Copy)]
pub struct SeedSummary {
    pub cameras: usize,
    pub incidents: usize,
}

/// Populate the store with demo cameras and incidents spread over the last
/// 24 hours. Roughly 30% of incidents are still ongoing and 40% start out
/// resolved.
pub async fn seed_store(store: &dyn IncidentStore) -> Result<SeedSummary> {
    let mut rng = rand::thread_rng();

    let mut cameras = Vec::with_capacity(CAMERAS.len());
    for (name, location) in CAMERAS {
        let camera = store
            .create_camera(&Camera::new(Uuid::new_v4().to_string(), *name, *location))
            .await?;
        cameras.push(camera);
    }
    info!("Seeded {} cameras", cameras.len());

    let now = Utc::now();
    for i in 0..INCIDENT_COUNT {
        let camera = &cameras[rng.gen_range(0..cameras.len())];
        let incident_type = INCIDENT_TYPES[rng.gen_range(0..INCIDENT_TYPES.len())];

        // Start somewhere in the trailing 24 hours, run 2-30 minutes
        let ts_start = now - Duration::minutes(rng.gen_range(0..24 * 60));
        let ts_end = if rng.gen_bool(0.3) {
            None
        } else {
            Some(ts_start + Duration::minutes(rng.gen_range(2..=30)))
        };

        store
            .create_incident(&Incident {
                id: Uuid::new_v4().to_string(),
                camera_id: camera.id.clone(),
                incident_type: incident_type.to_string(),
                ts_start,
                ts_end,
                thumbnail_url: format!("/thumbnails/incident-{}.jpg", i + 1),
                resolved: rng.gen_bool(0.4),
            })
            .await?;
    }
    info!("Seeded {} incidents", INCIDENT_COUNT);

    Ok(SeedSummary {
        cameras: cameras.len(),
        incidents: INCIDENT_COUNT,
    })
}
