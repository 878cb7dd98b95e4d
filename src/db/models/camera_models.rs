use serde::{Deserialize, Serialize};

/// Camera model
///
/// Cameras are created by seed/admin tooling and are immutable as far as the
/// dashboard is concerned; incidents reference them by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub location: String,
}

impl Camera {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
        }
    }
}
