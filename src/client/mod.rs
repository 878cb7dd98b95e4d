//! Client-side view model for the incident list.
//!
//! The dashboard shows the unresolved incidents plus unresolved/resolved
//! counters. Resolving is optimistic: the row is marked in flight as soon as
//! the user acts, the list and counters only change once the server answers,
//! and a failure reverts the marker and nothing else. Reconciliation always
//! works by incident id, never by row index, so it stays correct even when
//! the list shifted while the call was in flight.

use crate::api::types::{IncidentView, IncidentsResponse, ResolveIncidentResponse};
use std::collections::HashMap;
use thiserror::Error;

/// Per-incident UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowState {
    #[default]
    Idle,
    /// A resolve call has been dispatched and not yet answered
    Resolving,
}

/// What a successful resolve response did to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The incident is now resolved and left the unresolved list
    Removed,
    /// The incident came back unresolved (it was toggled from a stale
    /// resolved state) and was replaced in place
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("incident {0} is not in the list")]
    UnknownIncident(String),
    #[error("incident {0} already has a resolve call in flight")]
    ResolveInFlight(String),
}

/// State machine behind the incident list panel
#[derive(Debug, Default)]
pub struct IncidentListModel {
    /// Unresolved incidents, newest first, as last confirmed by the server
    incidents: Vec<IncidentView>,
    /// Only rows with an in-flight resolve have an entry here
    row_states: HashMap<String, RowState>,
    selected: Option<String>,
    unresolved_count: i64,
    resolved_count: i64,
}

impl IncidentListModel {
    /// Build the model from the initial fetches: the unresolved listing and
    /// the resolved total. The first (newest) incident starts selected.
    pub fn from_listings(unresolved: IncidentsResponse, resolved_total: i64) -> Self {
        let selected = unresolved.incidents.first().map(|i| i.id.clone());
        Self {
            unresolved_count: unresolved.total,
            resolved_count: resolved_total,
            incidents: unresolved.incidents,
            row_states: HashMap::new(),
            selected,
        }
    }

    pub fn incidents(&self) -> &[IncidentView] {
        &self.incidents
    }

    pub fn unresolved_count(&self) -> i64 {
        self.unresolved_count
    }

    pub fn resolved_count(&self) -> i64 {
        self.resolved_count
    }

    pub fn row_state(&self, id: &str) -> RowState {
        self.row_states.get(id).copied().unwrap_or_default()
    }

    pub fn is_resolving(&self, id: &str) -> bool {
        self.row_state(id) == RowState::Resolving
    }

    /// The currently selected incident, if any
    pub fn selected(&self) -> Option<&IncidentView> {
        let id = self.selected.as_deref()?;
        self.incidents.iter().find(|i| i.id == id)
    }

    pub fn select(&mut self, id: &str) -> Result<(), ModelError> {
        if !self.incidents.iter().any(|i| i.id == id) {
            return Err(ModelError::UnknownIncident(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Idle -> Resolving. The caller dispatches the resolve call after this
    /// succeeds; a second action on the same row while one is in flight is
    /// rejected so the UI can keep the button disabled.
    pub fn begin_resolve(&mut self, id: &str) -> Result<(), ModelError> {
        if !self.incidents.iter().any(|i| i.id == id) {
            return Err(ModelError::UnknownIncident(id.to_string()));
        }
        if self.is_resolving(id) {
            return Err(ModelError::ResolveInFlight(id.to_string()));
        }
        self.row_states.insert(id.to_string(), RowState::Resolving);
        Ok(())
    }

    /// Resolving -> Removed | Updated, reconciling list and counters with
    /// what the server actually returned.
    pub fn apply_response(&mut self, response: &ResolveIncidentResponse) -> ResolveOutcome {
        let incident = &response.incident;
        self.row_states.remove(&incident.id);

        if incident.resolved {
            if let Some(index) = self.incidents.iter().position(|i| i.id == incident.id) {
                self.incidents.remove(index);
                self.unresolved_count -= 1;
                self.resolved_count += 1;

                if self.selected.as_deref() == Some(incident.id.as_str()) {
                    // Fall back to the next remaining incident, then the last
                    // one, then nothing
                    self.selected = self
                        .incidents
                        .get(index)
                        .or_else(|| self.incidents.last())
                        .map(|i| i.id.clone());
                }
            }
            ResolveOutcome::Removed
        } else {
            // Toggled from a stale resolved state back to unresolved
            if let Some(slot) = self.incidents.iter_mut().find(|i| i.id == incident.id) {
                *slot = incident.clone();
                self.unresolved_count += 1;
                self.resolved_count -= 1;
            }
            ResolveOutcome::Updated
        }
    }

    /// Resolving -> Idle. The call failed; drop the marker and commit nothing.
    pub fn fail_resolve(&mut self, id: &str) {
        self.row_states.remove(id);
    }
}

#[cfg(test)]
mod tests;
