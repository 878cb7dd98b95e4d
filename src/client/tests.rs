use super::*;
use crate::api::types::{IncidentView, IncidentsResponse, ResolveIncidentResponse};
use crate::db::models::Camera;
use chrono::{TimeZone, Utc};

fn view(id: &str, hour: u32, resolved: bool) -> IncidentView {
    IncidentView {
        id: id.to_string(),
        camera_id: "cam1".to_string(),
        incident_type: "Motion Detection".to_string(),
        ts_start: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
        ts_end: None,
        thumbnail_url: "/t.jpg".to_string(),
        resolved,
        camera: Camera::new("cam1", "Lobby", "HQ"),
    }
}

/// Model with three unresolved incidents (newest first) and two resolved
/// elsewhere
fn model() -> IncidentListModel {
    let listing = IncidentsResponse {
        incidents: vec![view("inc-3", 11, false), view("inc-2", 10, false), view("inc-1", 9, false)],
        total: 3,
    };
    IncidentListModel::from_listings(listing, 2)
}

fn resolved_response(id: &str, hour: u32) -> ResolveIncidentResponse {
    ResolveIncidentResponse {
        incident: view(id, hour, true),
        success: true,
    }
}

#[test]
fn initial_state_selects_the_newest_incident() {
    let model = model();
    assert_eq!(model.unresolved_count(), 3);
    assert_eq!(model.resolved_count(), 2);
    assert_eq!(model.selected().unwrap().id, "inc-3");
    assert!(!model.is_resolving("inc-3"));
}

#[test]
fn begin_resolve_marks_only_that_row() {
    let mut model = model();
    model.begin_resolve("inc-2").unwrap();

    assert_eq!(model.row_state("inc-2"), RowState::Resolving);
    assert_eq!(model.row_state("inc-3"), RowState::Idle);
    // The row is still visible while in flight
    assert_eq!(model.incidents().len(), 3);
    assert_eq!(model.unresolved_count(), 3);
}

#[test]
fn second_resolve_on_the_same_row_is_rejected() {
    let mut model = model();
    model.begin_resolve("inc-2").unwrap();

    assert_eq!(
        model.begin_resolve("inc-2"),
        Err(ModelError::ResolveInFlight("inc-2".to_string()))
    );
    // A different row can still start
    model.begin_resolve("inc-1").unwrap();
}

#[test]
fn unknown_incident_cannot_start_a_resolve() {
    let mut model = model();
    assert_eq!(
        model.begin_resolve("ghost"),
        Err(ModelError::UnknownIncident("ghost".to_string()))
    );
}

#[test]
fn successful_resolve_removes_the_row_and_moves_the_counters() {
    let mut model = model();
    model.begin_resolve("inc-2").unwrap();

    let outcome = model.apply_response(&resolved_response("inc-2", 10));

    assert_eq!(outcome, ResolveOutcome::Removed);
    assert!(model.incidents().iter().all(|i| i.id != "inc-2"));
    assert_eq!(model.unresolved_count(), 2);
    assert_eq!(model.resolved_count(), 3);
    assert!(!model.is_resolving("inc-2"));
}

#[test]
fn failed_resolve_reverts_the_marker_and_commits_nothing() {
    let mut model = model();
    model.begin_resolve("inc-2").unwrap();

    model.fail_resolve("inc-2");

    assert_eq!(model.row_state("inc-2"), RowState::Idle);
    assert_eq!(model.incidents().len(), 3);
    assert!(model.incidents().iter().any(|i| i.id == "inc-2" && !i.resolved));
    assert_eq!(model.unresolved_count(), 3);
    assert_eq!(model.resolved_count(), 2);
    // The row can be retried after the failure
    model.begin_resolve("inc-2").unwrap();
}

#[test]
fn stale_resolved_row_toggling_back_is_updated_in_place() {
    // The server answered resolved=false: the row had been resolved under a
    // stale cache and this call toggled it back to unresolved.
    let mut model = model();
    model.begin_resolve("inc-2").unwrap();

    let response = ResolveIncidentResponse {
        incident: view("inc-2", 10, false),
        success: true,
    };
    let outcome = model.apply_response(&response);

    assert_eq!(outcome, ResolveOutcome::Updated);
    assert_eq!(model.incidents().len(), 3);
    assert_eq!(model.unresolved_count(), 4);
    assert_eq!(model.resolved_count(), 1);
    assert!(!model.is_resolving("inc-2"));
}

#[test]
fn selection_falls_back_to_the_next_remaining_incident() {
    let mut model = model();
    assert_eq!(model.selected().unwrap().id, "inc-3");

    model.begin_resolve("inc-3").unwrap();
    model.apply_response(&resolved_response("inc-3", 11));

    // Next remaining after the removed head
    assert_eq!(model.selected().unwrap().id, "inc-2");
}

#[test]
fn selection_falls_back_to_the_last_incident_when_the_tail_is_removed() {
    let mut model = model();
    model.select("inc-1").unwrap();

    model.begin_resolve("inc-1").unwrap();
    model.apply_response(&resolved_response("inc-1", 9));

    assert_eq!(model.selected().unwrap().id, "inc-2");
}

#[test]
fn selection_clears_when_the_only_incident_is_resolved() {
    let listing = IncidentsResponse {
        incidents: vec![view("only", 10, false)],
        total: 1,
    };
    let mut model = IncidentListModel::from_listings(listing, 0);
    assert_eq!(model.selected().unwrap().id, "only");

    model.begin_resolve("only").unwrap();
    model.apply_response(&resolved_response("only", 10));

    assert!(model.selected().is_none());
    assert!(model.incidents().is_empty());
    assert_eq!(model.unresolved_count(), 0);
    assert_eq!(model.resolved_count(), 1);
}

#[test]
fn unselected_rows_keep_the_selection_when_removed() {
    let mut model = model();
    model.select("inc-1").unwrap();

    model.begin_resolve("inc-3").unwrap();
    model.apply_response(&resolved_response("inc-3", 11));

    assert_eq!(model.selected().unwrap().id, "inc-1");
}

#[test]
fn concurrent_resolves_on_different_rows_are_independent() {
    let mut model = model();
    model.begin_resolve("inc-3").unwrap();
    model.begin_resolve("inc-1").unwrap();

    // One succeeds, the other fails; each settles on its own
    model.apply_response(&resolved_response("inc-3", 11));
    model.fail_resolve("inc-1");

    assert_eq!(model.incidents().len(), 2);
    assert!(model.incidents().iter().any(|i| i.id == "inc-1"));
    assert_eq!(model.unresolved_count(), 2);
    assert_eq!(model.resolved_count(), 3);
    assert!(!model.is_resolving("inc-1"));
    assert!(!model.is_resolving("inc-3"));
}
