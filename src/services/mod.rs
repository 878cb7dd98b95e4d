pub mod incident_query;
pub mod incident_resolve;

pub use incident_query::IncidentQueryService;
pub use incident_resolve::IncidentResolveService;
