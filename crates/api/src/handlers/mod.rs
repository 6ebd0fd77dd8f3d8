//! HTTP handler modules, one per resource.

pub mod jobs;
pub mod quarantine;
pub mod rules;
pub mod uploads;
