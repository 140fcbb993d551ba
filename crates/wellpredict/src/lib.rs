//! Health risk assessment engine and the service plumbing around it.
//!
//! The scoring rules live in [`assessments::scoring`] and are pure functions of their
//! inputs. Everything else in this crate (validation, persistence, the remote prediction
//! gateway and the HTTP router) is a collaborator that feeds the engine or records its
//! results.

pub mod assessments;
pub mod config;
pub mod error;
pub mod telemetry;
