//! Core types, schemas, and error handling.
//!
//! This module contains the building blocks shared by the synthesizer and
//! the registry:
//!
//! - [`types`]: runtime values and the type-tag vocabulary
//! - [`schema`]: input/output schema grammar and constraint records
//! - [`descriptor`]: the node descriptor, the unit of registration
//! - [`args`]: the keyword-style argument set passed to node bodies
//! - [`error`]: error taxonomy

pub mod args;
pub mod descriptor;
pub mod error;
pub mod schema;
pub mod types;
