//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models and the weekly rate resolution rules
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
