//! Shared helpers: query validation and safety limits.

pub mod validation;
