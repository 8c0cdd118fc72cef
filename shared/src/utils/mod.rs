//! Utility functions shared across server modules

pub mod email;
pub mod validation;
