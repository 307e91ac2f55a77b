//! Route handlers organized by resource

pub mod associations;
pub mod health;
