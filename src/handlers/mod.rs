//! HTTP handlers

pub mod extract;
pub mod health;
pub mod agents;
pub mod decisions;
