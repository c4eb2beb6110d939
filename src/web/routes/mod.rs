//! Routes
//!
//! Handlers organized by dashboard section.

pub mod dashboard;
pub mod destinations;
pub mod health;
pub mod login;
pub mod questions;
