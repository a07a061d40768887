//! Step definitions for Cucumber scenarios

pub mod auth_steps;
pub mod common_steps;
pub mod member_steps;
