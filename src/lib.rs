//! Presenter Rotation API Library
//!
//! Schedules weekly presentation duty across a team's ordered member list.
//! Provides the rotation and ordering domain logic, the roster repositories,
//! and the HTTP layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
