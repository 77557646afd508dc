// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod member;
pub mod ordering;
pub mod repositories;
pub mod rotation;
pub mod team;

pub use errors::{RosterError, RosterResult};
pub use member::{Member, PositionAssignment};
