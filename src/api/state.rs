use std::sync::Arc;

use crate::domain::repositories::RosterRepository;

/// Shared handler state
///
/// Carries the roster store handle into every request.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<dyn RosterRepository>,
}

impl AppState {
    pub fn new(roster: Arc<dyn RosterRepository>) -> Self {
        Self { roster }
    }
}
