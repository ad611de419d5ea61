//! Application state shared across handlers

use crate::repositories::UserRepository;

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub user_repository: UserRepository,
}

impl AppState {
    /// Build state around an existing repository
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }
}
