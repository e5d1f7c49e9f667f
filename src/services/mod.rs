use std::sync::Arc;

use crate::auth::directory::IdentityDirectory;
use crate::database::store::CardStore;

pub mod access;
pub mod cards;

/// Shared application state handed to the router: the store and the
/// identity directory, both behind trait objects so tests can swap in
/// in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CardStore>,
    pub directory: Arc<dyn IdentityDirectory>,
}

impl AppState {
    pub fn new(store: Arc<dyn CardStore>, directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { store, directory }
    }
}
