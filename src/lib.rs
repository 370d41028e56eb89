pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use crate::middleware::chaos::ChaosPolicy;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub chaos: ChaosPolicy,
}

impl AppState {
    pub fn new(store: Store, chaos: ChaosPolicy) -> Self {
        Self { store, chaos }
    }
}
