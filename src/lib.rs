use std::sync::Arc;

use phonenumber::country;

pub mod config;
pub mod db;
pub mod deeplink;
pub mod errors;
pub mod models;
pub mod pages;
pub mod repository;
pub mod routes;
pub mod validation;

use repository::SwoshRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn SwoshRepository>,
    pub phone_region: country::Id,
}

impl AppState {
    pub fn new(repo: Arc<dyn SwoshRepository>, phone_region: country::Id) -> Self {
        Self { repo, phone_region }
    }
}

pub use routes::router;
