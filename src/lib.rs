use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases, validation};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{db, limiter, utils, web};

use limiter::rate_limiter::RateLimiterStore;
use repositories::contact_me::ContactMeRepository;
use use_cases::contact::ContactMeHandler;

/// Process-scoped state shared by every worker.
pub struct AppState {
    pub contact_handler: AppContactHandler,
    pub trust_x_forwarded_for: bool,
}

pub type AppContactHandler = ContactMeHandler<Arc<dyn ContactMeRepository>>;

impl AppState {
    pub fn new(config: &settings::AppConfig, contact_repo: Arc<dyn ContactMeRepository>) -> Self {
        let rate_limiter = RateLimiterStore::new(
            config.rate_limit_max_requests,
            config.rate_limit_window(),
        );

        let contact_handler = ContactMeHandler::new(
            contact_repo,
            rate_limiter,
            config.store_timeout(),
        );

        AppState {
            contact_handler,
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }

    pub fn rate_limiter(&self) -> RateLimiterStore {
        self.contact_handler.rate_limiter.clone()
    }
}
