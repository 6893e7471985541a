//! Dental Console
//!
//! State synchronization layer of the dental clinic administrative console:
//! a shared HTTP client for the clinic API, reducer-backed stores for
//! patients, schedules, bookings, patient logs and feedback, and the photo
//! upload flow.

pub mod auth;
pub mod client;
pub mod config;
pub mod contacts;
pub mod errors;
pub mod hooks;
pub mod models;
pub mod store;
pub mod upload;
pub mod validation;

pub use auth::{AuthSignal, AuthSnapshot, Session};
pub use client::HttpClient;
pub use config::Config;
pub use errors::AppError;
pub use hooks::{
    use_bookings, use_feedback, use_patient_logs, use_patients, use_photo_uploader,
    use_schedules, AppState,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice is harmless.
pub fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let _ = if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
}
