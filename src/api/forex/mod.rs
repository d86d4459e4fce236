pub mod client;
pub mod models;

pub use client::ForexApiClient;
pub use models::{OptionsResponse, SignupForm};
