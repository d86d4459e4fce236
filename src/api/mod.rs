//! HTTP clients for external APIs

pub mod forex;
