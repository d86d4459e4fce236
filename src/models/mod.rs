//! Data models shared by the client, services and commands
//!
//! `rates` mirrors the API payload, `chart` holds what the charts are drawn from,
//! and the rest describe the form and view state.

pub mod chart;
pub mod form;
pub mod interval;
pub mod rates;
pub mod session;
