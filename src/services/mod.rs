pub mod chart_service;
pub mod interval_service;
pub mod pair_service;
pub mod projection_service;
pub mod rates_service;
pub mod session_service;
