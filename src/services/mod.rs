// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod artist_service;
pub mod artwork_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod exhibition_service;
pub mod rate_limit;
pub mod report_service;
pub mod sale_service;

pub use artist_service::*;
pub use artwork_service::*;
pub use auth_service::*;
pub use dashboard_service::*;
pub use exhibition_service::*;
pub use rate_limit::*;
pub use report_service::*;
pub use sale_service::*;
