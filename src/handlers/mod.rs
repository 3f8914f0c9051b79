// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod artists;
pub mod artworks;
pub mod auth;
pub mod dashboard;
pub mod exhibitions;
pub mod extractors;
pub mod health;
pub mod reports;
pub mod sales;

pub use artists::config as artists_config;
pub use artworks::config as artworks_config;
pub use auth::config as auth_config;
pub use dashboard::config as dashboard_config;
pub use exhibitions::config as exhibitions_config;
pub use health::config as health_config;
pub use reports::config as reports_config;
pub use sales::config as sales_config;
