// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod artist;
pub mod artwork;
pub mod auth;
pub mod dashboard;
pub mod dates;
pub mod exhibition;
pub mod sale;

pub use artist::*;
pub use artwork::*;
pub use auth::*;
pub use dashboard::*;
pub use exhibition::*;
pub use sale::*;
