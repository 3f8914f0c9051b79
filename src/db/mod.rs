// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod artist_repository;
pub mod artwork_repository;
pub mod exhibition_repository;
#[cfg(test)]
pub mod fixtures;
pub mod sale_repository;

pub use artist_repository::*;
pub use artwork_repository::*;
pub use exhibition_repository::*;
pub use sale_repository::*;
