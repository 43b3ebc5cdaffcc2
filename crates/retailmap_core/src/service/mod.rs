//! Validation boundary over the repositories.
//!
//! # Responsibility
//! - Normalize incoming codes and run field validation before any write.
//! - Pre-check uniqueness, parent existence and deletion safety, then
//!   delegate storage to the repositories.
//!
//! # Invariants
//! - Pre-checks are not atomic with the following write; the store's own
//!   unique/foreign-key constraints remain the final authority and surface
//!   through the same error variants.
//! - Services never bypass repository validation or persistence contracts.

pub mod location_service;
pub mod province_service;
pub mod region_service;
pub mod supermarket_service;
