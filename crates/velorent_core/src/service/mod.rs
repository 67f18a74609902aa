//! Use-case services orchestrating repositories.
//!
//! # Responsibility
//! - Validate operation payloads, allocate ids and drive repositories.
//!
//! # Invariants
//! - Services see repository traits, never SQL; any backing that honors a
//!   repository contract can be injected.
//! - Payload validation always precedes id allocation and storage access.

pub mod fleet_service;
pub mod rental_service;
pub mod user_service;
