//! World naming: a one-shot call to an external text-generation service.
//!
//! # Invariants
//! - Invoked once at session bootstrap, never from the tick path.
//! - Every failure degrades to a fixed fallback string; nothing here can
//!   interrupt or delay the simulation.

pub mod client;

pub use client::{FALLBACK_NO_CREDENTIAL, FALLBACK_UNAVAILABLE, NameClient, NamingError};
