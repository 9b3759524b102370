//! Shared authorization helpers for the yield farm contracts.
//!
//! [`admin_tiers`] implements a three-level admin hierarchy stored on-ledger.
//! Contracts authenticate the caller with `require_auth()` and then consult
//! the tier registry before any privileged mutation.

#![no_std]

pub mod admin_tiers;

pub use admin_tiers::*;
