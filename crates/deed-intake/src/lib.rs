//! Deterministic consistency checking and county reference matching for
//! structured deed records.
//!
//! An upstream extractor turns scanned deed text into a [`intake::ParsedDeed`];
//! this crate decides whether that record is internally consistent
//! (date order, spelled-out amount vs numeric amount) and resolves its
//! noisy county name against a canonical reference dataset. The result
//! is either an [`intake::EnrichedDeed`] or a typed [`intake::DeedRejection`].

pub mod config;
pub mod error;
pub mod extract;
pub mod intake;
pub mod money;
pub mod telemetry;
