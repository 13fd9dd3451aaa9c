//! Rollcall domain core.
//!
//! Pure attendance logic plus the contracts of its collaborators:
//!
//! - [`calendar`] -- day-granularity date normalization.
//! - [`attendance`] -- batch types, validation and classification.
//! - [`ledger`], [`locks`], [`notifier`] -- collaborator traits implemented
//!   by the database and SMS crates.
//! - [`submission`] -- the write + idempotent-notification orchestrator.
//! - [`status`] -- read-side projections.
//! - [`student`] -- registry field rules.

pub mod attendance;
pub mod calendar;
pub mod error;
pub mod ledger;
pub mod locks;
pub mod notifier;
pub mod roles;
pub mod status;
pub mod student;
pub mod submission;
pub mod templates;
pub mod types;
