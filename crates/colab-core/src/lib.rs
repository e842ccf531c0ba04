//! Domain layer for CoLab Connect
//!
//! The membership lifecycle controller and its collaborating stores:
//! join requests, the membership ledger, the notification outbox, the
//! message log and the project store. Every operation takes the
//! authenticated actor's id explicitly and returns a typed [`CoreError`];
//! multi-step flows run inside a single database transaction.

pub mod error;
pub mod members;
pub mod messages;
pub mod notifications;
pub mod projects;
pub mod requests;

pub use error::{CoreError, CoreResult};
