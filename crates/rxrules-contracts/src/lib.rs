//! # rxrules-contracts
//!
//! Shared types for the rxrules drug advisor.
//!
//! Every crate in the workspace imports from here. No business logic lives in
//! this crate, only data definitions, boundary parsing helpers, and error
//! types.

pub mod error;
pub mod patient;
pub mod recommendation;
