//! # rxrules-web
//!
//! The HTTP surface of the rxrules advisor: a browser form that posts patient
//! data and renders the engine's recommendation, plus a JSON endpoint for
//! programmatic callers.
//!
//! The crate owns everything around the engine that the engine deliberately
//! does not: decoding raw form input, request logging, HTML rendering, and
//! the server lifecycle.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rxrules_engine::RuleEngine;
//! use rxrules_web::{config::ServerConfig, server};
//!
//! let mut running = server::start(&ServerConfig::default(), Arc::new(RuleEngine)).await?;
//! tokio::signal::ctrl_c().await?;
//! running.shutdown();
//! running.join().await?;
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod render;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use router::app_router;
pub use server::{start, RunningServer};
