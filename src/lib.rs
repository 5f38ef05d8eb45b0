//! llms-routing: serve an llms.txt documentation tree in development and
//! copy it into production build output.
//!
//! The [`plugin::LlmsRouting`] plugin answers `/llms.txt` and `*.md` requests
//! from the configured directory and emits the same files as build assets.
//! [`server`] and [`build`] are the two hosts that drive its hooks.

pub mod build;
pub mod bundle;
pub mod config;
pub mod discovery;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod plugin;
pub mod server;

pub use error::LlmsError;
