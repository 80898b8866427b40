//! Newsdesk MCP server library.
//!
//! Exposes a news agency search API to MCP clients. The binary wires [`ServerConfig`] to a
//! backend and serves [`NewsdeskService`] over stdio; tests drive the service in-process.

pub mod config;
pub mod tools;

pub use config::{BackendConfig, ServerConfig};
pub use tools::NewsdeskService;
