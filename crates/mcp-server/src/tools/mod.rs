//! Newsdesk MCP tool surface.
//!
//! Request schemas live in `schemas`; `dispatch` holds the service, the per-tool handlers,
//! prompts and resources.

mod dispatch;
pub mod schemas;

pub use dispatch::NewsdeskService;
