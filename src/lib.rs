//! Prompt-driven video generator: turns a free-text prompt plus a media
//! file into a fully resolved render configuration, then drives a Remotion
//! project through one synchronous engine invocation.

pub mod composition;
pub mod config;
pub mod error;
pub mod prompt;
pub mod render_job;
