//! Registry client that drives the Databricks CLI as a subprocess.
//!
//! Commands are built as argument lists and never passed through a shell.
//! Credentials come from [`BridgeSettings`] and are set on the child process
//! explicitly.

pub mod client;
mod response;
pub mod runner;
mod scratch;

pub use client::{BridgeSettings, DatabricksCli};
pub use runner::{BridgeCommand, CommandOutput, CommandRunner, ProcessRunner};
