//! Domain types and the reconciliation procedure for `jobsync`.
//!
//! Nothing in this crate talks to the outside world except the config
//! loaders; registry access goes through the [`JobRegistry`] trait.

pub mod app_config;
pub mod config;
pub mod definition;
pub mod error;
pub mod ids;
pub mod links;
pub mod reconcile;
pub mod registry;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use definition::{load_job_definition, JobDefinition};
pub use error::{ConfigError, ReconcileError, RegistryError};
pub use ids::{JobId, JobSummary, RunId};
pub use links::{job_url, run_url};
pub use reconcile::{apply, job_name, plan, reconcile, Action, Plan, Reconciliation};
pub use registry::JobRegistry;
