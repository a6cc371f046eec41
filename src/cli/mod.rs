//! # CLI Module
//!
//! Command-line access to route manifests, mostly for checking a table
//! before it ships.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! ```bash
//! routematch routes --manifest routes.yaml [--format json]
//! ```
//!
//! ### `match`
//!
//! Resolve one request and print the handler and parameters, the 405 `Allow`
//! set, or 404:
//!
//! ```bash
//! routematch match --manifest routes.yaml GET /users/42
//! ```
//!
//! ### `check`
//!
//! Print conflict warnings. With `--strict` (or
//! `ROUTEMATCH_STRICT_CONFLICTS=true`) any conflict is a failure:
//!
//! ```bash
//! routematch check --manifest routes.yaml --strict
//! ```

mod commands;


pub use commands::{run_cli, run_with_output, Cli, Commands, OutputFormat};
