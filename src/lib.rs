//! brewbundle - compile a typed Homebrew configuration into a Brewfile
//!
//! The configuration lists taps, formulae, casks, Mac App Store apps and
//! whalebrew images. [`brewfile::compile`] turns it into Brewfile text with a
//! stable section and option order, and [`activation`] builds the single
//! `brew bundle` invocation that installs it.
//!
//! # Example
//!
//! ```rust
//! use brewbundle::brewfile;
//! use brewbundle::config::HomebrewConfig;
//!
//! let config = HomebrewConfig::from_json(r#"{"brews": ["jq"]}"#).unwrap();
//! let text = brewfile::compile(&config).unwrap();
//! assert!(text.contains("brew \"jq\""));
//! ```

pub mod activation;
pub mod brewfile;
pub mod cli;
pub mod command_runner;
pub mod commands;
pub mod config;
pub mod entry;
pub mod error;
pub mod output;
pub mod value;

pub use cli::{Cli, Commands};
pub use config::HomebrewConfig;
pub use error::BrewfileError;
