#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod cli;
pub mod compress;
pub mod config;
pub mod emit;
pub mod error;
pub mod loader;
pub mod models;
pub mod resolve;

pub use builder::EmbedBuilder;
pub use cli::Cli;
pub use config::{GenerationRequest, RequestError, RequestFile};
pub use error::{EmbedError, EmbedResult};
pub use models::{AssetEntry, AssetTable, GenerationReport};
