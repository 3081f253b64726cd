//! # Omniroute Engine Configuration
//!
//! Centralized settings for the routing engine: cost-model normalizers,
//! solver defaults, and AMM kernel parameters. Every knob has a production
//! default; services override via TOML files or `OMNIROUTE_`-prefixed
//! environment variables.
//!
//! ```rust
//! use omniroute_config::EngineSettings;
//!
//! let settings = EngineSettings::default();
//! assert_eq!(settings.default_max_hops, 4);
//! ```

pub mod settings;

pub use settings::{AmmSettings, EngineSettings};
