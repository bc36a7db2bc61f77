//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports the domain and hosts configuration loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use georef_kernel::config::load_config;
//! use georef_kernel::domain::config::ReferenceConfig;
//!
//! let cfg: ReferenceConfig = load_config(Some("config/georef")).unwrap_or_default();
//! println!("{}", cfg.dataset.root.display());
//! ```
pub mod config;

pub use georef_domain as domain;
