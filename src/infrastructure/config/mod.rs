//! Configuration sources
//!
//! - `declarative`: in-memory configuration passed to `LogManager::configure`
//! - `loader`: YAML file plus environment overrides, merged with figment
//! - `section`: validation of the `logging` section document

pub mod declarative;
pub mod loader;
pub mod section;

pub use declarative::LogConfigurationSource;
pub use loader::{FileConfigSource, DEFAULT_CONFIG_FILE, DEFAULT_ENV_PREFIX, DIAGNOSTICS_SECTION};
pub use section::{parse_section, parse_section_str, SectionDocument};
