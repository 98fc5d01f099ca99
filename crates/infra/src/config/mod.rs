//! Configuration resolution: environment, then JSON/TOML files, then
//! defaults.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths, resolve, ConfigSource};
