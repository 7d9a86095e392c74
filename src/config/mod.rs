//! Configuration types and loading for rosh.
//!
//! Settings come from command-line flags, `ROSH_*` environment variables and
//! an optional TOML file at the platform's XDG config path
//! (e.g. `~/.config/rosh/config.toml` on Linux). They are resolved once into
//! an immutable [`Settings`] value.

mod loader;
mod paths;
mod types;

pub use types::{FileConfig, InputMode, Overrides, Settings};
