//! Configuration loading and resolution.
//!
//! `load` layers config files, `TRIES__` environment variables and CLI flags
//! with the `config` crate, then validates the result into a
//! [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;
mod util;

pub(crate) use loader::load;
pub(crate) use resolved::ResolvedConfig;
#[cfg(test)]
pub(crate) use resolved::SettingSource;
