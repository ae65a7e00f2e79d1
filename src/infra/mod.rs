//! Usage: Infrastructure adapters (config persistence).

pub(crate) mod settings;
