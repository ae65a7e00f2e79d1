//! Usage: Application layer (UI state wiring, logging setup, exit lifecycle).

pub(crate) mod app_state;
pub(crate) mod cleanup;
pub(crate) mod events;
pub(crate) mod logging;
pub(crate) mod options;
