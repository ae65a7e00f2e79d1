//! Usage: Domain logic (theme selection, toast queue, update progress).

pub(crate) mod theme;
pub(crate) mod toast;
pub(crate) mod updates;
