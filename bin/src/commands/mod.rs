//! CLI command implementations.

pub(crate) mod add;
pub(crate) mod export;
pub(crate) mod grab;
pub(crate) mod list;
pub(crate) mod load;
pub(crate) mod remove;
pub(crate) mod setup;
pub(crate) mod update;
