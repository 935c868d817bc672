//! Network services.

pub(crate) mod api;
