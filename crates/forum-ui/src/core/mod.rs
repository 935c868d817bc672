//! DOM-free building blocks for the discussions UI.
//!
//! Everything here compiles and is tested natively; the wasm layers in `app`, `components`,
//! `features`, and `services` only wire these into Yew.

pub mod auth;
pub mod bootstrap;
pub mod breakpoints;
pub mod effects;
pub mod location;
pub mod routes;
pub mod store;
pub mod threads;
pub mod view;
