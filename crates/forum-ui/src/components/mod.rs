//! Shell components shared by the forum views.

pub(crate) mod actions_bar;
pub(crate) mod breadcrumbs;
pub(crate) mod chrome;
pub(crate) mod error_page;
pub(crate) mod home;
pub(crate) mod nav_link;
pub(crate) mod navigation;
