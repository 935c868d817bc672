//! Forum feature views mounted by the home view.

pub(crate) mod comments;
pub(crate) mod posts;
pub(crate) mod selected;
pub(crate) mod topics;
