//! Request and response middleware.

pub(crate) mod no_cache;
