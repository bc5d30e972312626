//! Request handlers, grouped by resource.

pub mod accounts;
pub mod comments;
