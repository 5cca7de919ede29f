//! Flutter bridge for the Bucket List core.

pub mod api;
