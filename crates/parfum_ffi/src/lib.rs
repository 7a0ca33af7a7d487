//! Flutter-facing FFI surface for the ParfumVI core.

pub mod api;
