//! Core utilities shared by the relfetch library and binary.
//!
//! Holds the error type, error help formatting and home directory expansion.

pub mod core;

pub use crate::core::error::{ApiError, RelfetchError, RelfetchResult};
pub use crate::core::error_help::{format_error_with_help, ErrorHelp};
pub use crate::core::path::{expand_home, PathExpander};
