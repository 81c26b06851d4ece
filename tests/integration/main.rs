//! Integration tests for the relfetch library and CLI

pub mod cli;
pub mod common;
pub mod finder;
