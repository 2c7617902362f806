//! Utility functions.

pub mod parser;

pub use parser::split_args;
