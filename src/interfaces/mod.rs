//! Adapters that turn outside input into engine calls.

pub mod csv;
pub mod http;
