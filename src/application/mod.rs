//! Application layer containing the payment-processing orchestration.
//!
//! This module defines the `PosnetEngine`, the entry point every interface
//! (HTTP, CSV replay) calls into with already-typed input.

pub mod engine;
