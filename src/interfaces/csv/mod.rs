//! Batch replay of terminal operations from CSV.

pub mod operation_reader;
pub mod ticket_writer;
