use posnet::application::engine::PosnetEngine;
use posnet::domain::card::Card;
use posnet::domain::customer::Customer;
use posnet::infrastructure::in_memory::InMemoryCardStore;
use rust_decimal::Decimal;
use std::io::{Error, Write};
use tempfile::NamedTempFile;

#[allow(dead_code)]
pub const HEADER: &str =
    "op, card, number, limit, bank, dni, first_name, last_name, amount, installments";

#[allow(dead_code)]
pub fn engine() -> PosnetEngine {
    PosnetEngine::new(Box::new(InMemoryCardStore::new()))
}

#[allow(dead_code)]
pub fn visa(number: &str, limit: Decimal) -> Card {
    let customer = Customer::new("41575190", "Tomás", "Vazquez").unwrap();
    Card::visa(number, limit, "Bank", customer).unwrap()
}

/// Writes a temporary operations file: the standard header followed by `rows`.
#[allow(dead_code)]
pub fn operations_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}
