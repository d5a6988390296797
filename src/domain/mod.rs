//! Domain model: customers, cards and the tickets a payment produces.

pub mod card;
pub mod customer;
pub mod ports;
pub mod ticket;
