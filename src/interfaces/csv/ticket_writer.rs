use crate::domain::ticket::Ticket;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct TicketRow<'a> {
    number: &'a str,
    customer_name: &'a str,
    total_amount: Decimal,
    installment_amount: Decimal,
}

/// Writes one CSV row per approved payment.
pub struct TicketWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TicketWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Appends the ticket issued for the card `number`. Amounts are written
    /// without trailing zeros.
    pub fn write_ticket(&mut self, number: &str, ticket: &Ticket) -> Result<()> {
        self.writer.serialize(TicketRow {
            number,
            customer_name: &ticket.customer_name,
            total_amount: ticket.total_amount.normalize(),
            installment_amount: ticket.installment_amount.normalize(),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
