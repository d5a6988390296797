use crate::domain::card::{Card, CardNetwork};
use crate::domain::customer::Customer;
use crate::error::{PosnetError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Register,
    Payment,
}

/// One CSV row as written in the file.
///
/// Which columns are required depends on `op`; see [`Operation::into_command`].
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Operation {
    pub op: OperationType,
    pub number: String,
    pub card: Option<String>,
    pub limit: Option<Decimal>,
    pub bank: Option<String>,
    pub dni: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub amount: Option<Decimal>,
    pub installments: Option<i64>,
}

/// A fully validated operation, ready for the engine.
#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    Register(Card),
    Payment {
        number: String,
        amount: Decimal,
        installments: i64,
    },
}

fn required<T>(value: Option<T>, column: &str) -> Result<T> {
    value.ok_or_else(|| PosnetError::MalformedOperation(format!("missing `{column}`")))
}

impl Operation {
    /// Checks the columns `op` needs and builds the domain objects.
    ///
    /// Card construction errors surface here, before the engine is involved.
    pub fn into_command(self) -> Result<Command> {
        match self.op {
            OperationType::Register => {
                let network: CardNetwork = required(self.card, "card")?.parse()?;
                let customer = Customer::new(
                    required(self.dni, "dni")?,
                    required(self.first_name, "first_name")?,
                    required(self.last_name, "last_name")?,
                )?;
                let card = Card::new(
                    network,
                    self.number,
                    required(self.limit, "limit")?,
                    required(self.bank, "bank")?,
                    customer,
                )?;
                Ok(Command::Register(card))
            }
            OperationType::Payment => Ok(Command::Payment {
                number: self.number,
                amount: required(self.amount, "amount")?,
                installments: self.installments.unwrap_or(1),
            }),
        }
    }
}

/// Reads terminal operations from a CSV source.
///
/// This reader wraps `csv::Reader` and yields one `Result<Operation>` per row.
/// Whitespace is trimmed and rows may omit trailing columns.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes operations.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PosnetError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "op, card, number, limit, bank, dni, first_name, last_name, amount, installments";

    fn read(rows: &str) -> Vec<Result<Operation>> {
        let data = format!("{HEADER}\n{rows}");
        OperationReader::new(data.as_bytes()).operations().collect()
    }

    #[test]
    fn test_reader_valid_stream() {
        let results = read(
            "register, visa, 12345678, 1000.0, Bank, 41575190, Tomás, Vazquez, ,\n\
             payment, , 12345678, , , , , , 100, 4",
        );

        assert_eq!(results.len(), 2);
        let register = results[0].as_ref().unwrap();
        assert_eq!(register.op, OperationType::Register);
        assert_eq!(register.limit, Some(dec!(1000.0)));
        assert_eq!(register.amount, None);

        let payment = results[1].as_ref().unwrap();
        assert_eq!(payment.op, OperationType::Payment);
        assert_eq!(payment.amount, Some(dec!(100)));
        assert_eq!(payment.installments, Some(4));
    }

    #[test]
    fn test_reader_malformed_line() {
        let results = read("refund, , 12345678, , , , , , 100, 1");
        assert!(results[0].is_err());
    }

    #[test]
    fn test_register_command() {
        let op = read("register, AMEX, 87654321, 500, Bank, 41575190, Tomás, Vazquez")
            .remove(0)
            .unwrap();

        match op.into_command().unwrap() {
            Command::Register(card) => {
                assert_eq!(card.network(), CardNetwork::Amex);
                assert_eq!(card.number(), "87654321");
                assert_eq!(card.customer_name(), "Tomás Vazquez");
            }
            other => panic!("expected register, got {other:?}"),
        }
    }

    #[test]
    fn test_payment_defaults_to_one_installment() {
        let op = read("payment, , 12345678, , , , , , 99.5").remove(0).unwrap();
        assert_eq!(
            op.into_command().unwrap(),
            Command::Payment {
                number: "12345678".to_string(),
                amount: dec!(99.5),
                installments: 1,
            }
        );
    }

    #[test]
    fn test_missing_columns() {
        let op = read("register, visa, 12345678, , Bank, 41575190, Tomás, Vazquez")
            .remove(0)
            .unwrap();
        assert!(matches!(
            op.into_command(),
            Err(PosnetError::MalformedOperation(msg)) if msg.contains("limit")
        ));

        let op = read("payment, , 12345678").remove(0).unwrap();
        assert!(matches!(
            op.into_command(),
            Err(PosnetError::MalformedOperation(msg)) if msg.contains("amount")
        ));
    }

    #[test]
    fn test_register_rejects_bad_card() {
        let op = read("register, visa, 123, 10, Bank, 41575190, Tomás, Vazquez")
            .remove(0)
            .unwrap();
        assert!(matches!(
            op.into_command(),
            Err(PosnetError::InvalidCardNumber { .. })
        ));

        let op = read("register, diners, 12345678, 10, Bank, 41575190, Tomás, Vazquez")
            .remove(0)
            .unwrap();
        assert!(matches!(
            op.into_command(),
            Err(PosnetError::UnsupportedCardType(_))
        ));
    }
}
