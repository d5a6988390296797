use crate::domain::customer::Customer;
use crate::error::{PosnetError, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Sub, SubAssign};
use std::str::FromStr;

/// Number of characters every card number must have.
pub const CARD_NUMBER_LENGTH: usize = 8;

/// The credit still available on a card.
///
/// This is a wrapper around `rust_decimal::Decimal` so limit arithmetic never
/// goes through binary floating point. Negative values are representable: the
/// card itself does not guard against overdraft, the engine checks first.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Balance(pub Decimal);

impl Balance {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Balance {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A strictly positive payment amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PosnetError::InvalidAmount)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// The card networks the terminal accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardNetwork {
    Visa,
    Amex,
}

impl CardNetwork {
    /// Checks `number` against this network's format rule.
    ///
    /// Both networks currently share the same rule: exactly eight characters,
    /// with no checksum.
    pub fn validate(self, number: &str) -> Result<()> {
        let valid = match self {
            Self::Visa | Self::Amex => number.chars().count() == CARD_NUMBER_LENGTH,
        };

        if valid {
            Ok(())
        } else {
            Err(PosnetError::InvalidCardNumber {
                network: self,
                number: number.to_string(),
            })
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visa => f.write_str("Visa"),
            Self::Amex => f.write_str("AMEX"),
        }
    }
}

impl FromStr for CardNetwork {
    type Err = PosnetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "visa" => Ok(Self::Visa),
            "amex" => Ok(Self::Amex),
            _ => Err(PosnetError::UnsupportedCardType(s.to_string())),
        }
    }
}

/// A registered payment card.
///
/// The number is validated against the network rule on construction, and the
/// limit can only shrink through [`Card::reduce_limit`], which is reserved to
/// the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    network: CardNetwork,
    number: String,
    limit: Balance,
    bank_name: String,
    customer: Customer,
}

impl Card {
    pub fn new(
        network: CardNetwork,
        number: impl Into<String>,
        limit: Decimal,
        bank_name: impl Into<String>,
        customer: Customer,
    ) -> Result<Self> {
        let number = number.into();
        network.validate(&number)?;

        Ok(Self {
            network,
            number,
            limit: Balance::new(limit),
            bank_name: bank_name.into(),
            customer,
        })
    }

    pub fn visa(
        number: impl Into<String>,
        limit: Decimal,
        bank_name: impl Into<String>,
        customer: Customer,
    ) -> Result<Self> {
        Self::new(CardNetwork::Visa, number, limit, bank_name, customer)
    }

    pub fn amex(
        number: impl Into<String>,
        limit: Decimal,
        bank_name: impl Into<String>,
        customer: Customer,
    ) -> Result<Self> {
        Self::new(CardNetwork::Amex, number, limit, bank_name, customer)
    }

    pub fn network(&self) -> CardNetwork {
        self.network
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn limit(&self) -> Balance {
        self.limit
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn customer_name(&self) -> String {
        self.customer.full_name()
    }

    /// Debits the available limit. No underflow guard.
    pub(crate) fn reduce_limit(&mut self, amount: Balance) {
        self.limit -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn customer() -> Customer {
        Customer::new("41575190", "Tomás", "Vazquez").unwrap()
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(PosnetError::InvalidAmount)
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(PosnetError::InvalidAmount)
        ));
    }

    #[test]
    fn test_balance_arithmetic() {
        let mut limit = Balance::new(dec!(10.0));
        limit -= Balance::new(dec!(2.5));
        assert_eq!(limit, Balance::new(dec!(7.5)));
        assert_eq!(limit - Balance::new(dec!(10)), Balance::new(dec!(-2.5)));
    }

    #[test]
    fn test_network_parsing_is_case_insensitive() {
        assert_eq!("visa".parse::<CardNetwork>().unwrap(), CardNetwork::Visa);
        assert_eq!("VISA".parse::<CardNetwork>().unwrap(), CardNetwork::Visa);
        assert_eq!("Amex".parse::<CardNetwork>().unwrap(), CardNetwork::Amex);
        assert!(matches!(
            "mastercard".parse::<CardNetwork>(),
            Err(PosnetError::UnsupportedCardType(t)) if t == "mastercard"
        ));
    }

    #[test]
    fn test_valid_card_construction() {
        let card = Card::visa("48585333", dec!(1000.0), "Bank", customer()).unwrap();
        assert_eq!(card.number(), "48585333");
        assert_eq!(card.limit(), Balance::new(dec!(1000.0)));
        assert_eq!(card.bank_name(), "Bank");
        assert_eq!(card.network(), CardNetwork::Visa);
        assert_eq!(card.customer_name(), "Tomás Vazquez");
    }

    #[test]
    fn test_invalid_number_length() {
        for number in ["", "1234567", "123456789", "1234567812345678"] {
            let visa = Card::visa(number, dec!(100), "Bank", customer());
            assert!(matches!(
                visa,
                Err(PosnetError::InvalidCardNumber { network: CardNetwork::Visa, .. })
            ));

            let amex = Card::amex(number, dec!(100), "Bank", customer());
            assert!(matches!(
                amex,
                Err(PosnetError::InvalidCardNumber { network: CardNetwork::Amex, .. })
            ));
        }
    }

    #[test]
    fn test_number_content_is_not_checked() {
        assert!(Card::amex("abcdefgh", dec!(100), "Bank", customer()).is_ok());
        assert!(Card::visa("0000-000", dec!(100), "Bank", customer()).is_ok());
    }

    #[test]
    fn test_validation_messages() {
        let err = Card::visa("123", dec!(1), "Bank", customer()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Visa card number. It must be 8 digits.");

        let err = Card::amex("123", dec!(1), "Bank", customer()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid AMEX card number. It must be 8 digits.");
    }

    #[test]
    fn test_reduce_limit_has_no_floor() {
        let mut card = Card::visa("12345678", dec!(50.0), "Bank", customer()).unwrap();
        card.reduce_limit(Balance::new(dec!(80.0)));
        assert_eq!(card.limit(), Balance::new(dec!(-30.0)));
    }
}
