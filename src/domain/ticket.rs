use rust_decimal::Decimal;

/// Settlement record handed back for a successful payment.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub customer_name: String,
    /// Amount charged to the card, surcharge included.
    pub total_amount: Decimal,
    /// `total_amount` split evenly across installments, rounded to cents.
    pub installment_amount: Decimal,
}
