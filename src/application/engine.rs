use crate::domain::card::{Amount, Balance, Card};
use crate::domain::ports::CardStoreBox;
use crate::domain::ticket::Ticket;
use crate::error::{PosnetError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::ops::RangeInclusive;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Installment counts a payment may be split into.
pub const INSTALLMENTS: RangeInclusive<i64> = 1..=6;

/// Surcharge applied per installment beyond the first, as a fraction of the
/// original amount.
pub const INSTALLMENT_SURCHARGE: Decimal = dec!(0.03);

const CENTS: Decimal = dec!(100);

/// The point-of-sale terminal: a card registry plus the payment processor.
///
/// `PosnetEngine` owns its storage backend. Every mutating operation runs
/// under one engine-wide lock, so the lookup, limit check and debit of a
/// payment are never interleaved with another request.
pub struct PosnetEngine {
    card_store: CardStoreBox,
    write_lock: Mutex<()>,
}

impl PosnetEngine {
    /// Creates a new `PosnetEngine` on top of the given card store.
    pub fn new(card_store: CardStoreBox) -> Self {
        Self {
            card_store,
            write_lock: Mutex::new(()),
        }
    }

    /// Stores `card` under its number. A card already registered with that
    /// number is replaced.
    pub async fn register_card(&self, card: Card) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        info!(
            number = card.number(),
            network = %card.network(),
            "registering card"
        );
        self.card_store.store(card).await
    }

    /// Charges `amount` split in `installments` to the card registered under
    /// `number`.
    ///
    /// Failed payments leave the card untouched.
    pub async fn do_payment(
        &self,
        number: &str,
        amount: Decimal,
        installments: i64,
    ) -> Result<Ticket> {
        let _guard = self.write_lock.lock().await;

        let mut card = self
            .card_store
            .get(number)
            .await?
            .ok_or_else(|| PosnetError::CardNotRegistered(number.to_string()))?;

        if !INSTALLMENTS.contains(&installments) {
            return Err(PosnetError::InvalidInstallments(installments));
        }
        let amount = Amount::new(amount)?;

        let total_amount = total_with_surcharge(amount, installments)?;
        debug!(number, %total_amount, installments, "computed payment total");

        if card.limit() < Balance::new(total_amount) {
            warn!(number, limit = %card.limit().value(), %total_amount, "insufficient limit");
            return Err(PosnetError::InsufficientLimit);
        }

        card.reduce_limit(Balance::new(total_amount));
        let ticket = Ticket {
            customer_name: card.customer_name(),
            total_amount,
            installment_amount: (total_amount / Decimal::from(installments))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        };
        self.card_store.store(card).await?;

        info!(number, %total_amount, installments, "payment approved");
        Ok(ticket)
    }

    /// Looks up a registered card by number.
    pub async fn card(&self, number: &str) -> Result<Option<Card>> {
        self.card_store.get(number).await
    }

    /// Snapshot of every registered card.
    pub async fn cards(&self) -> Result<Vec<Card>> {
        self.card_store.all_cards().await
    }
}

/// Total to charge for `amount` paid in `installments`.
///
/// Works in whole cents: the base amount and each per-installment surcharge
/// are truncated to cents independently before being added up.
fn total_with_surcharge(amount: Amount, installments: i64) -> Result<Decimal> {
    let amount = amount.value();
    let mut total_cents = amount
        .checked_mul(CENTS)
        .ok_or(PosnetError::AmountTooLarge)?
        .trunc();

    for _ in 2..=installments {
        let surcharge_cents = amount
            .checked_mul(INSTALLMENT_SURCHARGE)
            .and_then(|surcharge| surcharge.checked_mul(CENTS))
            .ok_or(PosnetError::AmountTooLarge)?
            .trunc();
        total_cents = total_cents
            .checked_add(surcharge_cents)
            .ok_or(PosnetError::AmountTooLarge)?;
    }

    Ok(total_cents / CENTS)
}
