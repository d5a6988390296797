use super::AppState;
use crate::domain::card::{Card, CardNetwork};
use crate::domain::customer::Customer;
use crate::domain::ticket::Ticket;
use crate::error::{PosnetError, Result};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCardRequest {
    pub dni: String,
    pub first_name: String,
    pub last_name: String,
    pub r#type: String,
    pub number: String,
    pub limit: Decimal,
    pub bank_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakePaymentRequest {
    pub card_number: String,
    pub amount: Decimal,
    #[serde(default = "default_installments")]
    pub installments: i64,
}

fn default_installments() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct RegisterCardResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MakePaymentResponse {
    pub status: &'static str,
    pub ticket: TicketBody,
}

/// Ticket as rendered on the wire, with amounts as JSON numbers.
#[derive(Debug, Serialize)]
pub struct TicketBody {
    pub customer_name: String,
    // Rendered through f64: exact up to ~15 significant digits.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub installment_amount: Decimal,
}

impl From<Ticket> for TicketBody {
    fn from(ticket: Ticket) -> Self {
        Self {
            customer_name: ticket.customer_name,
            total_amount: ticket.total_amount.normalize(),
            installment_amount: ticket.installment_amount.normalize(),
        }
    }
}

/// Bodies axum cannot decode still get the JSON error envelope.
fn malformed(rejection: JsonRejection) -> PosnetError {
    PosnetError::MalformedRequest(rejection.body_text())
}

pub async fn register_card(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterCardRequest>, JsonRejection>,
) -> Result<Json<RegisterCardResponse>> {
    let Json(req) = payload.map_err(malformed)?;
    let network: CardNetwork = req.r#type.parse()?;
    let customer = Customer::new(req.dni, req.first_name, req.last_name)?;
    let card = Card::new(network, req.number, req.limit, req.bank_name, customer)?;

    state.engine.register_card(card).await?;

    Ok(Json(RegisterCardResponse {
        status: "success",
        message: "Card registered successfully",
    }))
}

pub async fn make_payment(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MakePaymentRequest>, JsonRejection>,
) -> Result<Json<MakePaymentResponse>> {
    let Json(req) = payload.map_err(malformed)?;
    let ticket = state
        .engine
        .do_payment(&req.card_number, req.amount, req.installments)
        .await?;

    Ok(Json(MakePaymentResponse {
        status: "success",
        ticket: ticket.into(),
    }))
}
