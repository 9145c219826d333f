//! Payment and card-funding form validation.

use thiserror::Error;

/// Number of digits in a lamp number.
pub const LAMP_DIGITS: usize = 9;

/// Address revealed once a complete lamp number has been typed.
pub const MOCK_ADDRESS: &str = "14 Adeola Odeku Street, Victoria Island, Lagos";

/// Required-field failures. `Display` is the message shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter Lamp Number and Amount")]
    MissingPaymentFields,
    #[error("Please fill in all card details and amount")]
    MissingCardFields,
}

/// Keep ASCII digits only, truncated to [`LAMP_DIGITS`].
pub fn sanitize_lamp_number(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(LAMP_DIGITS)
        .collect()
}

/// Lamp number field, sanitised on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LampInput(String);

impl LampInput {
    pub fn new(input: &str) -> Self {
        LampInput(sanitize_lamp_number(input))
    }

    pub fn set(&mut self, input: &str) {
        self.0 = sanitize_lamp_number(input);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == LAMP_DIGITS
    }

    /// The mock address, shown only for a complete lamp number.
    pub fn address(&self) -> Option<&'static str> {
        self.is_complete().then_some(MOCK_ADDRESS)
    }
}

/// Funding source for a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Wallet,
    Card,
}

/// Card fields shared by payments and wallet funding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    fn is_complete(&self) -> bool {
        [&self.number, &self.expiry, &self.cvv]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Bill payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    pub lamp: LampInput,
    pub amount: String,
    pub method: PaymentMethod,
    /// Only consulted when paying by card.
    pub card: CardDetails,
}

/// A payment that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub lamp: String,
    pub amount: String,
    pub method: PaymentMethod,
}

impl PaymentForm {
    pub fn new(lamp: &str, amount: &str) -> Self {
        Self {
            lamp: LampInput::new(lamp),
            amount: amount.trim().to_string(),
            ..Self::default()
        }
    }

    /// Card details are revealed only for card payments.
    pub fn shows_card_details(&self) -> bool {
        self.method == PaymentMethod::Card
    }

    pub fn validate(&self) -> Result<PaymentRequest, ValidationError> {
        if self.lamp.as_str().is_empty() || self.amount.trim().is_empty() {
            return Err(ValidationError::MissingPaymentFields);
        }
        if self.method == PaymentMethod::Card && !self.card.is_complete() {
            return Err(ValidationError::MissingCardFields);
        }
        Ok(PaymentRequest {
            lamp: self.lamp.as_str().to_string(),
            amount: self.amount.trim().to_string(),
            method: self.method,
        })
    }
}

/// Wallet top-up by card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFundingForm {
    pub card: CardDetails,
    pub amount: String,
}

impl CardFundingForm {
    /// Returns the amount to credit.
    pub fn validate(&self) -> Result<String, ValidationError> {
        if !self.card.is_complete() || self.amount.trim().is_empty() {
            return Err(ValidationError::MissingCardFields);
        }
        Ok(self.amount.trim().to_string())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
