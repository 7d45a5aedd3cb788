//! Simulated card payment.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::OrderNumber;
use crate::money::Money;

/// Card details entered on the payment step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentDetails {
    /// Card number; spaces are allowed.
    pub card_number: String,
    /// Name printed on the card.
    pub card_name: String,
    /// Expiry as `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
}

impl PaymentDetails {
    /// Check the details are plausibly shaped.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let digits = self.card_digits();
        if !(13..=19).contains(&digits.len()) || digits.len() != self.non_space_len() {
            return Err(CommerceError::InvalidPayment(
                "card number must be 13 to 19 digits".to_string(),
            ));
        }
        if self.card_name.trim().is_empty() {
            return Err(CommerceError::InvalidPayment(
                "name on card is required".to_string(),
            ));
        }
        if !valid_expiry(&self.expiry_date) {
            return Err(CommerceError::InvalidPayment(
                "expiry date must be MM/YY".to_string(),
            ));
        }
        let cvv = self.cvv.trim();
        if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(CommerceError::InvalidPayment(
                "cvv must be 3 or 4 digits".to_string(),
            ));
        }
        Ok(())
    }

    /// Last four digits of the card number.
    pub fn last4(&self) -> String {
        let digits = self.card_digits();
        digits[digits.len().saturating_sub(4)..].to_string()
    }

    fn card_digits(&self) -> String {
        self.card_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect()
    }

    fn non_space_len(&self) -> usize {
        self.card_number.chars().filter(|c| !c.is_whitespace()).count()
    }
}

fn valid_expiry(value: &str) -> bool {
    let Some((month, year)) = value.trim().split_once('/') else {
        return false;
    };
    let month_ok = month.len() == 2 && matches!(month.parse::<u8>(), Ok(1..=12));
    let year_ok = year.len() == 2 && year.chars().all(|c| c.is_ascii_digit());
    month_ok && year_ok
}

/// Proof of a completed payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentReceipt {
    pub order_number: OrderNumber,
    /// Amount charged.
    pub amount: Money,
    pub paid_at: DateTime<Utc>,
    /// Last four digits of the card charged.
    pub card_last4: String,
}

/// Takes payment for an order.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charge `amount` to the card in `details`.
    async fn charge(
        &self,
        amount: Money,
        details: &PaymentDetails,
    ) -> Result<PaymentReceipt, CommerceError>;
}

/// Approves every well-formed payment after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockPaymentProcessor {
    delay: Duration,
}

impl MockPaymentProcessor {
    /// Default processing time.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockPaymentProcessor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl PaymentProcessor for MockPaymentProcessor {
    async fn charge(
        &self,
        amount: Money,
        details: &PaymentDetails,
    ) -> Result<PaymentReceipt, CommerceError> {
        details.validate()?;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let receipt = PaymentReceipt {
            order_number: OrderNumber::generate(),
            amount,
            paid_at: Utc::now(),
            card_last4: details.last4(),
        };
        tracing::info!(
            order = %receipt.order_number,
            amount = %receipt.amount,
            "mock payment approved"
        );
        Ok(receipt)
    }
}
