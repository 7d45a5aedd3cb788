//! Checkout flow state machine.

use crate::cart::{CartStore, OrderSummary};
use crate::checkout::{PaymentDetails, PaymentProcessor, PaymentReceipt, ShippingInfo};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Shipping information form.
    Shipping,
    /// Order review before payment.
    Review,
    /// Card details.
    Payment,
    /// Payment accepted.
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Review => "review",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Review => "Review",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Complete => "Complete",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Review => 2,
            CheckoutStep::Payment => 3,
            CheckoutStep::Complete => 4,
        }
    }
}

/// One customer's way through checkout.
///
/// The order summary is captured when checkout starts and is what the
/// payment step charges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    /// Current step.
    pub step: CheckoutStep,
    /// Totals at the time checkout started.
    pub summary: OrderSummary,
    /// Submitted shipping information.
    pub shipping: Option<ShippingInfo>,
    /// Set once payment succeeds.
    pub receipt: Option<PaymentReceipt>,
}

impl CheckoutFlow {
    /// Start checkout for the store's current cart.
    ///
    /// Fails with [`CommerceError::EmptyCart`] when there is nothing to buy.
    pub fn start(store: &CartStore) -> Result<Self, CommerceError> {
        if store.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            step: CheckoutStep::Shipping,
            summary: store.order_summary(),
            shipping: None,
            receipt: None,
        })
    }

    /// Submit the shipping form and move to review.
    pub fn submit_shipping(&mut self, info: ShippingInfo) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Shipping, CheckoutStep::Review)?;

        info.validate()?;

        self.shipping = Some(info);
        self.step = CheckoutStep::Review;
        Ok(self.step)
    }

    /// Confirm the review and move to payment.
    pub fn proceed_to_payment(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.expect_step(CheckoutStep::Review, CheckoutStep::Payment)?;
        self.step = CheckoutStep::Payment;
        Ok(self.step)
    }

    /// Go back one step. Not possible from the first step or after payment.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Review => CheckoutStep::Shipping,
            CheckoutStep::Payment => CheckoutStep::Review,
            CheckoutStep::Shipping | CheckoutStep::Complete => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: "previous".to_string(),
                })
            }
        };
        self.step = prev;
        Ok(prev)
    }

    /// Charge the order total, then empty the cart and finish.
    ///
    /// The cart is only cleared when the processor approves the payment.
    pub async fn pay<P>(
        &mut self,
        store: &CartStore,
        processor: &P,
        details: &PaymentDetails,
    ) -> Result<&PaymentReceipt, CommerceError>
    where
        P: PaymentProcessor + ?Sized,
    {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Complete)?;

        let receipt = processor.charge(self.summary.total, details).await?;
        store.clear_cart();
        self.step = CheckoutStep::Complete;
        Ok(self.receipt.insert(receipt))
    }

    /// Check if checkout is complete.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Complete
    }

    /// Get progress percentage.
    pub fn progress_percent(&self) -> u8 {
        (u16::from(self.step.number()) * 100 / 4) as u8
    }

    fn expect_step(&self, expected: CheckoutStep, to: CheckoutStep) -> Result<(), CommerceError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::checkout::MockPaymentProcessor;
    use crate::money::Money;
    use crate::CartStoreConfig;
    use std::time::Duration;
    use storefront_cache::Cache;

    fn store_with_item() -> CartStore {
        let store = CartStore::open(Cache::in_memory(), CartStoreConfig::default());
        let product = Product::new(1, "Jacket", Money::usd(5599), "men's clothing", "j.png");
        store.add_to_cart(&product, 2);
        store
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62701".into(),
            ..ShippingInfo::default()
        }
    }

    fn card() -> PaymentDetails {
        PaymentDetails {
            card_number: "4111111111111111".into(),
            card_name: "Ada Lovelace".into(),
            expiry_date: "01/30".into(),
            cvv: "999".into(),
        }
    }

    #[test]
    fn test_start_requires_items() {
        let store = CartStore::open(Cache::in_memory(), CartStoreConfig::default());
        assert!(matches!(
            CheckoutFlow::start(&store),
            Err(CommerceError::EmptyCart)
        ));
    }

    #[test]
    fn test_start_captures_summary() {
        let flow = CheckoutFlow::start(&store_with_item()).unwrap();
        assert_eq!(flow.step, CheckoutStep::Shipping);
        assert_eq!(flow.summary.subtotal, Money::usd(11198));
        assert_eq!(flow.summary.total, Money::usd(12318));
    }

    #[test]
    fn test_shipping_validation() {
        let mut flow = CheckoutFlow::start(&store_with_item()).unwrap();
        let result = flow.submit_shipping(ShippingInfo::default());
        assert!(matches!(result, Err(CommerceError::CheckoutIncomplete(_))));
        assert_eq!(flow.step, CheckoutStep::Shipping);

        assert_eq!(flow.submit_shipping(shipping()).unwrap(), CheckoutStep::Review);
    }

    #[test]
    fn test_steps_in_order() {
        let mut flow = CheckoutFlow::start(&store_with_item()).unwrap();
        assert!(flow.proceed_to_payment().is_err());

        flow.submit_shipping(shipping()).unwrap();
        flow.proceed_to_payment().unwrap();
        assert_eq!(flow.step, CheckoutStep::Payment);
        assert_eq!(flow.progress_percent(), 75);

        assert_eq!(flow.go_back().unwrap(), CheckoutStep::Review);
        assert_eq!(flow.go_back().unwrap(), CheckoutStep::Shipping);
        assert!(flow.go_back().is_err());
    }

    #[tokio::test]
    async fn test_pay_clears_cart() {
        let store = store_with_item();
        let mut flow = CheckoutFlow::start(&store).unwrap();
        flow.submit_shipping(shipping()).unwrap();
        flow.proceed_to_payment().unwrap();

        let processor = MockPaymentProcessor::new(Duration::ZERO);
        let receipt = flow.pay(&store, &processor, &card()).await.unwrap();
        assert_eq!(receipt.amount, Money::usd(12318));
        assert_eq!(receipt.card_last4, "1111");

        assert!(flow.is_complete());
        assert!(store.is_empty());
        assert_eq!(store.notification().message, "Your cart has been cleared");
    }

    #[tokio::test]
    async fn test_declined_details_keep_cart() {
        let store = store_with_item();
        let mut flow = CheckoutFlow::start(&store).unwrap();
        flow.submit_shipping(shipping()).unwrap();
        flow.proceed_to_payment().unwrap();

        let processor = MockPaymentProcessor::new(Duration::ZERO);
        let bad = PaymentDetails {
            cvv: "1".into(),
            ..card()
        };
        assert!(flow.pay(&store, &processor, &bad).await.is_err());
        assert_eq!(flow.step, CheckoutStep::Payment);
        assert_eq!(store.cart_count(), 2);
    }

    #[tokio::test]
    async fn test_pay_before_payment_step() {
        let store = store_with_item();
        let mut flow = CheckoutFlow::start(&store).unwrap();
        let processor = MockPaymentProcessor::new(Duration::ZERO);
        let result = flow.pay(&store, &processor, &card()).await;
        assert!(matches!(
            result,
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
        assert!(!store.is_empty());
    }
}
