//! Checkout: turn the cart into a placed order.
//!
//! Checkout is gated on a signed-in shopper and a non-empty cart. The
//! payment step only validates the form the shopper filled in; no payment
//! gateway is contacted. On success the order is submitted to an
//! [`OrderSink`] and the cart is cleared. On any failure the cart is left
//! untouched.

use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument, warn};

use storecart_core::PaymentMethod;

use crate::models::{Address, Order, User};
use crate::orders::{OrderError, OrderSink};
use crate::session::CartSession;
use crate::storage::KeyValueStore;

/// Payment form validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("card number, expiry and CVV are required")]
    MissingCardDetails,

    #[error("invalid UPI id: {0:?}")]
    InvalidUpiId(String),

    #[error("no bank selected")]
    NoBankSelected,
}

/// Errors that stop an order from being placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("sign in to place an order")]
    NotSignedIn,

    #[error("cart is empty")]
    EmptyCart,

    #[error("no delivery address selected")]
    NoAddress,

    /// The address belongs to a different shopper.
    #[error("delivery address {0} does not belong to the signed-in shopper")]
    ForeignAddress(storecart_core::AddressId),

    #[error("payment details rejected: {0}")]
    Payment(#[from] PaymentError),

    #[error("order placement failed: {0}")]
    Placement(#[from] OrderError),
}

/// What the shopper entered on the payment step.
#[derive(Debug, Clone, Default)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub upi_id: String,
    /// Selected bank for net banking.
    pub bank: Option<String>,
}

impl PaymentDetails {
    /// Check the fields required by the chosen method.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` describing the first missing or malformed field.
    pub fn validate(&self) -> Result<(), PaymentError> {
        match self.method {
            PaymentMethod::Card => {
                let filled = [&self.card_number, &self.expiry, &self.cvv]
                    .iter()
                    .all(|field| !field.trim().is_empty());
                if filled {
                    Ok(())
                } else {
                    Err(PaymentError::MissingCardDetails)
                }
            }
            PaymentMethod::Upi => {
                if self.upi_id.contains('@') {
                    Ok(())
                } else {
                    Err(PaymentError::InvalidUpiId(self.upi_id.clone()))
                }
            }
            PaymentMethod::NetBanking => match self.bank.as_deref().map(str::trim) {
                Some(bank) if !bank.is_empty() && bank != "Select Bank" => Ok(()),
                _ => Err(PaymentError::NoBankSelected),
            },
            PaymentMethod::CashOnDelivery => Ok(()),
        }
    }
}

/// Place an order for everything in `cart`.
///
/// # Errors
///
/// Returns `CheckoutError` if the shopper is not signed in, the cart is
/// empty, no usable address is given, the payment form is invalid, or the
/// sink rejects the order.
#[instrument(skip_all, fields(user_id = user.map(|u| u.id.as_i64()), method = %payment.method))]
pub fn place_order<S, O>(
    cart: &mut CartSession<S>,
    user: Option<&User>,
    address: Option<&Address>,
    payment: &PaymentDetails,
    sink: &mut O,
) -> Result<Order, CheckoutError>
where
    S: KeyValueStore,
    O: OrderSink + ?Sized,
{
    let user = user.ok_or(CheckoutError::NotSignedIn)?;
    if cart.state().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let address = address.ok_or(CheckoutError::NoAddress)?;
    if address.user_id != user.id {
        return Err(CheckoutError::ForeignAddress(address.id));
    }
    payment.validate()?;

    let order = Order::from_cart(
        cart.state(),
        user.id,
        address.clone(),
        payment.method,
        Utc::now(),
    );

    if let Err(e) = sink.submit(&order) {
        warn!(error = %e, "Order submission failed, cart kept");
        return Err(e.into());
    }

    cart.clear();
    info!(order_id = %order.id, total = %order.total, items = order.item_count(), "Order placed");
    Ok(order)
}
