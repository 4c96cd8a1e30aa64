//! Checkout module.
//!
//! Checkout is simulated: the form details are validated, the cart is
//! snapshotted into a receipt, and the cart is cleared.

mod address;
mod order;

pub use address::Address;
pub use order::{
    CheckoutDetails, OrderLineItem, OrderReceipt, OrderStatus, PaymentMethod,
};
