//! Checkout command.

use std::io::Write;

use storecart_core::AddressId;
use storecart_storefront::CartSession;
use storecart_storefront::auth;
use storecart_storefront::checkout::{PaymentDetails, place_order};
use storecart_storefront::models::{Address, select_delivery_address};
use storecart_storefront::orders::StoredOrders;

use super::Context;
use crate::CheckoutArgs;
use crate::error::CliError;

/// Place an order for the current cart.
pub fn run(ctx: &Context, args: &CheckoutArgs, out: &mut impl Write) -> Result<(), CliError> {
    let data = ctx.data()?;
    let user = auth::current_user(&mut ctx.store());

    let addresses: Vec<Address> = user
        .as_ref()
        .map(|u| data.addresses_for(u.id).into_iter().cloned().collect())
        .unwrap_or_default();
    let address = match args.address {
        Some(id) => {
            let id = AddressId::new(id);
            addresses.iter().find(|a| a.id == id)
        }
        None => select_delivery_address(&addresses),
    };

    let payment = PaymentDetails {
        method: args.payment,
        card_number: args.card_number.clone(),
        expiry: args.expiry.clone(),
        cvv: args.cvv.clone(),
        upi_id: args.upi_id.clone(),
        bank: args.bank.clone(),
    };

    let mut cart = CartSession::restore(ctx.store());
    let mut orders = StoredOrders::new(ctx.store());
    let order = place_order(&mut cart, user.as_ref(), address, &payment, &mut orders)?;

    let currency = ctx.currency();
    writeln!(out, "Order {} placed.", order.id)?;
    writeln!(
        out,
        "{} item(s), total {}, paid by {}",
        order.item_count(),
        currency.format(order.total),
        order.payment_method,
    )?;
    writeln!(
        out,
        "Delivering to {}, {}, {} {}",
        order.address.full_name, order.address.city, order.address.state, order.address.pincode,
    )?;
    Ok(())
}
