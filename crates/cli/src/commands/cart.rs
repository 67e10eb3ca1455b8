//! Cart commands.

use std::io::Write;

use storecart_core::{ProductId, Quantity};
use storecart_storefront::CartSession;

use super::{Context, write_cart};
use crate::error::CliError;

/// Print the cart.
pub fn show(ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
    let session = CartSession::restore(ctx.store());
    write_cart(out, session.state(), ctx.currency())
}

/// Add a catalog product to the cart.
pub fn add(
    ctx: &Context,
    id: &ProductId,
    quantity: Quantity,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let data = ctx.data()?;
    let product = data
        .product(id)
        .ok_or_else(|| CliError::UnknownProduct(id.clone()))?;

    let mut session = CartSession::restore(ctx.store());
    session.add(product, quantity)?;
    writeln!(out, "Added {quantity} x {}.", product.name)?;
    write_cart(out, session.state(), ctx.currency())
}

/// Remove a line from the cart.
pub fn remove(ctx: &Context, id: &ProductId, out: &mut impl Write) -> Result<(), CliError> {
    let mut session = CartSession::restore(ctx.store());
    if session.state().get(id).is_none() {
        writeln!(out, "{id} is not in your cart.")?;
        return Ok(());
    }
    session.remove(id);
    writeln!(out, "Removed {id}.")?;
    write_cart(out, session.state(), ctx.currency())
}

/// Replace a line's quantity.
pub fn set(
    ctx: &Context,
    id: &ProductId,
    quantity: Quantity,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut session = CartSession::restore(ctx.store());
    if session.state().get(id).is_none() {
        writeln!(out, "{id} is not in your cart.")?;
        return Ok(());
    }
    session.set_quantity(id, quantity);
    write_cart(out, session.state(), ctx.currency())
}

/// Empty the cart.
pub fn clear(ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
    CartSession::restore(ctx.store()).clear();
    writeln!(out, "Cart cleared.")?;
    Ok(())
}
