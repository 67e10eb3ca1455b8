//! Wishlist commands.

use std::io::Write;

use chrono::Utc;
use storecart_core::{ProductId, Quantity};
use storecart_storefront::models::User;
use storecart_storefront::wishlist::Wishlist;
use storecart_storefront::{CartSession, auth};

use super::{Context, write_cart};
use crate::error::CliError;

fn signed_in(ctx: &Context) -> Result<User, CliError> {
    auth::current_user(&mut ctx.store()).ok_or(CliError::NotSignedIn)
}

pub fn show(ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
    let user = signed_in(ctx)?;
    let items = Wishlist::new(ctx.store()).for_user(user.id)?;
    if items.is_empty() {
        writeln!(out, "Your wishlist is empty.")?;
        return Ok(());
    }

    let currency = ctx.currency();
    for item in &items {
        writeln!(
            out,
            "{:<8} {:<32} {:>12}",
            item.product_id,
            item.name,
            currency.format(item.price.amount()),
        )?;
    }
    writeln!(out, "{} saved item(s)", items.len())?;
    Ok(())
}

/// Save a catalog product to the wishlist.
pub fn add(ctx: &Context, id: &ProductId, out: &mut impl Write) -> Result<(), CliError> {
    let user = signed_in(ctx)?;
    let data = ctx.data()?;
    let product = data
        .product(id)
        .ok_or_else(|| CliError::UnknownProduct(id.clone()))?;

    if Wishlist::new(ctx.store()).add(user.id, product, Utc::now())? {
        writeln!(out, "Saved {} to your wishlist.", product.name)?;
    } else {
        writeln!(out, "{} is already on your wishlist.", product.name)?;
    }
    Ok(())
}

pub fn remove(ctx: &Context, id: &ProductId, out: &mut impl Write) -> Result<(), CliError> {
    let user = signed_in(ctx)?;
    if Wishlist::new(ctx.store()).remove(user.id, id)? {
        writeln!(out, "Removed {id} from your wishlist.")?;
    } else {
        writeln!(out, "{id} is not on your wishlist.")?;
    }
    Ok(())
}

/// Move a saved product into the cart at the price it was saved with.
pub fn to_cart(ctx: &Context, id: &ProductId, out: &mut impl Write) -> Result<(), CliError> {
    let user = signed_in(ctx)?;
    let mut wishlist = Wishlist::new(ctx.store());
    let item = wishlist
        .for_user(user.id)?
        .into_iter()
        .find(|item| &item.product_id == id)
        .ok_or_else(|| CliError::UnknownProduct(id.clone()))?;

    let mut session = CartSession::restore(ctx.store());
    session.add(&item.as_product(), Quantity::ONE)?;
    wishlist.remove(user.id, id)?;
    writeln!(out, "Moved {} to your cart.", item.name)?;
    write_cart(out, session.state(), ctx.currency())
}
