//! Order history commands.

use std::io::Write;

use storecart_core::ProductId;
use storecart_storefront::models::{Order, OrderId, OrderTab, User};
use storecart_storefront::orders::{OrderError, StoredOrders};
use storecart_storefront::{CartSession, auth};

use super::{Context, write_cart};
use crate::error::CliError;

fn signed_in(ctx: &Context) -> Result<User, CliError> {
    auth::current_user(&mut ctx.store()).ok_or(CliError::NotSignedIn)
}

/// Fetch an order and make sure it belongs to `user`.
fn owned_order(
    orders: &StoredOrders<impl storecart_storefront::KeyValueStore>,
    user: &User,
    order_id: OrderId,
) -> Result<Order, CliError> {
    let order = orders.find(order_id)?;
    if order.user_id != user.id {
        return Err(OrderError::NotFound(order_id).into());
    }
    Ok(order)
}

/// Print the signed-in shopper's orders, newest first.
pub fn list(
    ctx: &Context,
    returns: bool,
    limit: Option<usize>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let user = signed_in(ctx)?;
    let orders = StoredOrders::new(ctx.store());
    let history = match limit {
        Some(n) => orders.recent(user.id, n)?,
        None => orders.for_user(user.id)?,
    };

    let tab = if returns {
        OrderTab::Returns
    } else {
        OrderTab::Orders
    };
    let shown: Vec<Order> = history.iter().filter_map(|o| o.view(tab)).collect();
    if shown.is_empty() {
        let what = if returns { "returns" } else { "orders" };
        writeln!(out, "No {what} yet.")?;
        return Ok(());
    }

    let currency = ctx.currency();
    for order in &shown {
        writeln!(
            out,
            "Order {} ({}) placed {} total {}",
            order.id,
            order.status,
            order.date.format("%d %b %Y"),
            currency.format(order.total),
        )?;
        for item in &order.items {
            writeln!(
                out,
                "  {:<8} {:<32} {:>4} x {:>12}",
                item.id,
                item.name,
                item.quantity,
                currency.format(item.price.amount()),
            )?;
        }
    }
    Ok(())
}

/// Flag an ordered item as returned.
pub fn mark_returned(
    ctx: &Context,
    order_id: OrderId,
    product: &ProductId,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let user = signed_in(ctx)?;
    let mut orders = StoredOrders::new(ctx.store());
    owned_order(&orders, &user, order_id)?;
    orders.mark_returned(order_id, product)?;
    writeln!(out, "Return requested for {product} from order {order_id}.")?;
    Ok(())
}

/// Put an ordered item back into the cart with its original quantity.
pub fn buy_again(
    ctx: &Context,
    order_id: OrderId,
    product: &ProductId,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let user = signed_in(ctx)?;
    let orders = StoredOrders::new(ctx.store());
    let order = owned_order(&orders, &user, order_id)?;
    let item = order
        .items
        .iter()
        .find(|i| &i.id == product)
        .ok_or_else(|| OrderError::ItemNotFound {
            order_id,
            product_id: product.clone(),
        })?;

    let mut session = CartSession::restore(ctx.store());
    session.add(&item.as_product(), item.quantity)?;
    writeln!(out, "Added {} x {} to your cart.", item.quantity, item.name)?;
    write_cart(out, session.state(), ctx.currency())
}
