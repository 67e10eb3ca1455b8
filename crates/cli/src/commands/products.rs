//! Catalog listing.

use std::io::Write;

use storecart_core::Product;
use storecart_core::catalog::{self, Category, SearchQuery};

use super::Context;
use crate::error::CliError;

/// List products matching the optional text and category filters.
pub fn list(
    ctx: &Context,
    text: Option<String>,
    category: Option<Category>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let data = ctx.data()?;
    let query = SearchQuery { text, category };
    write_products(ctx, &catalog::search(&data.products, &query), out)
}

/// List one brand's products.
pub fn brand(ctx: &Context, brand: &str, out: &mut impl Write) -> Result<(), CliError> {
    let data = ctx.data()?;
    writeln!(out, "Results for \"{brand}\"")?;
    write_products(ctx, &catalog::by_brand(&data.products, brand), out)
}

fn write_products(
    ctx: &Context,
    found: &[&Product],
    out: &mut impl Write,
) -> Result<(), CliError> {
    if found.is_empty() {
        writeln!(out, "No products found.")?;
        return Ok(());
    }

    let currency = ctx.currency();
    for product in found {
        writeln!(
            out,
            "{:<8} {:<32} {:<10} {:>12}",
            product.id,
            product.name,
            product.brand,
            currency.format(product.price.amount()),
        )?;
    }
    writeln!(out, "{} product(s)", found.len())?;
    Ok(())
}
