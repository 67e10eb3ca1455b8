//! Account and sign-in commands.

use std::io::Write;

use storecart_core::Email;
use storecart_storefront::auth::{self, NewAccount};

use super::Context;
use crate::error::CliError;

/// Create an account. The shopper still has to sign in afterwards.
pub fn signup(
    ctx: &Context,
    name: String,
    email: Email,
    phone: Option<String>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let data = ctx.data()?;
    let account = NewAccount { name, email, phone };
    let user = auth::sign_up(&mut ctx.store(), &data, account)?;
    writeln!(out, "Account created for {}. Sign in with {}.", user.name, user.email)?;
    Ok(())
}

pub fn login(ctx: &Context, email: &Email, out: &mut impl Write) -> Result<(), CliError> {
    let data = ctx.data()?;
    let user = auth::sign_in(&mut ctx.store(), &data, email)?;
    writeln!(out, "Hello, {}.", user.name)?;
    Ok(())
}

pub fn logout(ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
    auth::sign_out(&mut ctx.store())?;
    writeln!(out, "Signed out.")?;
    Ok(())
}

/// Print the signed-in profile, applying any changes first.
pub fn profile(
    ctx: &Context,
    name: Option<String>,
    phone: Option<String>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let data = ctx.data()?;
    let mut store = ctx.store();
    let mut user = auth::current_user(&mut store).ok_or(CliError::NotSignedIn)?;

    if name.is_some() || phone.is_some() {
        if let Some(name) = name {
            user.name = name;
        }
        if phone.is_some() {
            user.phone = phone;
        }
        auth::update_user(&mut store, &data, &user)?;
    }

    writeln!(out, "{} <{}>", user.name, user.email)?;
    if let Some(phone) = &user.phone {
        writeln!(out, "Phone: {phone}")?;
    }
    Ok(())
}
