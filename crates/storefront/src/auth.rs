//! Shopper accounts and the signed-in session.
//!
//! Accounts come from the read-only store data plus the locally saved
//! records under [`keys::USERS`]. A saved record replaces the store data
//! account with the same id, so sign-ups and profile edits survive a new
//! sign-in. The signed-in shopper is remembered under
//! [`keys::CURRENT_USER`]. There is no credential check.

use thiserror::Error;
use tracing::{info, instrument, warn};

use storecart_core::{Email, UserId};

use crate::data::StoreData;
use crate::models::User;
use crate::storage::{KeyValueStore, StorageError, keys};

/// Errors from account and session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no account for {0}")]
    UserNotFound(Email),

    #[error("an account already exists for {0}")]
    EmailTaken(Email),

    #[error("not signed in as user {0}")]
    NotSignedIn(UserId),

    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("account records are corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Details entered on the sign-up form.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
}

fn saved_accounts<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<User>, AuthError> {
    match store.get(keys::USERS)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

fn save_account<S: KeyValueStore + ?Sized>(store: &mut S, user: &User) -> Result<(), AuthError> {
    let mut accounts = saved_accounts(&*store)?;
    match accounts.iter_mut().find(|a| a.id == user.id) {
        Some(existing) => existing.clone_from(user),
        None => accounts.push(user.clone()),
    }
    store.set(keys::USERS, &serde_json::to_string(&accounts)?)?;
    Ok(())
}

/// The account registered under `email`, saved records first.
///
/// # Errors
///
/// Returns an error if the saved accounts cannot be read or parsed.
pub fn find_account<S: KeyValueStore + ?Sized>(
    store: &S,
    data: &StoreData,
    email: &Email,
) -> Result<Option<User>, AuthError> {
    let saved = saved_accounts(store)?;
    if let Some(user) = saved.iter().find(|u| &u.email == email) {
        return Ok(Some(user.clone()));
    }
    Ok(data
        .user_by_email(email)
        .filter(|u| !saved.iter().any(|s| s.id == u.id))
        .cloned())
}

/// The signed-in shopper, if any.
///
/// A stored record that cannot be parsed is erased and treated as signed
/// out.
pub fn current_user<S: KeyValueStore + ?Sized>(store: &mut S) -> Option<User> {
    let raw = match store.get(keys::CURRENT_USER) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(error = %e, "Failed to read session user");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "Discarding unparseable session user");
            if let Err(e) = store.remove(keys::CURRENT_USER) {
                warn!(error = %e, "Failed to erase session user");
            }
            None
        }
    }
}

/// Create an account. The shopper still has to sign in afterwards.
///
/// # Errors
///
/// Returns [`AuthError::EmailTaken`] if any account already uses the email,
/// or a storage error if the account cannot be saved.
#[instrument(skip_all, fields(email = %account.email))]
pub fn sign_up<S: KeyValueStore + ?Sized>(
    store: &mut S,
    data: &StoreData,
    account: NewAccount,
) -> Result<User, AuthError> {
    if find_account(&*store, data, &account.email)?.is_some() {
        return Err(AuthError::EmailTaken(account.email));
    }

    let next_id = data
        .users
        .iter()
        .chain(&saved_accounts(&*store)?)
        .map(|u| u.id.as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let user = User {
        id: UserId::new(next_id),
        name: account.name,
        email: account.email,
        phone: account.phone,
    };
    save_account(store, &user)?;
    info!(user_id = %user.id, "Account created");
    Ok(user)
}

/// Sign in as the account registered under `email`.
///
/// # Errors
///
/// Returns [`AuthError::UserNotFound`] if no account matches, or a storage
/// error if the session cannot be written.
#[instrument(skip(store, data))]
pub fn sign_in<S: KeyValueStore + ?Sized>(
    store: &mut S,
    data: &StoreData,
    email: &Email,
) -> Result<User, AuthError> {
    let user = find_account(&*store, data, email)?
        .ok_or_else(|| AuthError::UserNotFound(email.clone()))?;
    store.set(keys::CURRENT_USER, &serde_json::to_string(&user)?)?;
    info!(user_id = %user.id, "Signed in");
    Ok(user)
}

/// Forget the signed-in shopper. The cart is kept.
///
/// # Errors
///
/// Returns a storage error if the session cannot be written.
pub fn sign_out<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), AuthError> {
    store.remove(keys::CURRENT_USER)?;
    info!("Signed out");
    Ok(())
}

/// Replace the signed-in shopper's profile and save it to their account.
///
/// # Errors
///
/// Returns [`AuthError::NotSignedIn`] unless `updated` is the account
/// currently signed in, [`AuthError::EmailTaken`] if the new email belongs
/// to someone else, or a storage error if the change cannot be written.
#[instrument(skip_all, fields(user_id = %updated.id))]
pub fn update_user<S: KeyValueStore + ?Sized>(
    store: &mut S,
    data: &StoreData,
    updated: &User,
) -> Result<(), AuthError> {
    match current_user(store) {
        Some(current) if current.id == updated.id => {}
        _ => return Err(AuthError::NotSignedIn(updated.id)),
    }
    let owner = find_account(&*store, data, &updated.email)?;
    if owner.is_some_and(|o| o.id != updated.id) {
        return Err(AuthError::EmailTaken(updated.email.clone()));
    }

    save_account(store, updated)?;
    store.set(keys::CURRENT_USER, &serde_json::to_string(updated)?)?;
    info!("Profile updated");
    Ok(())
}
