//! Input validation rules
//!
//! Every check here runs before any persistence attempt. Lengths are counted
//! in characters (Unicode scalar values), not bytes.

use crate::config::CredentialPolicy;
use crate::errors::{CredstoreError, Result};
use crate::model::NewProduct;

/// Number of characters in `value`
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Enforce the minimum username length
///
/// # Errors
///
/// Returns `UsernameTooShort` below the policy minimum.
pub fn check_username(policy: &CredentialPolicy, username: &str) -> Result<()> {
    if char_len(username) < policy.min_username_length {
        return Err(CredstoreError::UsernameTooShort {
            min: policy.min_username_length,
        });
    }
    Ok(())
}

/// Enforce the minimum password length
///
/// # Errors
///
/// Returns `PasswordTooShort` below the policy minimum.
pub fn check_password(policy: &CredentialPolicy, password: &str) -> Result<()> {
    if char_len(password) < policy.min_password_length {
        return Err(CredstoreError::PasswordTooShort {
            min: policy.min_password_length,
        });
    }
    Ok(())
}

/// Username first, then password, matching the order users see errors in
///
/// # Errors
///
/// See [`check_username`] and [`check_password`].
pub fn check_credentials(policy: &CredentialPolicy, username: &str, password: &str) -> Result<()> {
    check_username(policy, username)?;
    check_password(policy, password)
}

/// # Errors
///
/// Returns `PasswordMismatch` when the two entries differ.
pub fn check_confirmation(password: &str, confirm: &str) -> Result<()> {
    if password != confirm {
        return Err(CredstoreError::PasswordMismatch);
    }
    Ok(())
}

/// Validate and convert raw product form fields
///
/// All three inputs are trimmed. The quantity must consist of ASCII digits
/// only (so signs and decimals are rejected); the price must parse as a
/// finite number strictly above zero.
///
/// # Errors
///
/// Returns `MissingProductName`, `InvalidQuantity` or `InvalidPrice`, checked
/// in that order.
pub fn parse_product_fields(name: &str, quantity: &str, price: &str) -> Result<NewProduct> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CredstoreError::MissingProductName);
    }

    let quantity_text = quantity.trim();
    let quantity = Some(quantity_text)
        .filter(|q| !q.is_empty() && q.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|q| q.parse::<i64>().ok())
        .ok_or_else(|| CredstoreError::InvalidQuantity {
            value: quantity_text.to_string(),
        })?;

    let price_text = price.trim();
    let price = price_text
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| CredstoreError::InvalidPrice {
            value: price_text.to_string(),
        })?;

    Ok(NewProduct {
        name: name.to_string(),
        quantity,
        price,
    })
}
