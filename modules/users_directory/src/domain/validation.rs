//! Input rules shared by create and full update.

use crate::domain::error::DomainError;

/// Syntax check: exactly one `@`, a non-empty local part, and a dotted
/// domain whose labels are all non-empty. Whitespace is never allowed.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    let labels_ok = labels.clone().all(|label| !label.is_empty());
    labels_ok && labels.nth(1).is_some()
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if !is_valid_email(email) {
        return Err(DomainError::invalid_email(email));
    }
    Ok(())
}

pub fn validate_name(name: &str, max_len: usize) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::empty_name());
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(DomainError::name_too_long(len, max_len));
    }
    Ok(())
}
