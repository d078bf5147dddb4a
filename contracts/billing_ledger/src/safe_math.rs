//! Checked i128 helpers for fee and balance arithmetic.
//!
//! Monetary overflow or underflow is an invariant violation, never a value:
//! each helper turns it into an error that aborts the enclosing invocation.

use crate::types::Error;

/// Overflow-checked addition.
///
/// ```
/// use billing_ledger::safe_math::safe_add;
/// use billing_ledger::Error;
///
/// assert_eq!(safe_add(100, 200), Ok(300));
/// assert_eq!(safe_add(i128::MAX, 1), Err(Error::Overflow));
/// ```
pub fn safe_add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::Overflow)
}

/// Underflow-checked subtraction.
pub fn safe_sub(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_sub(b).ok_or(Error::Underflow)
}

/// Overflow-checked multiplication, for `fee * periods` style products that
/// can exceed `i128::MAX` under adversarial fee values.
pub fn safe_mul(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_mul(b).ok_or(Error::Overflow)
}

/// Rejects negative amounts at the boundary, so a caller can never add or
/// subtract a negative value against a balance.
pub fn validate_non_negative(amount: i128) -> Result<(), Error> {
    if amount < 0 {
        Err(Error::Underflow)
    } else {
        Ok(())
    }
}

/// Credits `amount` to a balance. Rejects negative amounts, so the result is
/// always >= 0 on success.
///
/// ```
/// use billing_ledger::safe_math::safe_add_balance;
/// use billing_ledger::Error;
///
/// assert_eq!(safe_add_balance(1000, 500), Ok(1500));
/// assert_eq!(safe_add_balance(1000, -100), Err(Error::Underflow));
/// ```
pub fn safe_add_balance(balance: i128, amount: i128) -> Result<i128, Error> {
    validate_non_negative(amount)?;
    safe_add(balance, amount)
}

/// Debits `amount` from a balance without letting it go negative.
///
/// ```
/// use billing_ledger::safe_math::safe_sub_balance;
/// use billing_ledger::Error;
///
/// assert_eq!(safe_sub_balance(1000, 1000), Ok(0));
/// assert_eq!(safe_sub_balance(1000, 1500), Err(Error::Underflow));
/// ```
pub fn safe_sub_balance(balance: i128, amount: i128) -> Result<i128, Error> {
    validate_non_negative(amount)?;
    let result = safe_sub(balance, amount)?;
    if result < 0 {
        Err(Error::Underflow)
    } else {
        Ok(result)
    }
}
