//! Classification of middleware error codes into validation categories.
//!
//! # Two-tier error design
//!
//! The middleware reports failures as bare integer codes.  Some of those
//! codes name conditions a call site fully expects and can explain to the
//! user — a mistyped password, a locked key store.  Others are conditions
//! the call site never anticipated.
//!
//! Rather than hardcoding per-call-site error handling, each caller
//! declares the set of [`ValidationCategory`] values it considers
//! *expected* for the operation it is issuing.  [`classify`] resolves the
//! code through a fixed table and checks membership in that set:
//!
//! - code resolves to an accepted category → [`Classification::Expected`]
//!   with a category-specific, user-facing message;
//! - anything else → [`Classification::Unexpected`] with a generic message,
//!   logged at `warn` because it represents a case the caller did not plan
//!   for.
//!
//! Acceptance is an explicit set-membership test.  Combining category
//! flags with boolean or bitwise operators is exactly the kind of bug this
//! module exists to prevent.

use std::collections::HashSet;

use tracing::warn;

/// Named, expected classes of protocol-level failure.
///
/// A caller opts into handling a category gracefully by putting it in the
/// accepted set it passes to [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCategory {
    /// The supplied key-store password is wrong.
    WrongPassword,
    /// Too many wrong passwords; the key store is locked.
    PasswordAttemptsExhausted,
    /// The selected key's type cannot be used for the requested operation.
    UnsupportedKeyType,
    /// The RDN object identifier is not a valid OID.
    MalformedOid,
}

impl ValidationCategory {
    /// The fixed code → category table.
    ///
    /// Every code not listed here is unclassified and can only produce
    /// [`Classification::Unexpected`].
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            3 => Some(ValidationCategory::WrongPassword),
            4 => Some(ValidationCategory::PasswordAttemptsExhausted),
            5 => Some(ValidationCategory::UnsupportedKeyType),
            6 => Some(ValidationCategory::MalformedOid),
            _ => None,
        }
    }

    /// User-facing message for this category.
    pub fn message(self) -> &'static str {
        match self {
            ValidationCategory::WrongPassword => "wrong password",
            ValidationCategory::PasswordAttemptsExhausted => {
                "password attempt limit exhausted; the key store is locked"
            }
            ValidationCategory::UnsupportedKeyType => {
                "the selected key type is not supported for this operation"
            }
            ValidationCategory::MalformedOid => "malformed RDN object identifier",
        }
    }
}

/// Outcome of classifying an error code against a caller's accepted set.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The failure is one the caller declared expected and recoverable.
    Expected {
        /// The resolved category.
        category: ValidationCategory,
        /// Category-specific message suitable for showing to the user.
        message: String,
    },
    /// The failure is one the caller did not anticipate (unknown code, or a
    /// known category outside the accepted set).
    Unexpected {
        /// The raw middleware error code, for diagnostics.
        error_code: i64,
        /// Generic message; the specific cause goes to the log, not the user.
        message: String,
    },
}

/// Maps an error code plus the caller's accepted categories to a final
/// outcome.
///
/// See the module docs for the two-tier design.  Unexpected outcomes are
/// logged at `warn` here so every call site gets diagnostics for free.
pub fn classify(error_code: i64, accepted: &HashSet<ValidationCategory>) -> Classification {
    match ValidationCategory::from_code(error_code) {
        Some(category) if accepted.contains(&category) => Classification::Expected {
            category,
            message: category.message().to_string(),
        },
        resolved => {
            warn!(
                error_code,
                resolved_category = ?resolved,
                "unclassified middleware failure"
            );
            Classification::Unexpected {
                error_code,
                message: format!("unclassified middleware failure (error code {error_code})"),
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
