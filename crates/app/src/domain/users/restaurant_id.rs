//! Restaurant identifier derivation for owner accounts.

use crate::domain::users::records::{Role, UserRecord};

/// Restaurant identifier an account acts for.
///
/// Customers have none. Owners resolve, in order, to their stored identifier, the configured
/// default, `r_<legacy id>`, and finally their own UUID. The result depends only on the
/// arguments, so every caller computes the same value for the same account.
#[must_use]
pub fn derive_restaurant_id(user: &UserRecord, default_id: Option<&str>) -> Option<String> {
    if user.role != Role::Ristoratore {
        return None;
    }

    if let Some(existing) = non_blank(user.restaurant_id.as_deref()) {
        return Some(existing.to_string());
    }

    if let Some(default_id) = non_blank(default_id) {
        return Some(default_id.to_string());
    }

    if let Some(legacy_id) = user.legacy_id {
        return Some(format!("r_{legacy_id}"));
    }

    Some(user.id.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
