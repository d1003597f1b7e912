//! Caller identity established from a verified bearer credential.
//!
//! Token verification happens in an outbound adapter; the domain only sees
//! the resulting [`Principal`].

use std::fmt;

use crate::domain::UserId;

/// Role claim value that grants administrative rights.
pub const ADMIN_ROLE: &str = "admin";

/// Coarse authorisation role of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Regular marketplace user.
    Customer,
    /// Moderator with rights over every listing.
    Admin,
}

impl Role {
    /// Derive the role from token claims.
    ///
    /// Either a `role` claim equal to `admin` (any case) or an `isAdmin`
    /// claim set to `true` grants [`Role::Admin`]; anything else is a
    /// customer.
    ///
    /// # Examples
    /// ```
    /// use marketplace::domain::Role;
    ///
    /// assert_eq!(Role::from_claims(Some("admin"), None), Role::Admin);
    /// assert_eq!(Role::from_claims(Some("seller"), Some(true)), Role::Admin);
    /// assert_eq!(Role::from_claims(Some("seller"), None), Role::Customer);
    /// ```
    #[must_use]
    pub fn from_claims(role: Option<&str>, is_admin: Option<bool>) -> Self {
        let admin_role = role.is_some_and(|value| value.trim().eq_ignore_ascii_case(ADMIN_ROLE));
        if admin_role || is_admin == Some(true) {
            Self::Admin
        } else {
            Self::Customer
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => f.write_str("customer"),
            Self::Admin => f.write_str(ADMIN_ROLE),
        }
    }
}

/// Authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    id: UserId,
    role: Role,
}

impl Principal {
    /// Build a principal from a verified identity.
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Identifier of the caller.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Role granted to the caller.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the caller may moderate listings.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
