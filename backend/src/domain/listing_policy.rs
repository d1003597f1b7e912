//! Ownership and moderation rules for listing mutations.
//!
//! Reads are public and creation only needs an authenticated caller, so the
//! policy only covers actions against an existing listing.

use crate::domain::{Error, Listing, Principal};

/// Mutating action a caller attempts on an existing listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingAction {
    /// Owner edit; `changes_featured` is set when the edit flips the flag.
    Update { changes_featured: bool },
    /// Owner removal.
    Delete,
    /// Administrative removal of any listing.
    ModerateDelete,
    /// Administrative change of the featured flag.
    SetFeatured,
}

/// Why an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolicyDenial {
    /// Only the listing's owner may do this.
    #[error("only the listing owner may perform this action")]
    NotOwner,
    /// Only administrators may do this.
    #[error("administrator role required")]
    AdminRequired,
}

impl From<PolicyDenial> for Error {
    fn from(value: PolicyDenial) -> Self {
        Self::forbidden(value.to_string())
    }
}

/// Decide whether `principal` may perform `action` on `listing`.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use marketplace::domain::{
///     Listing, ListingAction, ListingCode, ListingDraft, ListingId, PolicyDenial, Principal,
///     Role, UserId, authorize,
/// };
///
/// let owner = UserId::random();
/// let listing = Listing::create(
///     ListingId::random(),
///     ListingCode::first(),
///     owner,
///     ListingDraft {
///         title: "Desk".to_owned(),
///         description: "Oak desk".to_owned(),
///         price: 12000.0,
///         currency: None,
///         category: "Home & Living".to_owned(),
///         images: vec![],
///         country: "Sri Lanka".to_owned(),
///         urgent: false,
///         badge: None,
///     }
///     .validate()
///     .expect("valid draft"),
///     Utc::now(),
/// );
///
/// let stranger = Principal::new(UserId::random(), Role::Customer);
/// assert_eq!(
///     authorize(&stranger, ListingAction::Delete, &listing),
///     Err(PolicyDenial::NotOwner)
/// );
/// ```
pub fn authorize(
    principal: &Principal,
    action: ListingAction,
    listing: &Listing,
) -> Result<(), PolicyDenial> {
    let is_owner = principal.id() == listing.owner();
    match action {
        ListingAction::Update { changes_featured } => {
            if !is_owner {
                return Err(PolicyDenial::NotOwner);
            }
            if changes_featured && !principal.is_admin() {
                return Err(PolicyDenial::AdminRequired);
            }
            Ok(())
        }
        ListingAction::Delete => {
            if is_owner {
                Ok(())
            } else {
                Err(PolicyDenial::NotOwner)
            }
        }
        ListingAction::ModerateDelete | ListingAction::SetFeatured => {
            if principal.is_admin() {
                Ok(())
            } else {
                Err(PolicyDenial::AdminRequired)
            }
        }
    }
}
