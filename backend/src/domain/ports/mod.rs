//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod listing_code_sequence;
mod listing_command;
mod listing_events;
mod listing_query;
mod listing_repository;
mod token_verifier;

#[cfg(test)]
pub use listing_code_sequence::MockListingCodeSequence;
pub use listing_code_sequence::{ListingCodeSequence, ListingCodeSequenceError};
#[cfg(test)]
pub use listing_command::MockListingCommand;
pub use listing_command::{
    CreateListingRequest, DeleteListingRequest, ListingCommand, SetFeaturedRequest,
    UpdateListingRequest,
};
#[cfg(test)]
pub use listing_events::MockListingEvents;
pub use listing_events::{ListingEvents, ListingEventsError};
#[cfg(test)]
pub use listing_query::MockListingQuery;
pub use listing_query::ListingQuery;
#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{ListingRepository, ListingRepositoryError};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{TokenVerificationError, TokenVerifier};
