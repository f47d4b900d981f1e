//! Booking rules: accounts, the event candidature/lineup workflow and
//! feedback eligibility. Handlers parse and authenticate; everything that
//! decides whether a change is allowed lives here.

pub mod account;
pub mod error;
pub mod event;
pub mod feedback;
pub mod fields;
pub mod lookup;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Result, WorkflowError};
pub use event::EventSnapshot;
pub use feedback::FeedbackSnapshot;
