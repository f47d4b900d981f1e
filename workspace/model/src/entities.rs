//! Root of all SeaORM entity modules for the booking service.
//!
//! Many-to-many relations (event ↔ music style, event ↔ candidate artist,
//! event ↔ lineup artist) are modelled with explicit join entities.

pub mod address;
pub mod auth_token;
pub mod candidature;
pub mod event;
pub mod event_music_style;
pub mod feedback;
pub mod lineup_entry;
pub mod music_style;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::address::Entity as Address;
    pub use super::auth_token::Entity as AuthToken;
    pub use super::candidature::Entity as Candidature;
    pub use super::event::Entity as Event;
    pub use super::event_music_style::Entity as EventMusicStyle;
    pub use super::feedback::Entity as Feedback;
    pub use super::lineup_entry::Entity as LineupEntry;
    pub use super::music_style::Entity as MusicStyle;
    pub use super::user::Entity as User;
}
