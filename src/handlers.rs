pub mod accounts;
pub mod events;
pub mod feedbacks;
pub mod health;
