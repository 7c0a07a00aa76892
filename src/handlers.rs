pub mod admin;
pub mod auth;
pub mod bookings;
pub mod crm;
pub mod dashboard;
pub mod documents;
pub mod guests;
pub mod hotels;
pub mod inventory;
pub mod menu;
pub mod public;
