pub mod auth;
pub mod hotel;
pub mod room;
pub mod guest;
pub mod booking;
pub mod menu;
pub mod crm;
pub mod dashboard;
pub mod assistant;
