pub mod auth;
pub mod booking_service;
pub mod crm_service;
pub mod dashboard_service;
pub mod document_service;
pub mod guest_service;
pub mod hotel_service;
pub mod inventory_service;
pub mod menu_service;
