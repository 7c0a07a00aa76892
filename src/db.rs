pub mod scope;
pub use scope::HotelScope;

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod hotel_repo;
pub use hotel_repo::HotelRepository;
pub mod room_repo;
pub use room_repo::RoomRepository;
pub mod guest_repo;
pub use guest_repo::GuestRepository;
pub mod booking_repo;
pub use booking_repo::{BookingRepository, NewBooking};
pub mod menu_repo;
pub use menu_repo::MenuRepository;
pub mod crm_repo;
pub use crm_repo::CrmRepository;
