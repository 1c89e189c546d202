//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. `insert_batch` writes a whole
//! import batch with one multi-row `INSERT`, so a batch lands or fails as
//! a unit.

pub mod festival_repo;
pub mod hotel_repo;
pub mod place_repo;
pub mod restaurant_repo;
pub mod vehicle_repo;

pub use festival_repo::FestivalRepo;
pub use hotel_repo::HotelRepo;
pub use place_repo::PlaceRepo;
pub use restaurant_repo::RestaurantRepo;
pub use vehicle_repo::VehicleRepo;
