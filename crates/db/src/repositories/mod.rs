//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod inspection_repo;
pub mod job_repo;
pub mod site_repo;
pub mod station_repo;
pub mod user_repo;

pub use inspection_repo::InspectionRepo;
pub use job_repo::JobRepo;
pub use site_repo::SiteRepo;
pub use station_repo::StationRepo;
pub use user_repo::UserRepo;
