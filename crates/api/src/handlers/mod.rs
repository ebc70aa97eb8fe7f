pub mod auth;
pub mod inspections;
pub mod sites;
pub mod stations;
pub mod uploads;
