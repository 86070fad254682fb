pub mod appointment;
pub mod auth;
pub mod barber;
pub mod client;
pub mod health;
pub mod location;
pub mod service;
pub mod tenant;
