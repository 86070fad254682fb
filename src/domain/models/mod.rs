pub mod account;
pub mod appointment;
pub mod auth;
pub mod location;
pub mod service;
pub mod tenant;
