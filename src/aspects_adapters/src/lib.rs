pub mod catalog;
pub mod config;
pub mod permissions;
pub mod session;
pub mod superset;
