//! Database initialization shared by MoodChef services

pub mod init;

pub use init::init_database;
