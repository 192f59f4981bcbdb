pub mod setup;

pub mod user;
