pub mod common;
pub mod hackathon;
pub mod profile;
