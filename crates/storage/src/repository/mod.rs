pub mod hackathon;
pub mod profile;
