pub mod hackathons;
pub mod profiles;
