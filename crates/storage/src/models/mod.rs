pub mod continent;
pub mod coordinates;
pub mod event_type;
pub mod hackathon;
pub mod profile;

pub use continent::Continent;
pub use coordinates::Coordinates;
pub use event_type::EventType;
pub use hackathon::{Hackathon, HackathonRow, NewHackathon, RawHackathon, RawScalar};
pub use profile::{NewProfile, Profile, SubscriptionTier};
