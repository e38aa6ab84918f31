pub mod error;
pub mod seeder;
pub mod sources;
pub mod traits;
pub mod validator;

pub use error::{ImporterError, Result};
pub use seeder::Seeder;
pub use sources::JsonFileSource;
pub use traits::HackathonSource;
pub use validator::{BatchValidator, ValidationReport};
