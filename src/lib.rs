pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::entities;
pub use domain::value_objects;
pub use application::{services, use_cases};
pub use infrastructure::repositories;
