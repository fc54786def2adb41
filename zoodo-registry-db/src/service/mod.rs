pub mod clock;
pub mod guard;
pub mod registry_service;

pub use clock::*;
pub use guard::*;
pub use registry_service::*;
