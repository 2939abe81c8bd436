//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_registry;
mod user_repository;

#[cfg(test)]
pub use user_registry::MockUserRegistry;
pub use user_registry::{UserRegistry, UserRegistryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{ReplaceOutcome, UserRepository};
