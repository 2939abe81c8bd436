//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on the
//! registry port and a clock, and stay testable with mocks.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::UserRegistry;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use user_registry::domain::{DEFAULT_MINIMUM_AGE, UserRegistryService};
/// use user_registry::inbound::http::state::HttpState;
/// use user_registry::outbound::memory::InMemoryUserRepository;
///
/// let clock = Arc::new(DefaultClock);
/// let service = UserRegistryService::new(
///     InMemoryUserRepository::new(),
///     clock.clone(),
///     DEFAULT_MINIMUM_AGE,
/// );
/// let state = HttpState::new(Arc::new(service), clock);
/// let _users = state.users.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRegistry>,
    /// Source of "today" for request-level birth date checks.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    pub fn new(users: Arc<dyn UserRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}
