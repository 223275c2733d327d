use crate::domain::service::ServiceStore;
use crate::domain::team::TeamStore;
use crate::domain::token::TokenStore;
use crate::domain::user::UserStore;

/// The full storage port: every capability the directories rely on.
///
/// All writes are visible to later reads on the same instance. Nothing is
/// transactional across entity types.
pub trait DirectoryStore: UserStore + TeamStore + ServiceStore + TokenStore {}

impl<T> DirectoryStore for T where T: UserStore + TeamStore + ServiceStore + TokenStore {}
