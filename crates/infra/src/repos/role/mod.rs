mod inmemory;
mod rest;

pub use inmemory::InMemoryRoleRepo;
pub use rest::RestRoleRepo;

use colorfest_domain::ID;

/// Role assignments, read-only. The only question this application ever
/// asks is whether a user holds the admin role.
#[async_trait::async_trait]
pub trait IRoleRepo: Send + Sync {
    async fn is_admin(&self, user_id: &ID) -> anyhow::Result<bool>;
}
