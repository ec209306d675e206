use super::IRoleRepo;
use colorfest_domain::ID;
use std::collections::HashSet;
use std::sync::Mutex;

/// Role assignments backed by a set of admin user ids, used by tests.
pub struct InMemoryRoleRepo {
    admins: Mutex<HashSet<ID>>,
}

impl InMemoryRoleRepo {
    pub fn new() -> Self {
        Self {
            admins: Mutex::new(HashSet::new()),
        }
    }

    pub fn grant_admin(&self, user_id: ID) {
        self.admins.lock().unwrap().insert(user_id);
    }
}

impl Default for InMemoryRoleRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IRoleRepo for InMemoryRoleRepo {
    async fn is_admin(&self, user_id: &ID) -> anyhow::Result<bool> {
        Ok(self.admins.lock().unwrap().contains(user_id))
    }
}
