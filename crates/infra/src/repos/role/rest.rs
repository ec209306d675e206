use super::IRoleRepo;
use crate::rest::{Filter, RestClient};
use colorfest_domain::ID;
use serde::Deserialize;
use std::sync::Arc;

pub struct RestRoleRepo {
    client: Arc<RestClient>,
}

impl RestRoleRepo {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct RoleRaw {
    #[allow(dead_code)]
    role: String,
}

#[async_trait::async_trait]
impl IRoleRepo for RestRoleRepo {
    async fn is_admin(&self, user_id: &ID) -> anyhow::Result<bool> {
        let filter = Filter::new()
            .eq("user_id", user_id)
            .eq("role", "admin")
            .select(&["role"]);
        let rows: Vec<RoleRaw> = self.client.fetch_many("user_roles", &filter, None).await?;
        Ok(!rows.is_empty())
    }
}
