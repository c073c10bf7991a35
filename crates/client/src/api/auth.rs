use super::MessageResponse;
use crate::client::ApiClient;
use common::InsightResult;
use domain::User;

impl ApiClient {
    /// User owning the current bearer token
    pub async fn me(&self) -> InsightResult<User> {
        self.get_json(&["auth", "me"], &[], "Failed to fetch current user")
            .await
    }

    pub async fn logout(&self) -> InsightResult<()> {
        let _: MessageResponse = self
            .post_query(&["auth", "logout"], &[], "Failed to log out")
            .await?;
        Ok(())
    }
}
