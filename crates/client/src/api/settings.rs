use crate::client::ApiClient;
use common::InsightResult;
use domain::entities::{model_options, Setting};

impl ApiClient {
    pub async fn settings(&self) -> InsightResult<Vec<Setting>> {
        self.get_json(&["settings"], &[], "Failed to fetch settings")
            .await
    }

    /// Settings offered in the model selectors
    pub async fn models(&self) -> InsightResult<Vec<Setting>> {
        Ok(model_options(self.settings().await?))
    }
}
