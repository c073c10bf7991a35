use crate::client::ApiClient;
use common::InsightResult;
use domain::entities::Evaluation;
use domain::DocLevel;

/// Suffix the server expects on the documentation path of an evaluation
const EVALUATION_SUFFIX: &str = "_evaluation";

impl ApiClient {
    /// Fetch the stored evaluation of a document, or have `model` write one
    pub async fn evaluation(
        &self,
        path: &str,
        level: DocLevel,
        model: &str,
    ) -> InsightResult<Evaluation> {
        let evaluation_path = format!("{}{}", path, EVALUATION_SUFFIX);
        let query = [
            ("path", evaluation_path.as_str()),
            ("level", level.as_str()),
            ("model", model),
        ];
        self.retrying("evaluation", || {
            self.get_json(&["evaluation"], &query, "Failed to fetch evaluation")
        })
        .await
    }
}
