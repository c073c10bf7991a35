//! Back-office settings; the client only reads them to offer model choices

use serde::{Deserialize, Serialize};

pub const MODELS_CATEGORY: &str = "models";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub id: i64,
    pub key: String,
    pub value: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Setting {
    pub fn is_model(&self) -> bool {
        self.category == MODELS_CATEGORY
    }
}

/// Settings of the `models` category, in server order
pub fn model_options(settings: Vec<Setting>) -> Vec<Setting> {
    settings.into_iter().filter(Setting::is_model).collect()
}
