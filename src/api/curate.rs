use std::sync::Arc;

use axum::{Extension, extract::Query, http::StatusCode};
use serde::Deserialize;

use crate::{config::Settings, curation, success, warning};

#[derive(Debug, Default, Deserialize)]
pub struct CurateQuery {
    #[serde(default)]
    pub test: Option<String>,
}

impl CurateQuery {
    /// Any non-empty `test` value turns smoke-test mode on.
    pub fn test_mode(&self) -> bool {
        self.test.as_deref().is_some_and(|v| !v.is_empty())
    }
}

pub async fn curate(
    Query(query): Query<CurateQuery>,
    Extension(settings): Extension<Arc<Settings>>,
) -> (StatusCode, String) {
    match curation::curate(&settings, query.test_mode()).await {
        Ok(count) => {
            success!("Running playlist rewritten with {} tracks", count);
            (StatusCode::OK, count.to_string())
        }
        Err(e) => {
            warning!("Curation failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
