use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::services::export_service::ExportFormat;

/// Ratio-of-sums score over a set of results.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AggregateScoreResponse {
    pub user_id: i64,
    pub company_id: Option<i64>,
    pub average_score: f64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TranscriptQuery {
    pub quiz_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CompanyTranscriptQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
    pub quiz_id: Option<i64>,
    pub user_id: Option<i64>,
}
