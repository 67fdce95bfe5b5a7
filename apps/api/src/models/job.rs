use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::form::FormData;
use crate::models::outputs::{Insights, Outputs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Processing,
    Completed,
    Error,
}

/// One end-to-end processing attempt for a single form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub form_data: FormData,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Outputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    pub fn new(form_data: FormData) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            form_data,
            status: JobStatus::Processing,
            created_at: now,
            updated_at: now,
            insights: None,
            outputs: None,
            error: None,
        }
    }

    pub fn complete(&mut self, insights: Insights, outputs: Outputs) {
        self.status = JobStatus::Completed;
        self.insights = Some(insights);
        self.outputs = Some(outputs);
        self.error = None;
    }

    /// Marks the job failed. Partial stage results are dropped; only the
    /// message survives.
    pub fn fail(&mut self, message: String) {
        self.status = JobStatus::Error;
        self.insights = None;
        self.outputs = None;
        self.error = Some(message);
    }
}
