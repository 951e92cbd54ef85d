//! Session store client.
//!
//! Publishes a finished resolution to the shared session document so
//! other participants can read it. Publishing is fire and forget from
//! the engine's point of view.

use crate::engine::evaluation::EvaluatedVenue;
use crate::engine::geo::GeoPoint;
use crate::engine::MeetingResolution;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// Errors that can arise from publishing a resolution
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PublishError {
    /// Could not contact the session store
    Transport,
    /// The session store answered with a non success status
    Rejected,
}

impl Display for PublishError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PublishError::Transport => write!(f, "Could not contact session store"),
            PublishError::Rejected => write!(f, "Session store rejected the update"),
        }
    }
}

/// Interface for any resolution sink
#[async_trait]
pub trait ResultPublisher: Send + Sync + Debug {
    /// Publish a resolution under an opaque session id
    async fn publish(
        &self,
        session_id: &str,
        resolution: &MeetingResolution,
    ) -> Result<(), PublishError>;
}

/// Wire shape written to the session document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionUpdate<'a> {
    midpoint: &'a GeoPoint,
    venues: &'a [EvaluatedVenue],
    /// Unix epoch milliseconds of the resolution
    last_calculated: i64,
}

/// [ResultPublisher] implementation backed by a JSON document store
#[derive(Debug)]
pub struct HttpSessionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSessionClient {
    /// Create a new client against the given base URL
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        HttpSessionClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_session_url(&self, session_id: &str) -> String {
        format!("{}/sessions/{}.json", self.base_url, session_id)
    }
}

#[async_trait]
impl ResultPublisher for HttpSessionClient {
    async fn publish(
        &self,
        session_id: &str,
        resolution: &MeetingResolution,
    ) -> Result<(), PublishError> {
        let url = self.build_session_url(session_id);
        let update = SessionUpdate {
            midpoint: &resolution.midpoint,
            venues: &resolution.venues,
            last_calculated: chrono::Utc::now().timestamp_millis(),
        };

        let response = self
            .client
            .patch(&url)
            .json(&update)
            .send()
            .await
            .map_err(|e| {
                client_warn!("(publish) session update failed: {}", e.without_url());
                PublishError::Transport
            })?;

        if !response.status().is_success() {
            client_warn!(
                "(publish) session store rejected update for session [{}]: status [{}].",
                session_id,
                response.status()
            );
            return Err(PublishError::Rejected);
        }

        client_info!("(publish) published resolution for session [{}].", session_id);
        Ok(())
    }
}
