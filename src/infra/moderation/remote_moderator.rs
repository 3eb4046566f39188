// Remote moderator - calls the hosted `moderate-message` function.
//
// **Contract:**
// - POST `<endpoint>/functions/v1/moderate-message`
// - `Authorization: Bearer <access token>`
// - Body `{ "content": ..., "userId": ... }`
// - Response `{ "isBlocked": ..., "infractions": [...], "message": ... }`
//
// Anything other than a 2xx with a readable verdict is an error. The caller
// never sees a made-up "allowed" verdict.

use crate::core::moderation::{MessageModerator, ModerationError, ModerationRequest, Verdict};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const FUNCTION_PATH: &str = "/functions/v1/moderate-message";

pub struct RemoteModerator {
    client: Client,
    url: String,
    access_token: String,
}

impl RemoteModerator {
    pub fn new(
        endpoint: &str,
        access_token: String,
        timeout: Duration,
    ) -> Result<Self, ModerationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModerationError::Invocation(e.to_string()))?;

        Ok(Self {
            client,
            url: format!("{}{}", endpoint.trim_end_matches('/'), FUNCTION_PATH),
            access_token,
        })
    }
}

#[async_trait]
impl MessageModerator for RemoteModerator {
    async fn moderate(&self, request: &ModerationRequest) -> Result<Verdict, ModerationError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| ModerationError::Invocation(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ModerationError::Unauthenticated);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ModerationError::Invocation(format!(
                "moderate-message returned {} - {}",
                status, text
            )));
        }

        let verdict: Verdict = response
            .json()
            .await
            .map_err(|e| ModerationError::InvalidResponse(e.to_string()))?;

        // A blocked verdict must say why.
        if verdict.is_blocked && verdict.infractions.is_empty() {
            return Err(ModerationError::InvalidResponse(
                "blocked verdict without infractions".to_string(),
            ));
        }

        tracing::debug!(
            user_id = %request.user_id,
            is_blocked = verdict.is_blocked,
            "Remote moderation answered"
        );

        Ok(verdict)
    }
}
