use serde::Serialize;
use synthalert_common::{RuleGroup, WireRule};

use super::{FetchError, PersistError, RuleStorage};
use crate::config::RulerConfig;

/// Client for a Prometheus/Cortex style ruler API.
///
/// The rule set lives in a single group: `GET {url}/rules/{namespace}/{group}`
/// reads it and `POST {url}/rules/{namespace}` replaces it.
pub struct RulerClient {
    base_url: String,
    namespace: String,
    group: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct GroupPayload<'a> {
    name: &'a str,
    rules: &'a [WireRule],
}

impl RulerClient {
    pub fn new(config: &RulerConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            namespace: config.namespace.clone(),
            group: config.group.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn namespace_url(&self) -> String {
        format!("{}/rules/{}", self.base_url, self.namespace)
    }

    fn group_url(&self) -> String {
        format!("{}/{}", self.namespace_url(), self.group)
    }
}

fn encode_group(name: &str, rules: &[WireRule]) -> Result<String, PersistError> {
    serde_yaml::to_string(&GroupPayload { name, rules })
        .map_err(|e| PersistError::Encode(e.to_string()))
}

fn decode_group(body: &str) -> Result<Vec<WireRule>, FetchError> {
    let group: RuleGroup =
        serde_yaml::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(group.rules)
}

impl RuleStorage for RulerClient {
    async fn fetch_rules(&self) -> Result<Vec<WireRule>, FetchError> {
        let url = self.group_url();
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::info!(%url, "rule group does not exist yet");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(FetchError::Rejected(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        decode_group(&body)
    }

    async fn persist_rules(&self, rules: &[WireRule]) -> Result<(), PersistError> {
        let body = encode_group(&self.group, rules)?;

        let resp = self
            .http
            .post(self.namespace_url())
            .header("Content-Type", "application/yaml")
            .body(body)
            .send()
            .await
            .map_err(|e| PersistError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(PersistError::Rejected(status.as_u16()))
        }
    }
}
