use super::auth::CrmAuth;
use super::types::{AssignRequest, ErrorBody};
use super::CrmError;
use crate::config::CrmConfig;
use crate::engine::Lead;
use crate::feed::{AssignAction, LeadSource};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use std::time::Duration;

#[derive(Debug)]
pub struct CrmRest {
    client: Client,
    auth: CrmAuth,
    base_url: Url,
    leads_path: String,
    assign_path: String,
}

impl CrmRest {
    pub fn new(auth: CrmAuth, config: &CrmConfig) -> Result<Self, CrmError> {
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        let base_url = Url::parse(&config.api_base)
            .map_err(|e| CrmError::InvalidUrl(format!("{}: {}", config.api_base, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CrmError::InvalidUrl(config.api_base.clone()));
        }
        Ok(Self {
            client,
            auth,
            base_url,
            leads_path: config.leads_path.clone(),
            assign_path: config.assign_path.clone(),
        })
    }

    fn leads_url(&self) -> Url {
        self.endpoint(&self.leads_path, "")
    }

    fn assign_url(&self, lead_id: &str) -> Url {
        self.endpoint(&self.assign_path, lead_id)
    }

    /// Append `template`'s segments to the base path. A `{id}` segment becomes
    /// `lead_id`, percent-encoded as a single segment.
    fn endpoint(&self, template: &str, lead_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // checked in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            for segment in template.split('/').filter(|s| !s.is_empty()) {
                segments.push(if segment == "{id}" { lead_id } else { segment });
            }
        }
        url
    }

    fn authed(&self, mut req: RequestBuilder) -> RequestBuilder {
        for (k, v) in self.auth.headers() {
            req = req.header(k, v);
        }
        req
    }

    /// Turn a non-2xx response into `CrmError::Api`, keeping any structured body.
    async fn check_status(resp: Response) -> Result<Response, CrmError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let raw = resp.text().await.unwrap_or_default();
        Err(CrmError::Api {
            status: status.as_u16(),
            body: ErrorBody::parse(&raw),
        })
    }
}

#[async_trait]
impl LeadSource for CrmRest {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, CrmError> {
        let url = self.leads_url();
        let resp = self.authed(self.client.get(url)).send().await?;
        let resp = Self::check_status(resp).await?;
        let raw = resp.text().await?;
        serde_json::from_str(&raw).map_err(|e| CrmError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AssignAction for CrmRest {
    async fn assign_to_me(&self, lead_id: &str) -> Result<(), CrmError> {
        let url = self.assign_url(lead_id);
        let req = self.client.post(url).json(&AssignRequest { lead_id });
        let resp = self.authed(req).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }
}
