use std::sync::Arc;

use cloudinary_images::{
    AccountDescriptor, AccountProbe, AdminError, ApiResponse, CloudinaryAdminClient, Connector,
    DEFAULT_API_BASE, Method,
};
use reqwest::Url;

use crate::message::remote_message;

const USER_AGENT: &str = "cloudinary-images";

/// Admin API client for one Cloudinary account.
pub struct CloudinaryHttpClient {
    account: AccountDescriptor,
    api_base: String,
    client: reqwest::Client,
}

impl CloudinaryHttpClient {
    pub fn new(account: AccountDescriptor, api_base_url: Option<String>) -> Self {
        Self::with_client(account, api_base_url, reqwest::Client::new())
    }

    /// Reuse an existing connection pool.
    pub fn with_client(
        account: AccountDescriptor,
        api_base_url: Option<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            account,
            api_base: api_base_url.unwrap_or_else(|| DEFAULT_API_BASE.to_owned()),
            client,
        }
    }

    /// Admin URL for `segments` under this account's cloud. Each segment is
    /// percent-encoded, so names never add path levels, a query or a fragment.
    fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, AdminError> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(AdminError::Status {
                status: 400,
                message: format!("invalid resource name {bad:?}"),
            });
        }

        let base = self.account.admin_url(&self.api_base, "");
        let mut url = Url::parse(&base)
            .map_err(|e| AdminError::Network(format!("invalid admin URL {base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| AdminError::Network(format!("admin URL cannot take a path: {base}")))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: reqwest::Method,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, AdminError> {
        let url = self.url(segments, query)?;
        tracing::debug!(%method, path = url.path(), "cloudinary admin request");

        let response = self
            .client
            .request(method, url)
            .header("User-Agent", USER_AGENT)
            .basic_auth(self.account.api_key(), Some(self.account.api_secret()))
            .send()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        Ok(ApiResponse::new(status.as_u16(), remote_message(status, &body)))
    }

    async fn write(
        &self,
        method: Method,
        name: &str,
        value: &str,
    ) -> Result<ApiResponse, AdminError> {
        let http_method = match method {
            Method::Create => reqwest::Method::POST,
            Method::Update => reqwest::Method::PUT,
        };
        self.send(
            http_method,
            &["transformations", name],
            &[(method.parameter(), value)],
        )
        .await
    }
}

#[async_trait::async_trait]
impl CloudinaryAdminClient for CloudinaryHttpClient {
    async fn exists(&self, name: &str) -> Result<bool, AdminError> {
        let response = self
            .send(reqwest::Method::GET, &["transformations", name], &[])
            .await?;

        match response.status {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(AdminError::Status {
                status: response.status,
                message: response.message,
            }),
        }
    }

    async fn create(&self, name: &str, value: &str) -> Result<ApiResponse, AdminError> {
        self.write(Method::Create, name, value).await
    }

    async fn update(&self, name: &str, value: &str) -> Result<ApiResponse, AdminError> {
        self.write(Method::Update, name, value).await
    }
}

#[async_trait::async_trait]
impl AccountProbe for CloudinaryHttpClient {
    async fn check_credentials(&self) -> Result<u16, AdminError> {
        let response = self.send(reqwest::Method::GET, &["resources"], &[]).await?;
        Ok(response.status)
    }

    async fn check_preset(&self, preset: &str) -> Result<u16, AdminError> {
        let response = self
            .send(reqwest::Method::GET, &["upload_presets", preset], &[])
            .await?;
        Ok(response.status)
    }
}

/// Hands out HTTP clients that share one connection pool.
#[derive(Clone, Default)]
pub struct HttpConnector {
    api_base_url: Option<String>,
    client: reqwest::Client,
}

impl HttpConnector {
    pub fn new(api_base_url: Option<String>) -> Self {
        Self {
            api_base_url,
            client: reqwest::Client::new(),
        }
    }

    fn client_for(&self, account: &AccountDescriptor) -> Arc<CloudinaryHttpClient> {
        Arc::new(CloudinaryHttpClient::with_client(
            account.clone(),
            self.api_base_url.clone(),
            self.client.clone(),
        ))
    }
}

impl Connector for HttpConnector {
    fn admin(&self, account: &AccountDescriptor) -> Arc<dyn CloudinaryAdminClient> {
        self.client_for(account)
    }

    fn probe(&self, account: &AccountDescriptor) -> Arc<dyn AccountProbe> {
        self.client_for(account)
    }
}
