//! HTTP surface of the exploration service.
//!
//! Two endpoints: `POST /explore` to launch an exploration and
//! `GET /result/<id>` to poll it. Non-success statuses become typed
//! transport errors carrying the response body.

use reqwest::{Client, StatusCode};
use scry_common::config::ServiceSettings;
use scry_common::models::{ColumnIdentity, LaunchRequest, LaunchResponse, QueryResult};
use scry_error::{ErrorCode, ErrorContext, Result, ScryError};
use secrecy::ExposeSecret;
use std::time::Duration;

pub(crate) fn build_http_client(service: &ServiceSettings) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(service.request_timeout_secs))
        .build()
        .map_err(ScryError::from)
}

fn endpoint(service: &ServiceSettings, path: &str) -> String {
    format!("{}/{}", service.base_url.trim_end_matches('/'), path)
}

pub(crate) async fn post_explore(
    client: &Client,
    service: &ServiceSettings,
    identity: &ColumnIdentity,
) -> Result<LaunchResponse> {
    let url = endpoint(service, "explore");
    let request = LaunchRequest {
        api_key: service
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().to_string())
            .unwrap_or_default(),
        data_source_name: identity.dataset.clone(),
        table_name: identity.table.clone(),
        column_name: identity.column.clone(),
    };

    let resp = client.post(&url).json(&request).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let code = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorCode::InvalidApiKey,
            _ => ErrorCode::RequestFailed,
        };
        return Err(
            ScryError::new(code, format!("Launch request failed: {} - {}", status, body))
                .with_context(ErrorContext::Http {
                    url,
                    status: Some(status.as_u16()),
                    body: Some(body),
                }),
        );
    }

    resp.json::<LaunchResponse>().await.map_err(ScryError::from)
}

pub(crate) async fn get_result(
    client: &Client,
    service: &ServiceSettings,
    id: &str,
) -> Result<QueryResult> {
    let url = endpoint(service, &format!("result/{}", id));

    let resp = client.get(&url).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(ScryError::new(
            ErrorCode::RequestFailed,
            format!("Result request failed: {} - {}", status, body),
        )
        .with_context(ErrorContext::Http {
            url,
            status: Some(status.as_u16()),
            body: Some(body),
        }));
    }

    resp.json::<QueryResult>().await.map_err(ScryError::from)
}
