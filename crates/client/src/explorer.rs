//! Exploration lifecycle orchestration: launch, poll, cache, wrap.

use crate::cache::ResponseCache;
use crate::metrics::Metrics;
use crate::{api, poll};
use scry_common::config::{AppConfig, PollSettings, ServiceSettings};
use scry_common::models::{ColumnIdentity, LaunchResponse, QueryResult, QueryStatus};
use scry_common::warnings;
use scry_error::{ErrorCode, ErrorContext, Result, ScryError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-call explore options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExploreOptions {
    /// Bypass the cache for this call and overwrite the entry on success.
    pub refresh_cache: bool,
}

/// Client for one exploration target.
///
/// Holds the service settings, the immutable [`ColumnIdentity`] and a shared
/// [`ResponseCache`] handle. The state machine per [`Explorer::explore`] call
/// is launch → poll → {cached, failed, rejected}; transport errors propagate
/// from any state without retry.
pub struct Explorer {
    http: reqwest::Client,
    service: ServiceSettings,
    poll: PollSettings,
    identity: ColumnIdentity,
    cache: ResponseCache,
}

impl Explorer {
    pub fn new(config: &AppConfig, identity: ColumnIdentity, cache: ResponseCache) -> Result<Self> {
        let http = api::build_http_client(&config.service)?;
        Ok(Self {
            http,
            service: config.service.clone(),
            poll: config.poll,
            identity,
            cache,
        })
    }

    pub fn identity(&self) -> &ColumnIdentity {
        &self.identity
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Send the launch request for this target.
    ///
    /// A non-success HTTP status is a typed error; there is no silent
    /// degrade path for failed launches.
    pub async fn launch(&self) -> Result<LaunchResponse> {
        api::post_explore(&self.http, &self.service, &self.identity).await
    }

    /// Poll `GET /result/<id>` at the configured interval until the status
    /// is terminal, honoring the optional poll and deadline bounds.
    pub async fn wait_result(&self, id: &str) -> Result<QueryResult> {
        let target = self.identity.to_string();
        let fut = poll::poll_until_terminal(&target, &self.poll, || {
            api::get_result(&self.http, &self.service, id)
        });
        poll::with_deadline(&target, &self.poll, fut).await
    }

    /// Resolve this target to a [`Metrics`] view, launching and polling the
    /// exploration unless a cached result can be served.
    ///
    /// The cache is consulted unless `refresh_cache` is set for this call or
    /// [`ResponseCache::set_refresh_all`] is active. Only `Complete` results
    /// are written back; an exploration that ends in `Error` leaves any prior
    /// entry in place and surfaces as [`ErrorCode::QueryFailed`].
    pub async fn explore(&self, options: ExploreOptions) -> Result<Metrics> {
        if options.refresh_cache || self.cache.refresh_all() || !self.cache.contains(&self.identity)
        {
            warnings::add_warning("x-scry-cache: miss".to_string());

            let launch = self.launch().await?;
            let id = match launch.id {
                Some(id) => id,
                None => return Err(self.rejection_error(&launch)),
            };
            info!("Launched exploration {} for {}", id, self.identity);

            let result = self.wait_result(&id).await?;
            if result.status == QueryStatus::Error {
                let description = result.description.clone();
                warn!(
                    "Exploration for {} failed: {}",
                    self.identity,
                    description.as_deref().unwrap_or("no description")
                );
                return Err(ScryError::new(
                    ErrorCode::QueryFailed,
                    format!("Exploration for {} ended in Error status", self.identity),
                )
                .with_context(self.failure_context(description)));
            }

            self.cache.insert(self.identity.clone(), Arc::new(result));
        } else {
            debug!("Serving cached response for {}", self.identity);
            warnings::add_warning("x-scry-cache: hit".to_string());
        }

        let entry = self.cache.get(&self.identity).ok_or_else(|| {
            ScryError::new(
                ErrorCode::Internal,
                format!("Cache entry for {} disappeared", self.identity),
            )
        })?;
        Ok(Metrics::new(entry.metrics.clone()))
    }

    /// The cached raw payload for this target, pretty-printed, if it has
    /// been resolved into the cache.
    pub fn cached_payload(&self) -> Option<String> {
        self.cache.get(&self.identity).map(|result| {
            serde_json::to_string_pretty(result.as_ref())
                .unwrap_or_else(|_| "{}".to_string())
        })
    }

    fn rejection_error(&self, launch: &LaunchResponse) -> ScryError {
        let description = launch
            .extra
            .get("description")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .or_else(|| {
                (!launch.extra.is_empty())
                    .then(|| serde_json::Value::Object(launch.extra.clone()).to_string())
            });
        warn!(
            "Launch for {} returned no exploration id: {}",
            self.identity,
            description.as_deref().unwrap_or("empty response")
        );
        ScryError::new(
            ErrorCode::QueryRejected,
            format!("Launch for {} returned no exploration id", self.identity),
        )
        .with_context(self.failure_context(description))
        .with_hint("The service rejected the query; check dataset, table and column names")
    }

    fn failure_context(&self, description: Option<String>) -> ErrorContext {
        ErrorContext::QueryFailure {
            dataset: self.identity.dataset.clone(),
            table: self.identity.table.clone(),
            column: self.identity.column.clone(),
            description,
        }
    }
}
