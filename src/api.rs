use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::month::ReportingMonth;
use crate::schemas::{Lease, Payment, Property, Snapshot, Tenant, Unit};

/// Read-only client for the property-management REST API.
///
/// The API owns all entity state; this client only fetches per-month
/// snapshots for reconciliation. Retry and cancellation stay with callers.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|err| AppError::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    /// Fetch the five collections for one reporting month, concurrently.
    /// Any failed request fails the whole snapshot; no partial state leaks.
    pub async fn fetch_snapshot(&self, month: ReportingMonth) -> Result<Snapshot, AppError> {
        let month_query = [("month", month.to_string())];
        let (properties, units, tenants, leases, payments) = tokio::try_join!(
            self.list::<Property>("properties", &[]),
            self.list::<Unit>("units", &[]),
            self.list::<Tenant>("tenants", &[]),
            self.list::<Lease>("leases", &[]),
            self.list::<Payment>("payments", &month_query),
        )?;

        Ok(Snapshot {
            month,
            properties,
            units,
            tenants,
            leases,
            payments,
        })
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let url = format!("{}/{resource}", self.base_url);

        let mut request = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", "happyrentals-ledger/0.1");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|source| AppError::Http {
            url: url.clone(),
            source,
        })?;
        let ok_response = response
            .error_for_status()
            .map_err(|source| AppError::Http {
                url: url.clone(),
                source,
            })?;
        let payload = ok_response
            .json::<Value>()
            .await
            .map_err(|source| AppError::Http {
                url: url.clone(),
                source,
            })?;

        let rows = unwrap_list(&payload);
        tracing::debug!(resource, rows = rows.len(), "fetched collection");

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let item =
                serde_json::from_value(row).map_err(|err| AppError::UnexpectedPayload {
                    url: url.clone(),
                    reason: err.to_string(),
                })?;
            items.push(item);
        }
        Ok(items)
    }
}

/// Normalize a list response to its rows. Endpoints return either a bare
/// array or an envelope with the payload under `data`, `value`, `items`, or
/// `results`; a `data` envelope may itself wrap one of the others. Anything
/// else yields an empty list.
pub fn unwrap_list(payload: &Value) -> Vec<Value> {
    let inner = payload.get("data").unwrap_or(payload);
    if let Some(rows) = inner.as_array() {
        return rows.clone();
    }
    for key in ["value", "items", "results"] {
        if let Some(rows) = inner.get(key).and_then(Value::as_array) {
            return rows.clone();
        }
    }
    Vec::new()
}
