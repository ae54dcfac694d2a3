//! HTTP client for the external pricing service.
//!
//! One GET per resolution, no retry, no caching. Any transport failure or
//! non-2xx response fails the enclosing resolution; there is no degraded
//! pricing mode.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on a pricing request. `None` on the client restores
/// unbounded waiting.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the pricing service
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("pricing request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("pricing service returned {status} for plan {plan}")]
    Status {
        plan: String,
        status: reqwest::StatusCode,
    },
}

/// Price for a pricing plan. Prices are in minor currency units (cents);
/// currency is fixed to USD for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInfo {
    pub price_cents: u64,
    pub currency: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Usd => write!(f, "USD"),
        }
    }
}

impl PricingInfo {
    /// Price in display units (dollars)
    pub fn display_price(&self) -> f64 {
        self.price_cents as f64 / 100.0
    }
}

/// Wire shape of the pricing endpoint response
#[derive(Debug, Deserialize)]
struct PurchaseResponse {
    price: u64,
}

/// Pricing service client
#[derive(Debug, Clone)]
pub struct PricingClient {
    base_url: String,
    client: reqwest::Client,
}

impl PricingClient {
    /// Create a client against the given base URL.
    ///
    /// `timeout` bounds each request end to end; pass `None` for no bound.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, PricingError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    /// Build the purchase endpoint URL for a plan
    fn purchase_url(&self, plan: &str) -> String {
        format!("{}/api/purchase/{}", self.base_url, plan)
    }

    /// Fetch the price for a pricing plan.
    ///
    /// Exactly one outbound request; the result is not cached.
    pub async fn fetch(&self, plan: &str) -> Result<PricingInfo, PricingError> {
        let response = self.client.get(self.purchase_url(plan)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PricingError::Status {
                plan: plan.to_string(),
                status,
            });
        }

        let purchase: PurchaseResponse = response.json().await?;
        Ok(PricingInfo {
            price_cents: purchase.price,
            currency: Currency::Usd,
        })
    }
}
