// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The order backend seam.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::request_response::{OrderRequest, OrderResponse};

/// Path of the order creation endpoint, relative to the backend base URL.
pub const ORDER_PATH: &str = "/api/v1/auth/payment";

/// Creates payment orders for a checkout.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Submits a checkout and returns the backend's raw answer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Backend` if the request cannot be completed.
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse, ApiError>;
}

/// Error body the backend sends with non-2xx answers.
#[derive(Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
}

/// `OrderBackend` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpOrderBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOrderBackend {
    /// Creates a backend client for the given base URL.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// The full order creation URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{ORDER_PATH}", self.base_url)
    }
}

#[async_trait]
impl OrderBackend for HttpOrderBackend {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse, ApiError> {
        let url: String = self.endpoint();
        debug!(%url, amount = request.amount, "Creating payment order");

        let response: reqwest::Response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Backend {
                message: e.to_string(),
            })?;

        let status: reqwest::StatusCode = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            let message: String = serde_json::from_str::<BackendErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("order backend answered {status}"));
            warn!(%status, %message, "Order backend rejected checkout");
            return Err(ApiError::Backend { message });
        }

        response
            .json::<OrderResponse>()
            .await
            .map_err(|e| ApiError::Backend {
                message: format!("Invalid response from payment server: {e}"),
            })
    }
}
