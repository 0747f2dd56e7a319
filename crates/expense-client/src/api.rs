//! Transport for the client state manager

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use expense_config::Config;
use expense_core::{ErrorBody, Expense};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Calls the client needs from the expense service
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Expense>>;

    async fn create(&self, payload: Value) -> ClientResult<Expense>;

    async fn update(&self, id: &str, payload: Value) -> ClientResult<Expense>;

    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// API client for communicating with the expense service over HTTP
#[derive(Clone)]
pub struct HttpExpenseApi {
    client: reqwest::Client,
    api_base: String,
}

impl HttpExpenseApi {
    /// `api_base` is the service URL including the API prefix,
    /// e.g. `http://localhost:5000/api/v1`
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(format!(
            "{}{}",
            config.client.base_url.trim_end_matches('/'),
            config.server.base_path
        ))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn expenses_url(&self) -> String {
        format!("{}/expenses", self.api_base)
    }

    fn expense_url(&self, id: &str) -> String {
        format!("{}/expenses/{}", self.api_base, id)
    }
}

/// Turn a non-success response into a `ClientError::Server`
async fn server_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let message = response.json::<ErrorBody>().await.ok().map(|body| body.message);
    ClientError::Server { status, message }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    if !response.status().is_success() {
        return Err(server_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode { message: e.to_string() })
}

#[async_trait]
impl ExpenseApi for HttpExpenseApi {
    async fn list(&self) -> ClientResult<Vec<Expense>> {
        let response = self.client.get(self.expenses_url()).send().await?;
        decode(response).await
    }

    async fn create(&self, payload: Value) -> ClientResult<Expense> {
        let response = self
            .client
            .post(self.expenses_url())
            .json(&payload)
            .send()
            .await?;
        decode(response).await
    }

    async fn update(&self, id: &str, payload: Value) -> ClientResult<Expense> {
        let response = self
            .client
            .put(self.expense_url(id))
            .json(&payload)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let response = self.client.delete(self.expense_url(id)).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(server_error(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let api = HttpExpenseApi::new("http://localhost:5000/api/v1/");
        assert_eq!(api.api_base(), "http://localhost:5000/api/v1");
        assert_eq!(api.expenses_url(), "http://localhost:5000/api/v1/expenses");
        assert_eq!(api.expense_url("7"), "http://localhost:5000/api/v1/expenses/7");
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.client.base_url = "http://expenses.internal:8080/".to_string();
        let api = HttpExpenseApi::from_config(&config);
        assert_eq!(api.api_base(), "http://expenses.internal:8080/api/v1");
    }
}
