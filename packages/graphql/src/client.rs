//! Blocking GraphQL transport.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{GraphqlConfig, Operation, OperationExecutor, SinkError, Variables, retry};

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

/// Posts operations to a GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: reqwest::blocking::Client,
    config: GraphqlConfig,
}

impl GraphqlClient {
    /// Builds a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Http`] if the HTTP client cannot be built.
    pub fn new(config: GraphqlConfig) -> Result<Self, SinkError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { client, config })
    }

    /// The endpoint operations are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl OperationExecutor for GraphqlClient {
    fn execute(&self, operation: Operation, variables: Variables) -> Result<Value, SinkError> {
        let payload = json!({
            "query": operation.document(),
            "operationName": operation.as_ref(),
            "variables": variables,
        });
        log::debug!("POST {} ({operation})", self.config.endpoint);

        let body = retry::send_json(
            || self.client.post(&self.config.endpoint).json(&payload),
            self.config.max_retries,
        )?;
        interpret_response(operation, body)
    }
}

/// Turns a GraphQL response body into its `data`, or an error when the
/// server reported any.
fn interpret_response(operation: Operation, body: Value) -> Result<Value, SinkError> {
    let response: GraphqlResponse = serde_json::from_value(body)?;
    if !response.errors.is_empty() {
        let message = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SinkError::Execution {
            operation: operation.to_string(),
            message,
        });
    }
    Ok(response.data.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_data_on_success() {
        let data = interpret_response(
            Operation::CreateGenre,
            json!({ "data": { "createGenre": { "name": "Crime" } } }),
        )
        .unwrap();
        assert_eq!(data["createGenre"]["name"], "Crime");
    }

    #[test]
    fn errors_become_execution_failures() {
        let err = interpret_response(
            Operation::CreatePerson,
            json!({
                "data": null,
                "errors": [{ "message": "duplicate person" }, { "message": "rolled back" }]
            }),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SinkError::Execution { operation, message }
                if operation == "createPerson" && message == "duplicate person; rolled back"
        ));
    }

    #[test]
    fn missing_data_is_null() {
        assert_eq!(
            interpret_response(Operation::CreateGenre, json!({})).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn non_object_body_is_json_error() {
        assert!(matches!(
            interpret_response(Operation::CreateGenre, json!("oops")),
            Err(SinkError::Json(_))
        ));
    }

    #[test]
    fn keeps_configured_endpoint() {
        let client = GraphqlClient::new(GraphqlConfig::new("http://graph.test/gql")).unwrap();
        assert_eq!(client.endpoint(), "http://graph.test/gql");
    }
}
