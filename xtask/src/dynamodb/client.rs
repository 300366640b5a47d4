//! AWS SDK client setup (Imperative Shell).

use super::error::{DynamodbError, Result};
use super::planning::{TableState, TableStatus};
use aws_sdk_dynamodb::types::{KeyType, TableStatus as SdkTableStatus};
use aws_sdk_dynamodb::Client;

/// Region used when `AWS_REGION` is unset, same as the server.
const DEFAULT_REGION: &str = "us-west-2";

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl AwsConfig {
    /// Reads `AWS_ENDPOINT_URL` and `AWS_REGION`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            endpoint_url: non_blank("AWS_ENDPOINT_URL"),
            region: non_blank("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let response = match client.describe_table().table_name(table_name).send().await {
        Ok(response) => response,
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            return Ok(None);
        }
        Err(err) => {
            return Err(DynamodbError::AwsSdk(
                aws_sdk_dynamodb::error::DisplayErrorContext(&err).to_string(),
            ))
        }
    };

    let Some(table) = response.table() else {
        return Ok(None);
    };

    let partition_key = table
        .key_schema()
        .iter()
        .find(|k| k.key_type() == &KeyType::Hash)
        .map(|k| k.attribute_name().to_string());

    let has_sort_key = table
        .key_schema()
        .iter()
        .any(|k| k.key_type() == &KeyType::Range);

    let status = match table.table_status() {
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    };

    Ok(Some(TableState {
        status,
        partition_key,
        has_sort_key,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> AwsConfig {
        AwsConfig::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.target_display(), "AWS DynamoDB (region: us-west-2)");
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config_from(&[("AWS_ENDPOINT_URL", ""), ("AWS_REGION", "  ")]);

        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.region, "us-west-2");
    }

    #[test]
    fn test_local_endpoint() {
        let config = config_from(&[("AWS_ENDPOINT_URL", "http://localhost:8000")]);

        assert_eq!(
            config.target_display(),
            "Local DynamoDB (http://localhost:8000)"
        );
    }
}
