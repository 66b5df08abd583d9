use async_trait::async_trait;
use hashdash_types::DashboardError;
use serde_json::Value;

/// Executes named remote calls with positional wire values.
///
/// Implementations own credentials and connection details; callers only see
/// the decoded JSON body or a [`DashboardError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, api_method: &str, args: &[String]) -> Result<Value, DashboardError>;

    /// Whether `api_method` exists and binds its positional arguments to
    /// exactly `variables`, in that order.
    fn supports(&self, api_method: &str, variables: &[&str]) -> bool;
}
