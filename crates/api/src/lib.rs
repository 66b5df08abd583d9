//! Hashrate Index API client.
//!
//! This crate provides the [`Transport`] seam used by the engine and its
//! production implementation, [`HashrateIndexClient`]. The client focuses on:
//!
//! - Constructing an HTTP client with the credential header and a timeout
//! - Validating `HASHRATE_INDEX_API_BASE` for safety
//! - Turning an api method plus positional wire values into a GraphQL POST
//! - Mapping HTTP, GraphQL and decoding failures onto
//!   [`DashboardError::Transport`]
//!
//! # Example
//!
//! ```ignore
//! use hashdash_api::{ClientOptions, HashrateIndexClient, Transport};
//!
//! async fn overview() -> anyhow::Result<()> {
//!     let client = HashrateIndexClient::new(ClientOptions::from_env(None, None))?;
//!     let body = client.execute("get_bitcoin_overview", &[]).await?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```

pub mod queries;
mod transport;

use std::{env, fmt, time::Duration};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use hashdash_types::{DashboardError, TransportErrorKind};
use hashdash_util::{
    http::{is_auth_failure, parse_response_json_strict, status_error_message},
    redact_sensitive, truncate_to_width,
};
use reqwest::{Client, header};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};
use url::Url;

pub use queries::{QUERIES, QueryDocument, query_for};
pub use transport::Transport;

/// Public GraphQL endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.hashrateindex.com/graphql";
/// Environment variable overriding the endpoint.
pub const API_BASE_ENV: &str = "HASHRATE_INDEX_API_BASE";
/// Environment variable holding the credential when none is entered.
pub const API_KEY_ENV: &str = "HASHRATE_INDEX_API_KEY";
/// Header carrying the credential on every request.
pub const API_KEY_HEADER: &str = "x-hi-api-key";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosts the client may talk to over HTTPS, subdomains included.
const ALLOWED_API_DOMAINS: &[&str] = &["hashrateindex.com", "luxor.tech"];

/// Settings for [`HashrateIndexClient::new`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_key: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl ClientOptions {
    /// Resolves options from explicit values and the environment.
    ///
    /// The key comes from `api_key` when non-empty, else `HASHRATE_INDEX_API_KEY`.
    /// The endpoint comes from `HASHRATE_INDEX_API_BASE`, else `configured_base`,
    /// else [`DEFAULT_API_BASE`].
    pub fn from_env(api_key: Option<&str>, configured_base: Option<&str>) -> Self {
        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()))
            .unwrap_or_default();
        let api_base = env::var(API_BASE_ENV)
            .ok()
            .filter(|base| !base.trim().is_empty())
            .or_else(|| configured_base.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            api_key,
            api_base,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// GraphQL client for the Hashrate Index API.
///
/// The credential is fixed at construction and sent as the
/// `x-hi-api-key` header on every request.
#[derive(Debug, Clone)]
pub struct HashrateIndexClient {
    endpoint: Url,
    http: Client,
    user_agent: String,
    api_key: String,
}

impl HashrateIndexClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let endpoint = validate_base_url(&options.api_base)?;
        if options.api_key.is_empty() {
            warn!("no API key provided; requests will likely be rejected");
        }

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        let mut key_value =
            header::HeaderValue::from_str(&options.api_key).context("API key contains characters that are not allowed in a header")?;
        key_value.set_sensitive(true);
        default_headers.insert(API_KEY_HEADER, key_value);

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(options.timeout)
            .build()
            .context("build http client")?;

        Ok(Self {
            endpoint,
            http,
            user_agent: format!("hashdash/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
            api_key: options.api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds the request for one call without sending it. Header values
    /// that carry credentials are redacted.
    pub fn dry_run(&self, api_method: &str, args: &[String]) -> Result<DryRun, DashboardError> {
        let body = build_request_body(api_method, args)?;
        let headers = [
            "Content-Type: application/json".to_string(),
            "Accept: application/json".to_string(),
            format!("User-Agent: {}", self.user_agent),
            format!("{API_KEY_HEADER}: {}", self.api_key),
        ]
        .iter()
        .map(|line| redact_sensitive(line))
        .collect();
        Ok(DryRun {
            method: "POST".to_string(),
            url: self.endpoint.to_string(),
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for HashrateIndexClient {
    async fn execute(&self, api_method: &str, args: &[String]) -> Result<Value, DashboardError> {
        let body = build_request_body(api_method, args)?;
        debug!(api_method, endpoint = %self.endpoint, "sending GraphQL request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(header::USER_AGENT, &self.user_agent)
            .json(&body)
            .send()
            .await
            .map_err(|error| {
                DashboardError::transport_with_source(
                    TransportErrorKind::Network,
                    format!("POST {} failed. Hint: check connection/proxy", self.endpoint),
                    error,
                )
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|error| {
            DashboardError::transport_with_source(TransportErrorKind::Network, "failed to read response body", error)
        })?;
        debug!(api_method, status = status.as_u16(), bytes = text.len(), "received response");

        if is_auth_failure(status) {
            let message = status_error_message(status.as_u16()).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(DashboardError::transport(TransportErrorKind::Authentication, message));
        }
        if !status.is_success() {
            let message = status_error_message(status.as_u16())
                .unwrap_or_else(|| format!("HTTP {}: {}", status.as_u16(), truncate_to_width(&redact_sensitive(text.trim()), 200)));
            return Err(DashboardError::transport(TransportErrorKind::Remote, message));
        }

        let value = parse_response_json_strict(&text, Some(status))
            .map_err(|error| DashboardError::transport_with_source(TransportErrorKind::MalformedJson, error.to_string(), error))?;

        if let Some(messages) = graphql_error_messages(&value) {
            return Err(DashboardError::transport(
                TransportErrorKind::Remote,
                format!("GraphQL error: {messages}"),
            ));
        }
        Ok(value)
    }

    fn supports(&self, api_method: &str, variables: &[&str]) -> bool {
        query_for(api_method).is_some_and(|query| query.variables == variables)
    }
}

/// Request that [`HashrateIndexClient::dry_run`] would send.
#[derive(Debug, Clone, Serialize)]
pub struct DryRun {
    pub method: String,
    pub url: String,
    pub headers: Vec<String>,
    pub body: Value,
}

impl fmt::Display for DryRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.method, self.url)?;
        for header in &self.headers {
            writeln!(f, "{header}")?;
        }
        writeln!(f)?;
        let body = serde_json::to_string_pretty(&self.body).map_err(|_| fmt::Error)?;
        write!(f, "{body}")
    }
}

/// Zips positional arguments onto the query's variable names.
fn build_request_body(api_method: &str, args: &[String]) -> Result<Value, DashboardError> {
    let query = query_for(api_method).ok_or_else(|| {
        DashboardError::transport(TransportErrorKind::Request, format!("unknown api method '{api_method}'"))
    })?;
    if query.variables.len() != args.len() {
        return Err(DashboardError::transport(
            TransportErrorKind::Request,
            format!(
                "{api_method} takes {} argument(s), got {}",
                query.variables.len(),
                args.len()
            ),
        ));
    }
    let variables: Map<String, Value> = query
        .variables
        .iter()
        .zip(args)
        .map(|(name, value)| (name.to_string(), Value::String(value.clone())))
        .collect();
    Ok(json!({
        "query": query.document,
        "variables": variables,
        "operationName": query.operation_name,
    }))
}

fn graphql_error_messages(value: &Value) -> Option<String> {
    let errors = value.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }
    let messages: Vec<&str> = errors
        .iter()
        .map(|error| error.get("message").and_then(Value::as_str).unwrap_or("unknown error"))
        .collect();
    Some(messages.join("; "))
}

/// Checks an endpoint before any request carries the API key to it.
///
/// Local development hosts may use any scheme. Every other endpoint must be
/// HTTPS on a Hashrate Index or Luxor domain.
pub fn validate_base_url(base: &str) -> Result<Url> {
    let endpoint = Url::parse(base).with_context(|| format!("{API_BASE_ENV} is not a valid URL: '{base}'"))?;
    let host = endpoint
        .host_str()
        .ok_or_else(|| anyhow!("{API_BASE_ENV} has no host: '{base}'"))?
        .to_ascii_lowercase();
    let scheme = endpoint.scheme().to_string();

    match (host.as_str(), scheme.as_str()) {
        ("localhost" | "127.0.0.1", _) => Ok(endpoint),
        (_, scheme) if scheme != "https" => Err(anyhow!("{API_BASE_ENV} must use https, got '{scheme}' for {host}")),
        (host, _) if is_allowed_domain(host) => Ok(endpoint),
        (host, _) => Err(anyhow!(
            "{API_BASE_ENV} host '{host}' is outside {}",
            ALLOWED_API_DOMAINS.join(", ")
        )),
    }
}

fn is_allowed_domain(host: &str) -> bool {
    ALLOWED_API_DOMAINS.iter().any(|domain| {
        host.strip_suffix(*domain)
            .is_some_and(|prefix| prefix.is_empty() || prefix.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(base: &str) -> ClientOptions {
        ClientOptions {
            api_key: "secret-key-1234".into(),
            api_base: base.into(),
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn base_url_rules() {
        assert!(validate_base_url(DEFAULT_API_BASE).is_ok());
        assert!(validate_base_url("https://staging.luxor.tech/graphql").is_ok());
        assert!(validate_base_url("http://localhost:4000/graphql").is_ok());
        assert!(validate_base_url("http://api.hashrateindex.com/graphql").is_err());
        assert!(validate_base_url("https://evilhashrateindex.com/graphql").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn base_url_hosts_compare_case_insensitively() {
        assert!(validate_base_url("https://API.HashrateIndex.com/graphql").is_ok());
        assert!(validate_base_url("HTTP://LOCALHOST:4000/graphql").is_ok());
        assert!(validate_base_url("https://hashrateindex.com.evil.io/graphql").is_err());
        assert!(is_allowed_domain("luxor.tech"));
        assert!(!is_allowed_domain("notluxor.tech"));
    }

    #[test]
    fn request_body_binds_variables_in_order() {
        let body = build_request_body("get_hashprice", &["_7_DAYS".into(), "USD".into()]).unwrap();
        assert_eq!(body["operationName"], "getHashprice");
        assert_eq!(body["variables"], json!({"inputInterval": "_7_DAYS", "currency": "USD"}));
        let keys: Vec<_> = body["variables"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["inputInterval", "currency"]);
    }

    #[test]
    fn wrong_arity_and_unknown_methods_are_request_errors() {
        let wrong = build_request_body("get_network_hashrate", &[]).unwrap_err();
        assert!(matches!(
            wrong,
            DashboardError::Transport {
                kind: TransportErrorKind::Request,
                ..
            }
        ));
        let unknown = build_request_body("get_mempool", &[]).unwrap_err();
        assert!(unknown.to_string().contains("get_mempool"));
    }

    #[test]
    fn graphql_errors_are_collected() {
        let value = json!({"errors": [{"message": "bad interval"}, {"message": "try again"}]});
        assert_eq!(graphql_error_messages(&value).as_deref(), Some("bad interval; try again"));
        assert_eq!(graphql_error_messages(&json!({"data": {}, "errors": []})), None);
    }

    #[test]
    fn dry_run_redacts_the_credential() {
        let client = HashrateIndexClient::new(options(DEFAULT_API_BASE)).unwrap();
        let dry_run = client.dry_run("get_network_hashrate", &["_7_DAYS".into()]).unwrap();
        let rendered = dry_run.to_string();
        assert!(rendered.starts_with("POST https://api.hashrateindex.com/graphql"));
        assert!(rendered.contains("x-hi-api-key: [REDACTED]"));
        assert!(!rendered.contains("secret-key-1234"));
        assert_eq!(dry_run.body["variables"]["inputInterval"], "_7_DAYS");
    }

    #[test]
    fn supports_checks_method_and_variable_order() {
        let client = HashrateIndexClient::new(options(DEFAULT_API_BASE)).unwrap();
        assert!(client.supports("get_bitcoin_overview", &[]));
        assert!(client.supports("get_hashprice", &["inputInterval", "currency"]));
        assert!(!client.supports("get_hashprice", &["currency", "inputInterval"]));
        assert!(!client.supports("get_hashprice", &["inputInterval"]));
        assert!(!client.supports("get_mempool", &[]));
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        temp_env::with_vars(
            [(API_KEY_ENV, Some("from-env")), (API_BASE_ENV, None::<&str>)],
            || {
                let explicit = ClientOptions::from_env(Some("typed"), None);
                assert_eq!(explicit.api_key, "typed");
                assert_eq!(explicit.api_base, DEFAULT_API_BASE);
                let fallback = ClientOptions::from_env(Some("  "), Some("http://localhost:4000/graphql"));
                assert_eq!(fallback.api_key, "from-env");
                assert_eq!(fallback.api_base, "http://localhost:4000/graphql");
            },
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        let client = HashrateIndexClient::new(options("http://127.0.0.1:9/graphql")).unwrap();
        let error = client.execute("get_bitcoin_overview", &[]).await.unwrap_err();
        assert!(matches!(
            error,
            DashboardError::Transport {
                kind: TransportErrorKind::Network,
                source: Some(_),
                ..
            }
        ));
    }
}
