//! HTTP client wrapper - executes authenticated requests and returns raw bodies

use reqwest::{Method, Url};

use crate::config::Config;
use crate::constants::API_KEY_HEADER;
use crate::error::{Error, Result};

/// A single query string entry; duplicates are kept as separate entries
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        QueryParam {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Optional parts of an outgoing request
#[derive(Clone, Debug, Default)]
pub struct RequestData {
    pub body: Option<Vec<u8>>,
    pub query_params: Vec<QueryParam>,
}

impl RequestData {
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push(QueryParam::new(key, value));
        self
    }
}

/// Issues one request and hands back the response body, whatever the status
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, url: &str, method: Method, data: RequestData) -> Result<Vec<u8>>;
}

/// Append query params to a URL without touching what is already there
pub fn append_query(url: &mut Url, params: &[QueryParam]) {
    if params.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    for param in params {
        pairs.append_pair(&param.key, &param.value);
    }
}

/// Pretty-print a JSON body into the trace log
fn dump_json_body(body: &[u8]) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(json) => {
            let pretty = serde_json::to_string_pretty(&json).unwrap_or_default();
            tracing::trace!("dump json: {}", pretty);
        }
        Err(e) => tracing::trace!("JSON parse error: {}", e),
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Transport backed by `reqwest`, injecting the API key header on every call
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    api_key: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        ApiClient {
            client: create_client(),
            api_key: config.api_key.clone(),
        }
    }
}

impl Transport for ApiClient {
    async fn send(&self, url: &str, method: Method, data: RequestData) -> Result<Vec<u8>> {
        let transport_error = |source| Error::Transport {
            url: url.to_string(),
            source,
        };

        let mut req_builder = self
            .client
            .request(method.clone(), url)
            .header(API_KEY_HEADER, &self.api_key);

        if let Some(body) = data.body {
            req_builder = req_builder.body(body);
        }

        let mut request = req_builder.build().map_err(transport_error)?;
        append_query(request.url_mut(), &data.query_params);
        let target = request.url().to_string();

        tracing::debug!(method = %method, url = %target, "Sending request");
        let resp = self.client.execute(request).await.map_err(transport_error)?;

        // Status is logged only; an error body is decoded (and rejected) downstream
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(transport_error)?;
        tracing::debug!(url = %target, status, bytes = body.len(), "Response received");

        dump_json_body(&body);
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn parse(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_append_query_keeps_existing_pairs() {
        let mut url = parse("https://api.example.com/collections?sort=name");
        append_query(&mut url, &[QueryParam::new("workspace", "w1")]);
        assert_eq!(url.as_str(), "https://api.example.com/collections?sort=name&workspace=w1");
    }

    #[test]
    fn test_append_query_keeps_duplicates() {
        let mut url = parse("https://api.example.com/x?tag=a");
        append_query(
            &mut url,
            &[QueryParam::new("tag", "b"), QueryParam::new("tag", "c")],
        );
        let tags: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "tag")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_append_query_empty_is_noop() {
        let mut url = parse("https://api.example.com/workspaces");
        append_query(&mut url, &[]);
        assert_eq!(url.as_str(), "https://api.example.com/workspaces");
    }

    #[test]
    fn test_append_query_encodes_values() {
        let mut url = parse("https://api.example.com/x");
        append_query(&mut url, &[QueryParam::new("name", "Pay Client&co")]);
        assert_eq!(url.query(), Some("name=Pay+Client%26co"));
    }

    #[tokio::test]
    async fn test_send_injects_api_key_and_query() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections"))
            .and(header("X-API-Key", "secret"))
            .and(query_param("workspace", "w1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"collections":[]}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&Config::new("secret"));
        let url = format!("{}/collections", mock_server.uri());
        let body = client
            .send(&url, Method::GET, RequestData::default().with_query("workspace", "w1"))
            .await
            .unwrap();

        assert_eq!(body, br#"{"collections":[]}"#.to_vec());
    }

    #[tokio::test]
    async fn test_send_returns_error_status_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workspaces"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"error":{"name":"AuthenticationError","message":"Invalid API Key"}}"#),
            )
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&Config::default());
        let url = format!("{}/workspaces", mock_server.uri());
        let body = client.send(&url, Method::GET, RequestData::default()).await.unwrap();

        assert!(String::from_utf8(body).unwrap().contains("AuthenticationError"));
    }

    #[tokio::test]
    async fn test_send_sends_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(wiremock::matchers::body_string("payload"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(&Config::new("k"));
        let url = format!("{}/echo", mock_server.uri());
        let data = RequestData {
            body: Some(b"payload".to_vec()),
            ..Default::default()
        };
        let body = client.send(&url, Method::POST, data).await.unwrap();
        assert_eq!(body, b"ok".to_vec());
    }

    #[tokio::test]
    async fn test_send_invalid_url_is_transport_error() {
        let client = ApiClient::new(&Config::new("k"));
        let err = client
            .send("not a url", Method::GET, RequestData::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
