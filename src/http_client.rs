use crate::{boot::HeaderBag, data::ResponseRecord, error::Error, url_parts::UrlParts};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::{collections::HashMap, fmt::Debug, time::Duration};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One fully-derived request: method and body follow from the payload
/// (`GET` for null, `POST` with a JSON or raw-text body otherwise), headers
/// merge the run's header bag with the inferred content type.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub destination: UrlParts,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl RequestSpec {
    pub fn build(url: &str, payload: &Value, base_headers: &HeaderBag) -> Result<Self, Error> {
        let destination = UrlParts::parse(url)?;
        let mut headers = base_headers.headers().clone();

        let (method, body) = match payload {
            Value::Null => (Method::Get, None),
            Value::String(text) => {
                headers.insert(String::from("Content-Type"), String::from("text/plain"));
                (Method::Post, Some(text.clone()))
            }
            structured => {
                headers.insert(
                    String::from("Content-Type"),
                    String::from("application/json"),
                );
                (Method::Post, Some(serde_json::to_string(structured)?))
            }
        };

        Ok(RequestSpec {
            method,
            destination,
            headers,
            body,
        })
    }

    pub fn url(&self) -> String {
        self.destination.to_url()
    }
}

/// Seam for issuing one request. `Ok(None)` is the "no response" sentinel
/// for a timed-out request; transport failures other than timeouts are
/// `Err` and are handled at the entry boundary by the engines.
#[async_trait]
pub trait HttpClient: Debug {
    async fn execute(&self, spec: &RequestSpec) -> Result<Option<ResponseRecord>, Error>;
}

#[derive(Debug)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    fn put_headers(
        header_map: &mut HeaderMap<HeaderValue>,
        headers: &HashMap<String, String>,
    ) -> Result<(), Error> {
        for (key, value) in headers {
            let header_name = HeaderName::from_lowercase(key.to_lowercase().as_bytes())?;
            let header_value = HeaderValue::from_str(value)?;
            header_map.append(header_name, header_value);
        }

        Ok(())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, spec: &RequestSpec) -> Result<Option<ResponseRecord>, Error> {
        let url = spec.url();
        println!("{} {}", spec.method.as_str(), url);

        let method = match spec.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut header_map = HeaderMap::new();
        Self::put_headers(&mut header_map, &spec.headers)?;

        let mut request_builder = self.client.request(method, url.as_str()).headers(header_map);
        if let Some(body) = &spec.body {
            request_builder = request_builder.body(body.clone());
        }

        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let status_code = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(ResponseRecord {
            status_code,
            body: String::from_utf8_lossy(&body).into(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_payload_builds_a_get_without_body() {
        let spec = RequestSpec::build("http://h/x", &Value::Null, &HeaderBag::new()).unwrap();
        assert_eq!(spec.method, Method::Get);
        assert!(spec.body.is_none());
        assert!(!spec.headers.contains_key("Content-Type"));
    }

    #[test]
    fn structured_payload_builds_a_json_post() {
        let spec =
            RequestSpec::build("http://h/x", &json!({"a": 1}), &HeaderBag::new()).unwrap();
        assert_eq!(spec.method, Method::Post);
        assert_eq!(spec.body.as_deref(), Some("{\"a\":1}"));
        assert_eq!(
            spec.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn string_payload_posts_the_raw_text() {
        let spec =
            RequestSpec::build("http://h/x", &json!("plain text"), &HeaderBag::new()).unwrap();
        assert_eq!(spec.method, Method::Post);
        assert_eq!(spec.body.as_deref(), Some("plain text"));
        assert_eq!(
            spec.headers.get("Content-Type").map(String::as_str),
            Some("text/plain")
        );
    }

    #[test]
    fn base_headers_are_carried_into_the_spec() {
        let mut bag = HeaderBag::new();
        bag.add_header("Authorization", "Bearer token");

        let spec = RequestSpec::build("http://h/x", &Value::Null, &bag).unwrap();
        assert_eq!(
            spec.headers.get("Authorization").map(String::as_str),
            Some("Bearer token")
        );
    }

    #[test]
    fn invalid_target_url_is_rejected() {
        assert!(RequestSpec::build("http:/h/x", &Value::Null, &HeaderBag::new()).is_err());
    }
}
