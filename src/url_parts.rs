use crate::error::Error;
use std::collections::VecDeque;

/// A target URL decomposed into the parts needed to address a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl UrlParts {
    /// Splits a URL on `/`. A leading `proto:` segment must be followed by
    /// an empty segment (the `//` separator); without one the protocol
    /// defaults to `http`. The next segment is `host[:port]`, the rest is
    /// the path (trailing slashes trimmed). Protocols without a well-known
    /// default port require an explicit one.
    pub fn parse(url: &str) -> Result<Self, Error> {
        let mut segments: VecDeque<&str> = url.split('/').collect();

        let mut segment = segments.pop_front().ok_or(Error::MalformedUrl)?;
        let protocol = match segment.strip_suffix(':') {
            Some(protocol) => {
                if segments.pop_front() != Some("") {
                    return Err(Error::MalformedUrl);
                }
                segment = segments.pop_front().ok_or(Error::MalformedUrl)?;
                String::from(protocol)
            }
            None => String::from("http"),
        };

        let mut domain_parts = segment.split(':');
        let host = String::from(domain_parts.next().unwrap_or(""));
        let port = match domain_parts.next() {
            Some(port) => {
                if domain_parts.next().is_some() {
                    return Err(Error::InvalidPort);
                }
                port.parse::<u16>().map_err(|_| Error::InvalidPort)?
            }
            None => match protocol.as_str() {
                "http" => 80,
                "https" => 443,
                other => return Err(Error::UnsupportedProtocol(String::from(other))),
            },
        };

        let joined = segments.into_iter().collect::<Vec<_>>().join("/");
        let path = format!("/{}", joined.trim_end_matches('/'));

        Ok(UrlParts {
            protocol,
            host,
            port,
            path,
        })
    }

    /// Reassembles the parts into an absolute URL with an explicit port.
    pub fn to_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol, self.host, self.port, self.path
        )
    }
}
