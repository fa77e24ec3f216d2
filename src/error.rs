use std::{fmt::Display, io, path::PathBuf};

#[derive(Debug)]
pub enum Error {
    MalformedUrl,
    InvalidPort,
    UnsupportedProtocol(String),
    RoadMapUnreadable(PathBuf),
    RoadMapMalformed(PathBuf),
    ConfigMalformed(PathBuf),
    InvalidTestCases(String),
    ArtifactMissing(PathBuf),
    ArtifactCorrupt(PathBuf),
    InvalidHeaderName,
    InvalidHeaderValue,
    IoError(io::Error),
    JsonError(serde_json::Error),
    HttpError(reqwest::Error),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedUrl => write!(f, "Invalid url given!"),
            Error::InvalidPort => write!(f, "Invalid port given in url!"),
            Error::UnsupportedProtocol(protocol) => {
                write!(f, "No default port found for protocol {}", protocol)
            }
            Error::RoadMapUnreadable(path) => {
                write!(f, "failed to open roadmap file: {}", path.display())
            }
            Error::RoadMapMalformed(path) => {
                write!(f, "failed to parse roadmap JSON file: {}", path.display())
            }
            Error::ConfigMalformed(path) => {
                write!(f, "failed to parse config file: {}", path.display())
            }
            Error::InvalidTestCases(raw) => write!(f, "invalid test case list: {}", raw),
            Error::ArtifactMissing(path) => {
                write!(f, "no souvenir stored at {}", path.display())
            }
            Error::ArtifactCorrupt(path) => {
                write!(f, "could not parse souvenir file {}", path.display())
            }
            Error::InvalidHeaderName => write!(f, "Invalid header name"),
            Error::InvalidHeaderValue => write!(f, "Invalid header value"),
            Error::IoError(e) => write!(f, "IoError: {}", e),
            Error::JsonError(e) => write!(f, "json error: {}", e),
            Error::HttpError(e) => write!(f, "http error: {}", e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::JsonError(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::HttpError(e)
    }
}

impl From<reqwest::header::InvalidHeaderName> for Error {
    fn from(_: reqwest::header::InvalidHeaderName) -> Self {
        Error::InvalidHeaderName
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(_: reqwest::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeaderValue
    }
}
