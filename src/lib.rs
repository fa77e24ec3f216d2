pub mod artifact_store;
pub mod boot;
pub mod config;
pub mod data;
pub mod diff;
pub mod error;
pub mod http_client;
pub mod replay;
pub mod road_map;
pub mod snapshot;
pub mod url_parts;

pub use artifact_store::ArtifactStore;
pub use boot::{boot, BootHook, HeaderBag};
pub use config::RunConfig;
pub use data::{ResponseRecord, RunResult};
pub use error::Error;
pub use http_client::{HttpClient, ReqwestHttpClient, RequestSpec};
pub use replay::run_replay;
pub use road_map::{RoadMap, TestSelection};
pub use snapshot::run_snapshot;
pub use url_parts::UrlParts;
