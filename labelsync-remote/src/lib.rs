//! GitHub implementation of the labelsync [`Gateway`](labelsync_sync::Gateway).
//!
//! - [`transport`]: [`Transport`] trait and the blocking `ureq` client
//! - [`link`]: `Link` response header parsing
//! - [`pages`]: lazy listing that follows `rel="next"`
//! - [`github`]: [`GitHub`], the gateway itself

pub mod github;
pub mod link;
pub mod pages;
pub mod transport;
mod wire;

pub use github::GitHub;
pub use pages::Paginated;
pub use transport::{GitHubConfig, HttpTransport, Response, Transport, DEFAULT_API_URL};
