//! Lazy paginated listings.
//!
//! A [`Paginated`] fetches one page at a time, only when the previous page is
//! used up, and follows the `Link: rel="next"` header until it is absent.

use serde::de::DeserializeOwned;
use serde_json::Value;

use labelsync_sync::{GatewayError, Method};

use crate::link::next_link;
use crate::transport::Transport;

type Decoder<'a, T> = Box<dyn Fn(Value, &str) -> Result<Vec<T>, GatewayError> + 'a>;

/// Single-pass iterator over every item of a paginated listing.
///
/// A failed page yields one `Err` and ends the iteration.
pub struct Paginated<'a, T> {
    transport: &'a dyn Transport,
    next: Option<String>,
    buffer: std::vec::IntoIter<T>,
    decode: Decoder<'a, T>,
}

impl<'a, T: 'a> Paginated<'a, T> {
    /// Start at `url`, decoding each page as a JSON array of `P` and mapping
    /// every element through `convert`.
    pub fn new<P, F>(transport: &'a dyn Transport, url: String, convert: F) -> Self
    where
        P: DeserializeOwned + 'a,
        F: Fn(P) -> T + 'a,
    {
        let decode = move |body: Value, url: &str| -> Result<Vec<T>, GatewayError> {
            let page: Vec<P> = serde_json::from_value(body).map_err(|e| GatewayError::Decode {
                url: url.to_owned(),
                message: e.to_string(),
            })?;
            Ok(page.into_iter().map(&convert).collect())
        };
        Self {
            transport,
            next: Some(url),
            buffer: Vec::new().into_iter(),
            decode: Box::new(decode),
        }
    }
}

impl<T> Iterator for Paginated<'_, T> {
    type Item = Result<T, GatewayError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            let url = self.next.take()?;
            let response = match self.transport.send(Method::Get, &url, None) {
                Ok(response) => response,
                Err(e) => return Some(Err(e)),
            };
            self.next = response.link.as_deref().and_then(next_link);
            match (self.decode)(response.body, &url) {
                Ok(items) => self.buffer = items.into_iter(),
                Err(e) => {
                    self.next = None;
                    return Some(Err(e));
                }
            }
        }
    }
}
