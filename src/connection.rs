//! The transport seam: anything that can run a search request.

use std::cell::RefCell;

use serde_json::Value;

use crate::error::Result;
use crate::search::SearchRequest;

/// Executes search requests against an engine.
///
/// Implementations own the transport concerns (hosts, retries, timeouts).
/// Errors are propagated to the caller unchanged.
pub trait Connection {
    /// Run a search and return the raw engine response.
    fn search(&self, request: &SearchRequest) -> Result<Value>;
}

impl<F> Connection for F
where
    F: Fn(&SearchRequest) -> Result<Value>,
{
    fn search(&self, request: &SearchRequest) -> Result<Value> {
        self(request)
    }
}

/// A connection replaying one canned response and recording every request.
#[derive(Debug, Default)]
pub struct StaticConnection {
    response: Value,
    requests: RefCell<Vec<SearchRequest>>,
}

impl StaticConnection {
    /// Create a connection answering every search with `response`.
    pub fn new(response: Value) -> Self {
        StaticConnection {
            response,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Connection for StaticConnection {
    fn search(&self, request: &SearchRequest) -> Result<Value> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DevToolsError;
    use serde_json::json;

    #[test]
    fn test_static_connection_records_requests() -> Result<()> {
        let connection = StaticConnection::new(json!({"hits": {"total": 0, "hits": []}}));
        let request = SearchRequest::new(json!({"size": 1})).with_index("products");

        let response = connection.search(&request)?;

        assert_eq!(response["hits"]["total"], 0);
        assert_eq!(connection.request_count(), 1);
        assert_eq!(connection.last_request(), Some(request));
        Ok(())
    }

    #[test]
    fn test_closure_connection() {
        let failing = |_: &SearchRequest| -> Result<Value> {
            Err(DevToolsError::connection("no living nodes"))
        };

        let err = failing.search(&SearchRequest::new(json!({}))).unwrap_err();
        assert!(matches!(err, DevToolsError::Connection(_)));
    }
}
