//! # elastic-dev-tools
//!
//! A fluent query builder and compiler for Elasticsearch-compatible search APIs.
//!
//! ## Features
//!
//! - Boolean role state (`must`, `should`, `must_not`, `filter`) with a closed set of clause kinds
//! - Nested and function-score sub-queries built by fresh sub-builders
//! - Metric and bucket aggregations registered by alias
//! - Sorting, highlighting and result windows
//! - Length-aware pagination sharing its item list with the search result
//! - A pluggable [`Connection`](connection::Connection) seam for the transport
//!
//! ## Example
//!
//! ```
//! use elastic_dev_tools::prelude::*;
//! use serde_json::json;
//!
//! # fn main() -> Result<()> {
//! let connection = StaticConnection::new(json!({
//!     "hits": {"total": {"value": 97}, "hits": [{"_id": "1", "_source": {"name": "lamp"}}]}
//! }));
//!
//! let mut search = SearchBuilder::new(&connection);
//! search.index("products")?;
//! search.filter().range("price", RangeBounds::new().gte(10).lt(100))?;
//! search.should().match_query("name", "desk lamp")?;
//! search.aggregate(|aggs| {
//!     aggs.avg("avg_price", "price")?;
//!     Ok(())
//! })?;
//!
//! let page = search.paginate(25, Some(3))?;
//! assert_eq!(page.last_page(), 4);
//! assert_eq!(connection.last_request().unwrap().body["from"], 50);
//! # Ok(())
//! # }
//! ```

pub mod aggregation;
pub mod cli;
pub mod client;
pub mod config;
pub mod connection;
pub mod document;
pub mod error;
pub mod query;
pub mod search;
pub mod util;

pub mod prelude {
    pub use crate::aggregation::{
        Aggregation, AggregationBuilder, BucketOrder, DateRangeBucket, HistogramOptions,
        IpRangeBucket, MetricSource, RangeBucket, TermsOptions,
    };
    pub use crate::client::DevTools;
    pub use crate::config::Config;
    pub use crate::connection::{Connection, StaticConnection};
    pub use crate::document::QueryDocument;
    pub use crate::error::{DevToolsError, Result};
    pub use crate::query::*;
    pub use crate::search::{
        FunctionScoreBuilder, Hit, PageResolver, PageWindow, Paginator, SearchBuilder,
        SearchRequest, SearchResult, SharedHits, SharedItems,
    };
    pub use crate::util::IntoFields;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
