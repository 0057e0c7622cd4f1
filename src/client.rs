//! Entry point tying a connection, configuration and page resolution together.

use std::rc::Rc;

use crate::config::Config;
use crate::connection::Connection;
use crate::error::Result;
use crate::search::builder::{PageResolver, SearchBuilder};

/// Hands out search builders wired to one connection.
///
/// # Examples
///
/// ```
/// use elastic_dev_tools::client::DevTools;
/// use elastic_dev_tools::config::Config;
/// use elastic_dev_tools::connection::StaticConnection;
/// use serde_json::json;
///
/// let config = Config {
///     default_index: Some("products".to_string()),
///     ..Config::default()
/// };
/// let tools = DevTools::new(StaticConnection::new(json!({})), config);
///
/// let search = tools.search();
/// assert_eq!(search.index_name(), Some("products"));
/// ```
pub struct DevTools<C: Connection> {
    connection: C,
    config: Config,
    page_resolver: Option<PageResolver>,
}

impl<C: Connection> DevTools<C> {
    /// Create a facade over `connection`.
    pub fn new(connection: C, config: Config) -> Self {
        DevTools {
            connection,
            config,
            page_resolver: None,
        }
    }

    /// Create a facade configured from the environment.
    pub fn from_env(connection: C) -> Result<Self> {
        Ok(DevTools::new(connection, Config::from_env()?))
    }

    /// Resolve the current page with `resolver` when paginating without one.
    pub fn with_page_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn() -> Option<u64> + 'static,
    {
        self.page_resolver = Some(Rc::new(resolver));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// A new search builder targeting the configured default index.
    pub fn search(&self) -> SearchBuilder<'_> {
        let mut builder = SearchBuilder::new(&self.connection);
        if let Some(resolver) = &self.page_resolver {
            builder = builder.with_page_resolver(Rc::clone(resolver));
        }
        if let Some(index) = &self.config.default_index {
            builder.set_index(index.clone());
        }
        builder
    }
}
