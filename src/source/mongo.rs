//! MongoDB connection helpers

use crate::error::{Error, Result};
use mongodb::{options::ClientOptions, Client};
use tracing::debug;

/// Application name reported to the server
pub const APP_NAME: &str = "mongo-schemist";

/// Prefix of namespaces owned by the server itself
const SYSTEM_PREFIX: &str = "system.";

/// Connection to a MongoDB deployment
#[derive(Debug, Clone)]
pub struct MongoConnection {
    client: Client,
}

impl MongoConnection {
    /// Build a client for a connection string.
    ///
    /// The driver connects lazily, so this only validates the URI; use
    /// [`MongoConnection::test_connection`] to reach the server.
    pub async fn connect(uri: &str) -> Result<Self> {
        debug!(app = APP_NAME, "parsing connection string");
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| Error::connection(e.to_string()))?;
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options).map_err(|e| Error::connection(e.to_string()))?;
        Ok(Self { client })
    }

    /// Round-trip to the server by listing its databases
    pub async fn test_connection(&self) -> Result<()> {
        self.client
            .list_database_names()
            .await
            .map_err(|e| Error::connection(e.to_string()))?;
        debug!("connection check passed");
        Ok(())
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// User collections of a database, sorted by name
    pub async fn list_collections(&self, db: &str) -> Result<Vec<String>> {
        let names = self
            .client
            .database(db)
            .list_collection_names()
            .await
            .map_err(|e| Error::connection(e.to_string()))?;
        Ok(user_collections(names))
    }
}

fn user_collections(names: Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = names
        .into_iter()
        .filter(|name| !name.starts_with(SYSTEM_PREFIX))
        .collect();
    names.sort();
    names
}
