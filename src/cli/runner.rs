//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::output::render_schema;
use crate::source::{DocumentSource, JsonFileSource, MongoConnection, MongoSource};
use std::path::PathBuf;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Analyze {
                collections,
                max_depth,
                input,
            } => {
                let config = self.load_config(collections, *max_depth, input.clone())?;
                self.analyze(&config).await
            }
            Commands::Collections => {
                let config = self.load_config(&[], None, None)?;
                self.collections(&config).await
            }
            Commands::Check => {
                let config = self.load_config(&[], None, None)?;
                self.check(&config).await
            }
        }
    }

    /// Merge command line values over the configuration file
    fn load_config(
        &self,
        collections: &[String],
        max_depth: Option<usize>,
        input: Option<PathBuf>,
    ) -> Result<AnalyzerConfig> {
        let from_cli = AnalyzerConfig {
            uri: self.cli.uri.clone(),
            database: self.cli.db.clone(),
            collections: collections.to_vec(),
            max_depth,
            format: self.cli.format,
            input,
        };

        let config = match &self.cli.config {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration file");
                from_cli.merge(AnalyzerConfig::from_file(path)?)
            }
            None => from_cli,
        };
        config.validate()?;
        Ok(config)
    }

    /// Pick the document source for a configuration
    async fn open_source(config: &AnalyzerConfig) -> Result<Box<dyn DocumentSource>> {
        if let Some(input) = &config.input {
            info!(input = %input.display(), "reading documents from file");
            return Ok(Box::new(JsonFileSource::open(input)?));
        }
        let uri = config
            .uri
            .as_deref()
            .ok_or_else(|| Error::missing_field("uri"))?;
        Ok(Box::new(MongoSource::connect(uri).await?))
    }

    /// Analyze the requested collections and print one report each
    async fn analyze(&self, config: &AnalyzerConfig) -> Result<()> {
        let source = Self::open_source(config).await?;
        let db = config.database_name();

        let collections = if config.collections.is_empty() {
            source.collection_names(db).await?
        } else {
            config.collections.clone()
        };
        if collections.is_empty() {
            info!(db, "no collections to analyze");
            return Ok(());
        }

        for collection in &collections {
            let schema = source.analyze(db, collection, config.max_depth()).await?;
            print!("{}", render_schema(&schema, config.format())?);
        }
        Ok(())
    }

    /// Print the collections a source offers
    async fn collections(&self, config: &AnalyzerConfig) -> Result<()> {
        let source = Self::open_source(config).await?;
        for name in source.collection_names(config.database_name()).await? {
            println!("{name}");
        }
        Ok(())
    }

    /// Check that MongoDB answers
    async fn check(&self, config: &AnalyzerConfig) -> Result<()> {
        let uri = config
            .uri
            .as_deref()
            .ok_or_else(|| Error::missing_field("uri"))?;
        let connection = MongoConnection::connect(uri).await?;
        connection.test_connection().await?;
        println!("Connection OK");
        Ok(())
    }
}
