//! `storefrontctl`: run structured searches against JSON record files.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Serialize, de::DeserializeOwned};
use storefront_config::{ConfigLoad, ConfigLoader, SearchConfig};
use storefront_core::contracts::{EntitySchema, Searchable};
use storefront_core::model::prelude::*;
use storefront_core::{
    InMemorySource, InvalidQuery, QueryError, QueryEvaluator, QueryValidator, SearchQuery,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status for a rejected query, distinct from operational failures.
const EXIT_INVALID_QUERY: u8 = 2;

#[derive(Parser)]
#[command(name = "storefrontctl", about = "Storefront structured search runner")]
struct Cli {
    /// Search configuration file (TOML or JSON); overrides environment lookup
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Env file to load instead of searching for .env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and evaluate a query against a JSON array of records
    Search {
        #[arg(long, value_enum)]
        entity: EntityArg,
        /// JSON file holding an array of records
        #[arg(long)]
        records: PathBuf,
        /// JSON file holding the query
        #[arg(long, conflicts_with = "query_json")]
        query: Option<PathBuf>,
        /// Inline JSON query
        #[arg(long)]
        query_json: Option<String>,
        /// Pretty-print the result envelope
        #[arg(long)]
        pretty: bool,
    },
    /// Print the searchable fields of an entity
    Schema {
        #[arg(long, value_enum)]
        entity: EntityArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EntityArg {
    User,
    Customer,
    Product,
    Sale,
    SaleProduct,
}

impl EntityArg {
    fn schema(self) -> &'static EntitySchema {
        match self {
            EntityArg::User => PublicUser::schema(),
            EntityArg::Customer => Customer::schema(),
            EntityArg::Product => Product::schema(),
            EntityArg::Sale => Sale::schema(),
            EntityArg::SaleProduct => SaleProduct::schema(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let load = load_config(&cli)?;
    init_tracing(&load.config);
    for warning in &load.warnings.items {
        match &warning.hint {
            Some(hint) => warn!("{} (hint: {})", warning.message, hint),
            None => warn!("{}", warning.message),
        }
    }
    debug!("Configuration source: {:?}", load.metadata.source);

    match cli.command {
        Command::Search {
            entity,
            records,
            query,
            query_json,
            pretty,
        } => {
            let raw = match (query, query_json) {
                (Some(path), _) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read query from {}", path.display()))?,
                (None, Some(inline)) => inline,
                (None, None) => "{}".to_string(),
            };
            let validator = QueryValidator::new(load.config.limits);
            let search = SearchRun {
                validator: &validator,
                records: &records,
                raw_query: &raw,
                pretty,
            };
            match entity {
                EntityArg::User => search.run::<PublicUser>().await,
                EntityArg::Customer => search.run::<Customer>().await,
                EntityArg::Product => search.run::<Product>().await,
                EntityArg::Sale => search.run::<Sale>().await,
                EntityArg::SaleProduct => search.run::<SaleProduct>().await,
            }
        }
        Command::Schema { entity } => {
            print!("{}", render_schema(entity.schema()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(cli: &Cli) -> Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(env_file) = &cli.env_file {
        loader = loader.with_env_file(env_file);
    }
    let load = match &cli.config {
        Some(path) => loader.load_file(path),
        None => loader.load(),
    };
    load.context("failed to load search configuration")
}

fn init_tracing(config: &SearchConfig) {
    // Logs go to stderr so stdout stays parseable JSON.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))
                .unwrap_or_else(|_| "info".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

struct SearchRun<'a> {
    validator: &'a QueryValidator,
    records: &'a Path,
    raw_query: &'a str,
    pretty: bool,
}

impl SearchRun<'_> {
    async fn run<T>(&self) -> Result<ExitCode>
    where
        T: Searchable + Clone + Serialize + DeserializeOwned + 'static,
    {
        let query = match SearchQuery::from_json(self.raw_query) {
            Ok(query) => query,
            Err(invalid) => return Ok(report_invalid(&invalid)),
        };

        let contents = fs::read_to_string(self.records).with_context(|| {
            format!("failed to read records from {}", self.records.display())
        })?;
        let records: Vec<T> = serde_json::from_str(&contents).with_context(|| {
            format!(
                "{} is not a JSON array of {} records",
                self.records.display(),
                T::schema().entity
            )
        })?;
        info!(
            "Loaded {} {} record(s) from {}",
            records.len(),
            T::schema().entity,
            self.records.display()
        );

        let source = InMemorySource::from_records(records)
            .with_context(|| format!("cannot search {}", self.records.display()))?;
        let envelope = match QueryEvaluator::search::<T, _>(self.validator, &query, &source).await
        {
            Ok(envelope) => envelope,
            Err(QueryError::InvalidQuery(invalid)) => return Ok(report_invalid(&invalid)),
            Err(err) => return Err(err.into()),
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&envelope)
        } else {
            serde_json::to_string(&envelope)
        }
        .context("failed to serialize result envelope")?;
        println!("{rendered}");
        Ok(ExitCode::SUCCESS)
    }
}

fn report_invalid(invalid: &InvalidQuery) -> ExitCode {
    eprintln!("invalid query:");
    for violation in &invalid.violations {
        eprintln!("  {violation}");
    }
    ExitCode::from(EXIT_INVALID_QUERY)
}

fn render_schema(schema: &EntitySchema) -> String {
    let width = schema
        .fields
        .iter()
        .map(|field| field.name.len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{} (identity: {})\n", schema.entity, schema.identity);
    for field in schema.fields {
        let mut flags = Vec::new();
        if field.optional {
            flags.push("optional");
        }
        if schema.text_fields.contains(&field.name) {
            flags.push("text");
        }
        let line = format!("  {:<width$}  {}", field.name, field.kind, width = width);
        if flags.is_empty() {
            out.push_str(&line);
        } else {
            out.push_str(&format!("{line}  [{}]", flags.join(", ")));
        }
        out.push('\n');
    }
    out.push_str(&format!("text fields: {}\n", schema.text_fields.join(", ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_flags() {
        let rendered = render_schema(Customer::schema());
        assert!(rendered.starts_with("customer (identity: id)\n"));
        assert!(rendered.contains("[optional, text]"));
        assert!(rendered.ends_with("text fields: name, address, phone\n"));
    }
}
