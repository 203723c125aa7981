use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::cli::{utils::output_collection, OutputFormat};
use crate::config;
use crate::database::{DatabaseManager, PgJoinStore};
use crate::fetch::{FetchEngine, FetchRequest, QueryFilter};

#[derive(Subcommand)]
pub enum FetchCommands {
    #[command(about = "Campaigns with their ad groups")]
    Campaigns(FetchArgs),

    #[command(about = "Ad groups with their campaign")]
    AdGroups(FetchArgs),
}

#[derive(Args)]
pub struct FetchArgs {
    #[arg(long, help = "Comma separated fields, e.g. name,adGroup.status")]
    pub fields: Option<String>,

    #[arg(long, help = "Filters as a JSON array of {field, operator, values}")]
    pub filters: Option<String>,

    #[arg(long, default_value_t = FetchRequest::DEFAULT_LIMIT)]
    pub limit: i64,
}

impl FetchArgs {
    fn into_request(self) -> anyhow::Result<FetchRequest> {
        let filters = match self.filters.as_deref() {
            Some(json) => QueryFilter::parse_list(json)?,
            None => vec![],
        };
        Ok(FetchRequest::new(FetchRequest::split_fields(self.fields.as_deref()), filters, self.limit)?)
    }
}

pub async fn handle(cmd: FetchCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect().await?;
    let engine = FetchEngine::new(Arc::new(PgJoinStore::new(pool.clone())), config::config().fetch.clone());

    let result = match cmd {
        FetchCommands::Campaigns(args) => {
            let results = engine.fetch_campaigns(&args.into_request()?).await?;
            output_collection(&output_format, &results)
        }
        FetchCommands::AdGroups(args) => {
            let ad_groups = engine.fetch_ad_groups(&args.into_request()?).await?;
            output_collection(&output_format, &ad_groups)
        }
    };

    DatabaseManager::close(&pool).await;
    result
}
