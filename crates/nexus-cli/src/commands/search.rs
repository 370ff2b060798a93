//! Search command implementation.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;

use nexusmind_core::{SearchFilters, SortBy};

use crate::context::CliContext;
use crate::output;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortOrder {
    Relevance,
    Date,
    Name,
}

impl From<SortOrder> for SortBy {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Relevance => SortBy::Relevance,
            SortOrder::Date => SortBy::Date,
            SortOrder::Name => SortBy::Name,
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// The natural-language query
    pub query: String,

    /// Restrict to these file extensions (repeatable)
    #[arg(long = "file-type")]
    pub file_types: Vec<String>,

    /// Sort order for results
    #[arg(long, value_enum, default_value_t = SortOrder::Relevance)]
    pub sort: SortOrder,

    /// Print raw results as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &CliContext, args: SearchArgs) -> Result<()> {
    let username = ctx.require_login().await?;

    let filters = SearchFilters {
        file_types: args.file_types.clone(),
        date_range: None,
        sort_by: args.sort.into(),
    };

    let results = ctx
        .client
        .search(&username, &args.query, Some(&filters))
        .await
        .context("Search failed")?;

    if args.json {
        return output::json_pretty(&results.items);
    }

    for hit in &results.items {
        println!(
            "{}  {}",
            hit.title.bold(),
            format!(
                "({}, {}, score {:.2})",
                hit.file_type,
                output::human_size(hit.file_size),
                hit.relevance_score
            )
            .dimmed()
        );
        println!("  {}", hit.excerpt);
    }

    println!();
    match results.search_time_ms {
        Some(ms) => println!("{} matches in {}ms", results.total, ms),
        None => println!("{} matches", results.total),
    }

    Ok(())
}
