use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lightbnb_store::{NewProperty, PropertyFilter, PropertyRepo, Store, DEFAULT_LIMIT};

use super::print_json;

#[derive(Parser, Debug)]
pub struct PropertiesArgs {
    /// Partial, case-insensitive city match
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties owned by this user id
    #[arg(long)]
    pub owner_id: Option<i64>,

    /// Minimum nightly price in dollars
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum nightly price in dollars
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum average review rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum properties to return
    #[arg(long, short = 'n', default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

impl PropertiesArgs {
    fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
        }
    }
}

#[derive(Parser, Debug)]
pub struct AddPropertyArgs {
    /// JSON file with the property fields (reads stdin if omitted or "-")
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

pub async fn run_list(store: &dyn Store, args: PropertiesArgs) -> Result<()> {
    let listings = PropertyRepo::new(store)
        .list(&args.filter(), args.limit)
        .await
        .context("Failed to list properties")?;

    if listings.is_empty() {
        tracing::info!("no properties matched");
    }
    print_json(&listings)
}

pub async fn run_add(store: &dyn Store, args: AddPropertyArgs) -> Result<()> {
    let raw = read_input(args.input.as_ref())?;
    let property: NewProperty =
        serde_json::from_str(&raw).context("Failed to parse property JSON")?;

    let created = PropertyRepo::new(store)
        .create(&property)
        .await
        .context("Failed to create property")?;
    print_json(&created)
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
