//! Print the total stock quantity across all medications

use anyhow::{Context, Result};
use clap::Parser;

use crate::backend::BackendArgs;

#[derive(Parser, Debug)]
pub struct TotalArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

pub async fn run_total(args: TotalArgs) -> Result<()> {
    let inventory = args.backend.connect().await?;
    let total = inventory
        .get_total_medications()
        .await
        .context("Failed to sum medication quantities")?;

    if args.json {
        println!("{}", serde_json::json!({ "totalQuantity": total }));
    } else {
        println!("{}", total);
    }
    Ok(())
}
