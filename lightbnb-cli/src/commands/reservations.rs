use anyhow::{Context, Result};
use clap::Parser;
use lightbnb_store::{ReservationRepo, Store, DEFAULT_LIMIT};

use super::print_json;

#[derive(Parser, Debug)]
pub struct ReservationsArgs {
    /// Guest (user) id
    pub guest_id: i64,

    /// Maximum reservations to return
    #[arg(long, short = 'n', default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

pub async fn run(store: &dyn Store, args: ReservationsArgs) -> Result<()> {
    let reservations = ReservationRepo::new(store)
        .list_for_guest(args.guest_id, args.limit)
        .await
        .with_context(|| format!("Failed to list reservations for guest {}", args.guest_id))?;

    if reservations.is_empty() {
        tracing::info!(guest_id = args.guest_id, "no reservations found");
    }
    print_json(&reservations)
}
