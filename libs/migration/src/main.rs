//! Schema CLI for the marketplace database.
//!
//! `cargo run -p migration -- up` applies pending migrations against
//! `DATABASE_URL`; `down`, `status` and `fresh` behave as in sea-orm-cli.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
