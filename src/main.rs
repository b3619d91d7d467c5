use log::LevelFilter;
use pma_scraper::{PmaConfig, ScrapingContext, render_table};

#[tokio::main]
async fn main() {
    // Loads .env as well, so RUST_LOG from there reaches the logger below.
    let config = match PmaConfig::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let ctx = match ScrapingContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    match ctx.run().await {
        Ok(rows) => print!("{}", render_table(&ctx.config.table, &rows)),
        Err(e) => {
            eprintln!("\nAn unrecoverable error occurred: {e}");
            std::process::exit(1);
        }
    }
}
