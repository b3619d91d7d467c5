mod auth_error;
mod authenticator;
mod config;
mod report;
mod requests;
mod scrape_error;
mod scraping_context;
mod table_scraper;
mod text_manipulators;

pub use auth_error::AuthError;
pub use authenticator::{Authenticator, extract_login_token, login_rejection};
pub use config::{Credentials, LoadFromEnv, PmaConfig, PmaEnv};
pub use report::render_table;
pub use requests::Session;
pub use scrape_error::ScrapeError;
pub use scraping_context::ScrapingContext;
pub use table_scraper::{
    RowExtractor, TableRow, TableScraper, parse_results_table, table_url, trailing_id_name,
};
