use crate::{
    authenticator::Authenticator,
    config::PmaConfig,
    requests::Session,
    table_scraper::{TableRow, TableScraper},
};

/// Everything one run needs, built from config before any request is made.
pub struct ScrapingContext {
    pub config: PmaConfig,
    pub session: Session,
    pub authenticator: Authenticator,
    pub table_scraper: TableScraper,
}

impl ScrapingContext {
    pub fn new(config: PmaConfig) -> anyhow::Result<Self> {
        let session = Session::new()?;
        let authenticator = Authenticator::new(config.login_url.clone());
        let table_scraper =
            TableScraper::new(config.login_url.clone(), config.debug_page_path.clone());
        Ok(ScrapingContext {
            config,
            session,
            authenticator,
            table_scraper,
        })
    }

    /// Logs in, then scrapes the configured table. Login failures are
    /// returned; scrape failures have already been logged and show up as an
    /// empty result.
    pub async fn run(&self) -> anyhow::Result<Vec<TableRow>> {
        self.authenticator
            .authenticate(&self.session, &self.config.credentials)
            .await?;
        let rows = self
            .table_scraper
            .fetch_table(&self.session, &self.config.database, &self.config.table)
            .await;
        Ok(rows)
    }
}
