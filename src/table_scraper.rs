use std::path::PathBuf;

use log::{error, info};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{requests::Session, scrape_error::ScrapeError, text_manipulators::extract_text};

const RESULTS_TABLE_SELECTOR: &str = "table.table_results";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub name: String,
}

/// Turns the trimmed text of one data row's `<td>` cells into a record.
/// Returning `None` drops the row.
pub type RowExtractor = fn(&[String]) -> Option<TableRow>;

/// Reads the last two cells as `(id, name)`, whatever checkbox or action
/// columns come before them. Rows with fewer than three cells, or with an
/// empty id or name, are dropped.
pub fn trailing_id_name(cells: &[String]) -> Option<TableRow> {
    let [.., id, name] = cells else {
        return None;
    };
    if cells.len() < 3 || id.is_empty() || name.is_empty() {
        return None;
    }
    Some(TableRow {
        id: id.clone(),
        name: name.clone(),
    })
}

#[derive(Debug)]
pub struct TableScraper {
    pub base_url: Url,
    pub debug_page_path: PathBuf,
    pub extractor: RowExtractor,
}

impl TableScraper {
    pub fn new(base_url: Url, debug_page_path: PathBuf) -> Self {
        Self {
            base_url,
            debug_page_path,
            extractor: trailing_id_name,
        }
    }

    pub fn with_extractor(mut self, extractor: RowExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// First page of `database`.`table`, in document order.
    ///
    /// Never fails: anything that goes wrong is logged and yields no rows.
    pub async fn fetch_table(
        &self,
        session: &Session,
        database: &str,
        table: &str,
    ) -> Vec<TableRow> {
        match self.try_fetch_table(session, database, table).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Failed to fetch or parse data: {e}");
                vec![]
            }
        }
    }

    async fn try_fetch_table(
        &self,
        session: &Session,
        database: &str,
        table: &str,
    ) -> Result<Vec<TableRow>, ScrapeError> {
        let url = table_url(&self.base_url, database, table)?;
        println!("\n[5] Fetching data from: {url}");

        let html = session.fetch_url_body(url).await?;
        match parse_results_table(&html, self.extractor) {
            Some(rows) => {
                info!("found {} rows in {database}.{table}", rows.len());
                Ok(rows)
            }
            None => {
                let path = self.debug_page_path.clone();
                if let Err(source) = tokio::fs::write(&path, &html).await {
                    return Err(ScrapeError::DebugPage { path, source });
                }
                Err(ScrapeError::ResultsTableNotFound { path })
            }
        }
    }
}

/// `<base>/index.php?route=/sql&db=..&table=..&pos=0`, relative to `base`
/// the way a browser resolves a link on the login page.
pub fn table_url(base: &Url, database: &str, table: &str) -> Result<Url, url::ParseError> {
    let mut url = base.join("index.php")?;
    url.query_pairs_mut()
        .append_pair("route", "/sql")
        .append_pair("db", database)
        .append_pair("table", table)
        .append_pair("pos", "0");
    Ok(url)
}

/// Rows of the results table, or `None` when the page has no results table.
pub fn parse_results_table(html: &str, extractor: RowExtractor) -> Option<Vec<TableRow>> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse(RESULTS_TABLE_SELECTOR).unwrap();
    let row_selector = Selector::parse("tr").unwrap();

    let results_table = document.select(&table_selector).next()?;
    let rows = results_table
        .select(&row_selector)
        .filter(|row| !is_header_row(*row))
        .filter_map(|row| extractor(&data_cells(row)))
        .collect();
    Some(rows)
}

fn is_header_row(row: ElementRef) -> bool {
    let header_selector = Selector::parse("th").unwrap();
    row.select(&header_selector).next().is_some()
}

fn data_cells(row: ElementRef) -> Vec<String> {
    let cell_selector = Selector::parse("td").unwrap();
    row.select(&cell_selector).map(extract_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn row(id: &str, name: &str) -> TableRow {
        TableRow {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    const RESULTS_PAGE: &str = r#"
        <html><body>
        <table class="table table-striped table_results data">
          <thead>
            <tr><th></th><th>id</th><th>name</th></tr>
          </thead>
          <tbody>
            <tr><td><input type="checkbox"></td><td> 1 </td><td>Alice</td></tr>
            <tr><td><input type="checkbox"></td><td>2</td><td>Bob</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn takes_last_two_cells_after_leading_columns() {
        assert_eq!(
            trailing_id_name(&cells(&["", "Edit", "Delete", "7", "Carol"])),
            Some(row("7", "Carol"))
        );
    }

    #[test]
    fn rows_with_fewer_than_three_cells_are_dropped() {
        assert_eq!(trailing_id_name(&cells(&["1", "Alice"])), None);
        assert_eq!(trailing_id_name(&cells(&["Alice"])), None);
        assert_eq!(trailing_id_name(&[]), None);
    }

    #[test]
    fn rows_with_empty_id_or_name_are_dropped() {
        assert_eq!(trailing_id_name(&cells(&["", "", ""])), None);
        assert_eq!(trailing_id_name(&cells(&["", "3", ""])), None);
        assert_eq!(trailing_id_name(&cells(&["", "", "Dave"])), None);
    }

    #[test]
    fn parses_data_rows_in_document_order_and_skips_header() {
        assert_eq!(
            parse_results_table(RESULTS_PAGE, trailing_id_name),
            Some(vec![row("1", "Alice"), row("2", "Bob")])
        );
    }

    #[test]
    fn whitespace_only_cells_are_dropped() {
        let html = r#"
            <table class="table_results">
              <tr><td>x</td><td>   </td><td>
              </td></tr>
              <tr><td>x</td><td>3</td><td>Eve</td></tr>
              <tr><td>x</td><td>3</td><td>Eve</td></tr>
            </table>
        "#;
        assert_eq!(
            parse_results_table(html, trailing_id_name),
            Some(vec![row("3", "Eve"), row("3", "Eve")])
        );
    }

    #[test]
    fn page_without_results_table_yields_none() {
        let html = r#"<table class="other"><tr><td>a</td><td>1</td><td>b</td></tr></table>"#;
        assert_eq!(parse_results_table(html, trailing_id_name), None);
    }

    #[test]
    fn extractor_can_be_swapped() {
        fn leading_id_name(cells: &[String]) -> Option<TableRow> {
            match cells {
                [_, id, name, ..] => Some(row(id, name)),
                _ => None,
            }
        }
        let html = r#"
            <table class="table_results">
              <tr><td>chk</td><td>9</td><td>Zed</td><td>extra</td></tr>
            </table>
        "#;
        assert_eq!(
            parse_results_table(html, leading_id_name),
            Some(vec![row("9", "Zed")])
        );
    }

    #[test]
    fn table_url_resolves_against_login_directory() {
        let base = Url::parse("http://db.example.com/phpmyadmin/").unwrap();
        let url = table_url(&base, "testDB", "users").unwrap();
        assert_eq!(url.path(), "/phpmyadmin/index.php");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("route".to_string(), "/sql".to_string()),
                ("db".to_string(), "testDB".to_string()),
                ("table".to_string(), "users".to_string()),
                ("pos".to_string(), "0".to_string()),
            ]
        );
    }
}
