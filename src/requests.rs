use reqwest::{
    Client, ClientBuilder, IntoUrl, Response,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT},
};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Cookie jar plus default headers, shared by every request of a run.
///
/// Each response updates the jar, so whatever cookies the login sets are
/// carried into the later table request.
pub struct Session {
    client: Client,
}

impl Session {
    pub fn new() -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );

        let client = ClientBuilder::new()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_url_response<U: IntoUrl>(&self, url: U) -> reqwest::Result<Response> {
        self.client.get(url).send().await?.error_for_status()
    }

    pub async fn fetch_url_body<U: IntoUrl>(&self, url: U) -> reqwest::Result<String> {
        let response = self.fetch_url_response(url).await?;
        response.text().await
    }

    /// POSTs `fields` form-encoded, following redirects, and returns the
    /// final body.
    pub async fn post_form<U: IntoUrl>(
        &self,
        url: U,
        fields: &[(&str, &str)],
    ) -> reqwest::Result<String> {
        let response = self
            .client
            .post(url)
            .form(fields)
            .send()
            .await?
            .error_for_status()?;
        response.text().await
    }
}
