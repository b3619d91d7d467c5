use log::{debug, warn};
use scraper::{Html, Selector};
use url::Url;

use crate::{
    auth_error::AuthError,
    config::Credentials,
    requests::Session,
    text_manipulators::{extract_text, input_value},
};

const TOKEN_FIELD: &str = "token";
// Only the login form renders this field; seeing it after the POST means
// the server sent us back to the login page.
const PASSWORD_FIELD_MARKER: &str = "pma_password";
const GENERIC_REJECTION: &str = "Incorrect username/password.";

#[derive(Debug)]
pub struct Authenticator {
    pub login_url: Url,
}

impl Authenticator {
    pub fn new(login_url: Url) -> Self {
        Self { login_url }
    }

    /// Logs `session` in. On success the session's cookie jar holds whatever
    /// the server set, and later requests are authenticated.
    pub async fn authenticate(
        &self,
        session: &Session,
        credentials: &Credentials,
    ) -> Result<(), AuthError> {
        println!("[1] Getting login token...");
        let login_page = session.fetch_url_body(self.login_url.clone()).await?;
        let token = extract_login_token(&login_page).ok_or(AuthError::TokenNotFound)?;
        println!("[2] Login token extracted.");

        let form = [
            ("pma_username", credentials.username.as_str()),
            ("pma_password", credentials.password.as_str()),
            ("server", "1"),
            ("target", "index.php"),
            ("token", token.as_str()),
        ];

        println!("[3] Submitting login form...");
        debug!("posting login form to {}", self.login_url);
        let body = session.post_form(self.login_url.clone(), &form).await?;

        if let Some(message) = login_rejection(&body) {
            warn!("login rejected by {}", self.login_url);
            return Err(AuthError::Rejected(message));
        }

        println!("[4] Login successful!");
        Ok(())
    }
}

/// The one-time token from the login form, if present and non-empty.
pub fn extract_login_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    input_value(&document, TOKEN_FIELD).filter(|token| !token.is_empty())
}

/// `Some(message)` when `html` is still the login page, i.e. the login was
/// refused. The message comes from the page's error box when it has one.
pub fn login_rejection(html: &str) -> Option<String> {
    if !html.contains(PASSWORD_FIELD_MARKER) {
        return None;
    }

    let document = Html::parse_document(html);
    let error_selector = Selector::parse("div.error").unwrap();
    let message = document
        .select(&error_selector)
        .next()
        .map(extract_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| GENERIC_REJECTION.to_string());
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_value_exactly() {
        let html = r#"<form><input type="hidden" name="token" value="T"></form>"#;
        assert_eq!(extract_login_token(html).as_deref(), Some("T"));
    }

    #[test]
    fn missing_token_input_yields_none() {
        let html = r#"<form><input name="pma_username"></form>"#;
        assert_eq!(extract_login_token(html), None);
    }

    #[test]
    fn empty_token_value_yields_none() {
        let html = r#"<input name="token" value="">"#;
        assert_eq!(extract_login_token(html), None);
    }

    #[test]
    fn login_page_with_error_box_is_rejected_with_its_text() {
        let html = r#"
            <div class="error">  Cannot log in to the MySQL server </div>
            <input type="password" name="pma_password">
        "#;
        assert_eq!(
            login_rejection(html).as_deref(),
            Some("Cannot log in to the MySQL server")
        );
    }

    #[test]
    fn error_box_text_spread_over_lines_is_collapsed() {
        let html = r#"
            <div class="alert alert-danger error" role="alert">
              <img src="themes/dot.gif" class="icon ic_s_error">
              mysqli::real_connect():
                (HY000/1045): <strong>Access denied</strong>
            </div>
            <input type="password" name="pma_password">
        "#;
        assert_eq!(
            login_rejection(html).as_deref(),
            Some("mysqli::real_connect(): (HY000/1045): Access denied")
        );
    }

    #[test]
    fn login_page_without_error_box_falls_back_to_generic_message() {
        let html = r#"<input type="password" name="pma_password">"#;
        assert_eq!(
            login_rejection(html).as_deref(),
            Some("Incorrect username/password.")
        );
    }

    #[test]
    fn page_without_password_field_is_accepted() {
        let html = r#"<div class="error">stale</div><a href="index.php?route=/">Home</a>"#;
        assert_eq!(login_rejection(html), None);
    }
}
