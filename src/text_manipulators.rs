use scraper::ElementRef;

/// All text beneath `node`, each fragment trimmed and blank ones dropped,
/// joined by single spaces.
pub fn extract_text(node: ElementRef) -> String {
    node.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Value of the first `<input name="...">` matching `name`, if any.
pub fn input_value(document: &scraper::Html, name: &str) -> Option<String> {
    let selector = scraper::Selector::parse(&format!("input[name=\"{name}\"]")).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
}
