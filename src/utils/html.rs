// src/utils/html.rs

/// Clean HTML content using the ammonia library.
///
/// Question text is rendered by the admin and test-taking pages, so safe
/// tags (like <b>, <p>) are kept while <script>, <iframe> and event-handler
/// attributes are stripped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
