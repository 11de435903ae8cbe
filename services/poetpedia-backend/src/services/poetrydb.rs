use async_trait::async_trait;
use common::err_context::ErrorContextExt;
use common::settings::PoetrySettings;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::Value;

use crate::domain::ports::secondary::{PoetryError as Error, PoetryService};
use crate::domain::Poem;

/// Client of the PoetryDB API (https://poetrydb.org).
#[derive(Debug, Clone)]
pub struct PoetryDbClient {
    http_client: Client,
    // Base URL of the API, without trailing slash.
    url: String,
}

impl PoetryDbClient {
    pub fn new(settings: PoetrySettings) -> Result<PoetryDbClient, Error> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout))
            .build()
            .map_err(|err| Error::Configuration {
                context: format!("Could not build PoetryDB http client: {err}"),
            })?;
        Ok(PoetryDbClient {
            http_client,
            url: settings.url.trim_end_matches('/').to_string(),
        })
    }

    #[tracing::instrument(name = "Querying PoetryDB", skip(self))]
    async fn fetch(&self, field: &str, value: &str) -> Result<Vec<Poem>, Error> {
        let url = format!(
            "{}/{}/{}",
            self.url,
            field,
            utf8_percent_encode(value, NON_ALPHANUMERIC)
        );

        let body = self
            .http_client
            .get(&url)
            .send()
            .await
            .context(format!("http client request to {url}"))?
            .error_for_status()
            .context(format!("http client response from {url}"))?
            .text()
            .await
            .context(format!("http client response body from {url}"))?;

        let poems = parse_poems(&body)?;
        tracing::debug!(count = poems.len(), "poems received");
        Ok(poems)
    }
}

#[async_trait]
impl PoetryService for PoetryDbClient {
    async fn poems_by_title(&self, title: &str) -> Result<Vec<Poem>, Error> {
        self.fetch("title", title).await
    }

    async fn poems_by_author(&self, author: &str) -> Result<Vec<Poem>, Error> {
        self.fetch("author", author).await
    }

    async fn poems_by_lines(&self, lines: &str) -> Result<Vec<Poem>, Error> {
        self.fetch("lines", lines).await
    }
}

/// PoetryDB answers a list of poems, or an object `{"status":404,"reason":...}`
/// when nothing matches.
fn parse_poems(body: &str) -> Result<Vec<Poem>, Error> {
    let value: Value = serde_json::from_str(body).context("PoetryDB answer is not JSON")?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .map(serde_json::from_value)
            .collect::<Result<Vec<Poem>, _>>()
            .context("PoetryDB answer is not a list of poems")
            .map_err(Error::from),
        Value::Object(object) if object.get("status").and_then(Value::as_u64) == Some(404) => {
            Ok(Vec::new())
        }
        other => Err(Error::Unexpected {
            context: format!("Unexpected PoetryDB answer: {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(url: String) -> PoetrySettings {
        PoetrySettings { url, timeout: 10 }
    }

    fn fog() -> Value {
        serde_json::json!([{
            "title": "Fog",
            "author": "Carl Sandburg",
            "lines": ["The fog comes", "on little cat feet."],
            "linecount": "2"
        }])
    }

    #[tokio::test]
    async fn poems_by_title_should_request_the_title_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/title/Fog"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fog()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = PoetryDbClient::new(settings(mock_server.uri())).expect("client");

        let poems = client.poems_by_title("Fog").await.expect("poems");

        assert_that(&poems).has_length(1);
        assert_eq!(poems[0].author, "Carl Sandburg");
        assert_eq!(poems[0].lines.len(), 2);
    }

    #[tokio::test]
    async fn path_segments_should_be_percent_encoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/author/Carl%20Sandburg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fog()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = PoetryDbClient::new(settings(format!("{}/", mock_server.uri()))).expect("client");

        let poems = client.poems_by_author("Carl Sandburg").await;

        assert_that(&poems).is_ok().has_length(1);
    }

    #[tokio::test]
    async fn not_found_object_should_give_no_poems() {
        let mock_server = MockServer::start().await;

        Mock::given(path("/lines/nothing%20rhymes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": 404, "reason": "Not found"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = PoetryDbClient::new(settings(mock_server.uri())).expect("client");

        let poems = client.poems_by_lines("nothing rhymes").await;

        assert_that(&poems).is_ok().is_empty();
    }

    #[tokio::test]
    async fn server_error_should_fail_with_status() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = PoetryDbClient::new(settings(mock_server.uri())).expect("client");

        let outcome = client.poems_by_title("Fog").await;

        assert!(matches!(outcome, Err(Error::Status { .. })));
    }

    #[tokio::test]
    async fn html_answer_should_fail_with_decoding() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&mock_server)
            .await;

        let client = PoetryDbClient::new(settings(mock_server.uri())).expect("client");

        let outcome = client.poems_by_author("Carl Sandburg").await;

        assert!(matches!(outcome, Err(ref err) if err.is_undecodable()));
    }

    #[tokio::test]
    async fn slow_answer_should_time_out() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(fog())
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = PoetryDbClient::new(PoetrySettings {
            url: mock_server.uri(),
            timeout: 1,
        })
        .expect("client");

        let outcome = client.poems_by_title("Fog").await;

        assert!(matches!(outcome, Err(Error::Connection { .. })));
    }

    #[test]
    fn parse_poems_should_skip_non_objects() {
        let poems = parse_poems(r#"[{"title":"Fog"}, "noise", 3]"#).expect("poems");
        assert_eq!(poems.len(), 1);
    }

    #[test]
    fn parse_poems_should_reject_other_objects() {
        let outcome = parse_poems(r#"{"status":500}"#);
        assert!(matches!(outcome, Err(Error::Unexpected { .. })));
    }
}
