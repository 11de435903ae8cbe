use cucumber::World;
use serde_json::json;
use std::fmt;
use std::path::PathBuf;
use std::time;
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::settings::Settings;
use poetpedia::application::opts::{Command, Opts};
use poetpedia::application::{Application, Error};

/// The TestWorld contains both the context for every tests
/// and information that needs to be kept between steps of a
/// scenario.
#[derive(World, Debug, Default)]
pub struct TestWorld {
    pub app: Option<TestApp>,
    // Set in a 'when' step, checked in the following 'then' steps.
    pub status_code: Option<reqwest::StatusCode>,
    pub body: Option<String>,
}

impl TestWorld {
    pub fn app(&self) -> &TestApp {
        self.app.as_ref().expect("application is not running")
    }

    pub fn json(&self) -> serde_json::Value {
        let body = self.body.as_deref().expect("no response body");
        serde_json::from_str(body).expect("response body is not json")
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    // Stands in for PoetryDB.
    pub poetry_server: MockServer,
    pub api_client: reqwest::Client,
    // The server handle, so that it can be killed.
    pub server_handle: Option<JoinHandle<Result<(), Error>>>,
}

impl fmt::Debug for TestApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestApp")
            .field("address", &self.address)
            .field("port", &self.port)
            .finish()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            handle.abort();
        }
    }
}

pub async fn spawn_app() -> TestApp {
    let poetry_server = MockServer::start().await;

    // Same syntax as an override given on the command line.
    let override_poetry_url = format!("poetry.url='{}'", poetry_server.uri());

    let opts = Opts {
        config_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config"),
        run_mode: Some("testing".to_string()),
        settings: vec![override_poetry_url],
        cmd: Command::Run,
    };

    let settings: Settings = opts.try_into().expect("settings");

    let app = Application::builder()
        .poetry(settings.poetry.clone())
        .expect("poetry client")
        .favorites(std::sync::Arc::new(
            poetpedia::services::memory::MemoryFavoriteStorage::new(),
        ))
        .listener(settings.application.clone())
        .expect("getting listener")
        .url(settings.application.base_url.clone())
        .static_dir(settings.application.static_dir.clone())
        .expect("getting static dir")
        .build()
        .expect("application");

    let port = app.port();
    let address = format!("{}:{}", settings.application.base_url, port);
    let handle = tokio::spawn(app.run_until_stopped());

    let api_client = reqwest::Client::builder()
        .timeout(time::Duration::from_secs(5))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("api client build");

    TestApp {
        address,
        port,
        poetry_server,
        api_client,
        server_handle: Some(handle),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(self.url(path))
            .send()
            .await
            .expect("failed to send get request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("failed to send post request")
    }

    /// Makes PoetryDB answer `poems` for `GET /{field}/{value}`, where `value`
    /// is already percent encoded.
    pub async fn poetry_answers(&self, field: &str, value: &str, poems: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{field}/{value}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(poems))
            .mount(&self.poetry_server)
            .await;
    }

    pub async fn poetry_finds_nothing(&self) {
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": 404, "reason": "Not found" })),
            )
            .mount(&self.poetry_server)
            .await;
    }
}

/// A poem the way PoetryDB returns it.
pub fn poetrydb_poem(title: &str, author: &str, lines: &[&str]) -> serde_json::Value {
    json!({
        "title": title,
        "author": author,
        "lines": lines,
        "linecount": lines.len().to_string(),
    })
}
