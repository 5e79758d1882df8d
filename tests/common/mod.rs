#![allow(dead_code)]

use chirpy::configuration::{
    ApplicationSettings, DatabaseSettings, JwtSettings, PolkaSettings, Settings,
};
use chirpy::database::Database;
use chirpy::startup::run;
use serde_json::{json, Value};
use std::net::TcpListener;
use tempfile::TempDir;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    _data_dir: TempDir,
}

pub fn spawn_app() -> TestApp {
    spawn_app_on_platform("dev")
}

pub fn spawn_app_on_platform(platform: &str) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = data_dir.path().join("database.json");
    let database = Database::initialize(&db_path).expect("Failed to initialize database");

    let settings = Settings {
        application: ApplicationSettings {
            host: "127.0.0.1".to_string(),
            port,
            platform: platform.to_string(),
        },
        database: DatabaseSettings {
            path: db_path.to_string_lossy().into_owned(),
        },
        jwt: JwtSettings {
            secret: JWT_SECRET.to_string(),
            access_token_expiry: 3600,
        },
        polka: PolkaSettings {
            api_key: POLKA_KEY.to_string(),
        },
    };

    let server = run(listener, database, settings).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        client: reqwest::Client::new(),
        _data_dir: data_dir,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn create_user(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/users"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Register and log in, returning the login response body
    pub async fn signed_in_user(&self, email: &str, password: &str) -> Value {
        assert_eq!(201, self.create_user(email, password).await.status().as_u16());
        let response = self.login(email, password).await;
        assert_eq!(200, response.status().as_u16());
        response.json().await.expect("Failed to parse response")
    }

    pub async fn post_chirp(&self, token: &str, body: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/chirps"))
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
