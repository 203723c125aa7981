#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_campaign-api-rust"));
        cmd.env("CAMPAIGN_API_PORT", port.to_string())
            .env("CAMPAIGN_API_BIND", "127.0.0.1")
            .env("SECURITY_ENABLE_AUTH", "false")
            .env("DATABASE_RUN_MIGRATIONS", "true")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Integration tests need a real Postgres; without DATABASE_URL they are skipped.
pub fn database_configured() -> bool {
    let _ = dotenvy::dotenv();
    std::env::var("DATABASE_URL").map(|v| !v.is_empty()).unwrap_or(false)
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Unique ks_name so concurrent tests and reruns never see each other's rows
pub fn unique_ks_name(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

pub async fn create_campaign(server: &TestServer, name: &str, ks_name: &str) -> Result<i64> {
    let res = reqwest::Client::new()
        .post(format!("{}/api/v1/campaign", server.base_url))
        .json(&json!({ "name": name, "ks_name": ks_name }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create campaign failed: {}", res.status());
    let body: Value = res.json().await?;
    body["data"]["id"].as_i64().context("campaign id missing")
}

pub async fn create_ad_group(server: &TestServer, campaign_id: i64, name: &str, status: &str) -> Result<i64> {
    let res = reqwest::Client::new()
        .post(format!("{}/api/v1/ad_group", server.base_url))
        .json(&json!({ "campaign_id": campaign_id, "name": name, "status": status }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create ad group failed: {}", res.status());
    let body: Value = res.json().await?;
    body["data"]["id"].as_i64().context("ad group id missing")
}
