mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn campaign_lifecycle_ends_in_soft_delete() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let ks_name = common::unique_ks_name("crud");

    let id = common::create_campaign(server, "spring-sale", &ks_name).await?;

    let res = client
        .put(format!("{}/api/v1/campaign/{}", server.base_url, id))
        .json(&json!({ "name": "summer-sale", "ks_name": ks_name, "status": "PAUSED" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["name"], "summer-sale");
    assert_eq!(body["data"]["status"], "PAUSED");

    let res = client.delete(format!("{}/api/v1/campaign/{}", server.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    // the row is still there, marked deleted
    let res = client.get(format!("{}/api/v1/campaign/{}", server.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["status"], "DELETED");

    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/api/v1/ad_group/{}", server.base_url, i64::MAX)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn ad_group_requires_existing_campaign() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .post(format!("{}/api/v1/ad_group", server.base_url))
        .json(&json!({ "campaign_id": i64::MAX, "name": "orphan" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["campaign_id"].is_string(), "body: {}", body);

    Ok(())
}

#[tokio::test]
async fn by_ks_name_skips_deleted_rows() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let ks_name = common::unique_ks_name("ks");

    let campaign_id = common::create_campaign(server, "c", &ks_name).await?;
    let live = common::create_ad_group(server, campaign_id, "live", "ACTIVE").await?;
    let gone = common::create_ad_group(server, campaign_id, "gone", "ACTIVE").await?;
    client.delete(format!("{}/api/v1/ad_group/{}", server.base_url, gone)).send().await?;

    let res = client
        .get(format!("{}/api/v1/ad_group/by_ks_name/{}", server.base_url, ks_name))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let data = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], live);
    assert_eq!(data[0]["campaign"]["id"], campaign_id);

    Ok(())
}
