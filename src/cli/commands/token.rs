use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;

pub fn handle(subject: &str, hours: Option<u64>, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    let hours = hours.unwrap_or(security.jwt_expiry_hours);

    let token = generate_jwt(&Claims::new(subject, hours)?, security)?;

    match output_format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => output_success(
            &output_format,
            "Token issued",
            Some(json!({ "token": token, "subject": subject, "expires_in_hours": hours })),
        )?,
    }
    Ok(())
}
