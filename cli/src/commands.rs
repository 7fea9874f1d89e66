use anyhow::{Context, Result};
use colored::Colorize;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use validator_shared::{ApiInfo, HealthStatus, ValidationFailure, ValidationSuccess};

pub async fn info(api_url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let url = format!("{}/", api_url);

    let response = client
        .get(&url)
        .send()
        .await
        .context("Failed to fetch service info")?;

    if !response.status().is_success() {
        anyhow::bail!("Info request failed with status {}", response.status());
    }

    let info: ApiInfo = response.json().await.context("Invalid info response")?;

    println!("\n{}", "Service Information:".bold().cyan());
    println!("{}", "=".repeat(60).cyan());
    println!("{}: {}", "Name".bold(), info.name);
    println!("{}: {}", "Version".bold(), info.version);
    println!("{}: {}", "Description".bold(), info.description);
    println!("{}: {}", "Documentation".bold(), info.documentation.bright_blue());
    println!("{}: {}", "Timestamp".bold(), info.timestamp.bright_black());
    println!("{}\n", "=".repeat(60).cyan());

    Ok(())
}

pub async fn health(api_url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let url = format!("{}/health", api_url);

    let response = client
        .get(&url)
        .send()
        .await
        .context("Failed to reach health endpoint")?;

    let status = response.status();
    let health: HealthStatus = response.json().await.context("Invalid health response")?;

    if status.is_success() && health.status == "healthy" {
        println!("{} {} ({})", "✓".green(), "healthy".green(), health.timestamp.bright_black());
    } else {
        println!("{} {} ({})", "✗".red(), health.status.red(), status);
    }

    Ok(())
}

/// Build a request body containing only the provided fields
pub fn build_payload(
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    age: Option<i64>,
) -> Value {
    let mut body = Map::new();
    let text_fields = [
        ("first_name", first_name),
        ("last_name", last_name),
        ("email", email),
        ("phone", phone),
    ];
    for (key, value) in text_fields {
        if let Some(v) = value {
            body.insert(key.to_string(), Value::String(v.to_string()));
        }
    }
    if let Some(age) = age {
        body.insert("age".to_string(), Value::from(age));
    }
    Value::Object(body)
}

pub async fn validate(api_url: &str, payload: &Value) -> Result<()> {
    let client = reqwest::Client::new();
    let url = format!("{}/validate", api_url);

    let response = client
        .post(&url)
        .json(payload)
        .send()
        .await
        .context("Failed to submit record")?;

    match response.status() {
        StatusCode::OK => {
            let success: ValidationSuccess =
                response.json().await.context("Invalid success response")?;
            println!("\n{} {}", "✓".green(), success.message.green().bold());
            let record = &success.data;
            println!("  {}: {}", "First name".bold(), record.first_name);
            println!("  {}: {}", "Last name".bold(), record.last_name);
            println!("  {}: {}", "Email".bold(), record.email);
            println!(
                "  {}: {}",
                "Phone".bold(),
                record.phone.as_deref().unwrap_or("-")
            );
            println!(
                "  {}: {}",
                "Age".bold(),
                record
                    .age
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
        }
        StatusCode::UNPROCESSABLE_ENTITY => {
            let failure: ValidationFailure =
                response.json().await.context("Invalid failure response")?;
            println!("\n{} {}", "✗".red(), failure.message.red().bold());
            for error in failure.errors.iter() {
                println!("  {} {}: {}", "●".red(), error.field.bold(), error.message);
            }
            println!("\n{} field(s) with errors\n", failure.errors.len());
        }
        status => {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Unexpected status {}: {}", status, body);
        }
    }

    Ok(())
}
