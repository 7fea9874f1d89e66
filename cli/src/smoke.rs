//! End-to-end smoke checks against a running API

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
}

struct Scenario {
    name: &'static str,
    verb: Verb,
    path: &'static str,
    payload: Option<Value>,
    expected_status: u16,
    /// Extra assertion on the response body
    check: Option<fn(&Value) -> bool>,
}

fn scenarios() -> Vec<Scenario> {
    let get = |name: &'static str, path: &'static str| Scenario {
        name,
        verb: Verb::Get,
        path,
        payload: None,
        expected_status: 200,
        check: None,
    };
    let post = |name: &'static str, payload: Value, expected_status: u16| Scenario {
        name,
        verb: Verb::Post,
        path: "/validate",
        payload: Some(payload),
        expected_status,
        check: None,
    };

    vec![
        get("Root endpoint", "/"),
        get("Health check", "/health"),
        post(
            "Successful validation",
            json!({
                "first_name": "juan",
                "last_name": "perez",
                "email": "juan.perez@example.com",
                "phone": "1234567",
                "age": 30
            }),
            200,
        ),
        post(
            "Validation without optional fields",
            json!({"first_name": "maria", "last_name": "garcia", "email": "maria.garcia@example.com"}),
            200,
        ),
        post(
            "Error: Name too short",
            json!({"first_name": "a", "last_name": "perez", "email": "test@example.com"}),
            422,
        ),
        post(
            "Error: Invalid email",
            json!({"first_name": "juan", "last_name": "perez", "email": "invalid-email"}),
            422,
        ),
        post(
            "Error: Phone too short",
            json!({"first_name": "juan", "last_name": "perez", "email": "juan@example.com", "phone": "123"}),
            422,
        ),
        post(
            "Error: Phone not numeric",
            json!({"first_name": "juan", "last_name": "perez", "email": "juan@example.com", "phone": "123-456-7890"}),
            422,
        ),
        post(
            "Error: Age out of range",
            json!({"first_name": "juan", "last_name": "perez", "email": "juan@example.com", "age": 150}),
            422,
        ),
        post(
            "Error: Missing required fields",
            json!({"first_name": "juan"}),
            422,
        ),
        Scenario {
            check: Some(names_normalized),
            ..post(
                "Name normalization",
                json!({"first_name": "jUaN", "last_name": "pEReZ", "email": "test@example.com"}),
                200,
            )
        },
    ]
}

fn names_normalized(body: &Value) -> bool {
    body["data"]["first_name"] == "Juan" && body["data"]["last_name"] == "Perez"
}

async fn wait_for_api(client: &reqwest::Client, api_url: &str, attempts: u32) -> bool {
    let url = format!("{}/health", api_url);
    for attempt in 1..=attempts {
        let probe = client
            .get(&url)
            .timeout(Duration::from_secs(1))
            .send()
            .await;
        if probe.is_ok() {
            println!("{} API available at {}", "✓".green(), api_url);
            return true;
        }
        if attempt < attempts {
            println!(
                "{}",
                format!("Waiting for API to be available... ({}/{})", attempt, attempts).yellow()
            );
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
    false
}

async fn run_scenario(client: &reqwest::Client, api_url: &str, scenario: &Scenario) -> Result<bool> {
    let url = format!("{}{}", api_url, scenario.path);
    let request = match scenario.verb {
        Verb::Get => client.get(&url),
        Verb::Post => client.post(&url).json(&scenario.payload),
    };
    let response = request.send().await?;
    let status = response.status().as_u16();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    println!("\n{}", scenario.name.blue().bold());
    println!("Status Code: {}", status);
    println!("{}", serde_json::to_string_pretty(&body)?);

    let status_ok = status == scenario.expected_status;
    let check_ok = scenario.check.map_or(true, |check| check(&body));
    Ok(status_ok && check_ok)
}

/// Run every scenario and print a summary. Fails if any scenario failed or
/// the API never became reachable.
pub async fn run(api_url: &str, attempts: u32) -> Result<()> {
    let client = reqwest::Client::new();

    println!("\n{}", "=".repeat(60).blue());
    println!("{}", "PERSONAL DATA VALIDATOR SMOKE TESTS".blue().bold());
    println!("{}", "=".repeat(60).blue());

    if !wait_for_api(&client, api_url, attempts).await {
        anyhow::bail!("Could not connect to the API at {}", api_url);
    }

    let mut results = Vec::new();
    for scenario in scenarios() {
        let passed = match run_scenario(&client, api_url, &scenario).await {
            Ok(passed) => passed,
            Err(err) => {
                println!("{} Error in {}: {}", "✗".red(), scenario.name, err);
                false
            }
        };
        results.push((scenario.name, passed));
    }

    println!("\n{}", "=".repeat(60).blue());
    println!("{}", "SUMMARY".blue().bold());
    println!("{}", "=".repeat(60).blue());
    for (name, passed) in &results {
        let symbol = if *passed { "✓".green() } else { "✗".red() };
        println!("{} {}", symbol, name);
    }

    let passed = results.iter().filter(|(_, ok)| *ok).count();
    let total = results.len();
    println!("\nPassed: {}", format!("{}/{}", passed, total).green());

    if passed != total {
        anyhow::bail!("{} of {} smoke checks failed", total - passed, total);
    }
    println!("{}", "All smoke checks passed".green().bold());
    Ok(())
}
