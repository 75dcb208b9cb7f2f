//! Deployment commands.

use anyhow::Result;
use chrono::Utc;
use deploytrack_api::DeploymentClient;
use deploytrack_core::{Deployment, DeploymentInput};

pub async fn list(api_url: &str) -> Result<()> {
    let client = DeploymentClient::new(api_url)?;
    let deployments = client.list().await?;

    if deployments.is_empty() {
        println!("No deployments");
    } else {
        print!("{}", format_table(&deployments));
    }
    Ok(())
}

pub async fn show(api_url: &str, id: &str) -> Result<()> {
    let client = DeploymentClient::new(api_url)?;
    let deployment = client.get(id).await?;
    println!("{}", serde_json::to_string_pretty(&deployment)?);
    Ok(())
}

pub async fn create(
    api_url: &str,
    app: String,
    environment: String,
    status: String,
    commit: String,
    branch: String,
) -> Result<()> {
    let client = DeploymentClient::new(api_url)?;
    let deployment = client
        .create(&DeploymentInput {
            app_name: app,
            environment,
            status,
            commit_hash: commit,
            branch,
            ..Default::default()
        })
        .await?;

    println!("Created deployment {}", deployment.id);
    Ok(())
}

pub async fn update(api_url: &str, id: &str, status: String, completed: bool) -> Result<()> {
    let client = DeploymentClient::new(api_url)?;
    let current = client.get(id).await?;

    let mut input = DeploymentInput::from(&current);
    input.status = status;
    if completed {
        input.completed_at = Some(Utc::now());
    }

    let deployment = client.replace(id, &input).await?;
    println!("Deployment {} is now {}", deployment.id, deployment.status);
    Ok(())
}

const HEADERS: [&str; 7] = [
    "ID",
    "APP",
    "ENVIRONMENT",
    "STATUS",
    "BRANCH",
    "COMMIT",
    "STARTED",
];

/// Render deployments as a left-aligned, space-padded table.
pub fn format_table(deployments: &[Deployment]) -> String {
    let rows: Vec<[String; 7]> = deployments
        .iter()
        .map(|d| {
            [
                d.id.to_string(),
                d.app_name.clone(),
                d.environment.clone(),
                d.status.clone(),
                d.branch.clone(),
                d.commit_hash.clone(),
                d.started_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header = HEADERS.map(str::to_string);
    for row in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use deploytrack_core::DeploymentId;

    #[test]
    fn test_format_table() {
        let deployments = vec![Deployment {
            id: DeploymentId::from("20240101120000"),
            app_name: "frontend-app".to_string(),
            environment: "dev".to_string(),
            status: "in-progress".to_string(),
            started_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            completed_at: None,
            commit_hash: "abc123".to_string(),
            branch: "main".to_string(),
        }];

        let table = format_table(&deployments);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID              APP"));
        assert!(lines[1].starts_with("20240101120000  frontend-app"));
        assert!(lines[1].ends_with("2024-01-01 12:00:00"));
    }
}
