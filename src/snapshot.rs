use crate::{
    artifact_store::ArtifactStore,
    boot::HeaderBag,
    config::RunConfig,
    data::{join_indices, RunResult},
    error::Error,
    http_client::{HttpClient, RequestSpec},
    road_map::RoadMap,
};
use colored::Colorize;

/// Records a fresh souvenir for every selected road-map entry. Snapshot
/// always trusts the live response as the new baseline; a timed-out entry
/// stores nothing.
///
/// Outcomes are classified as timeout (no response), bad (4xx), error
/// (5xx) or success. Entry-level failures never abort the run.
pub async fn run_snapshot(
    config: &RunConfig,
    store: &ArtifactStore,
    client: &dyn HttpClient,
    base_headers: &HeaderBag,
) -> Result<RunResult, Error> {
    let road_map = RoadMap::load(&config.road_map_path)?;
    println!(
        "Processing road map file \"{}\":",
        config.road_map_path.display()
    );

    let souvenir_dir = store.souvenir_dir(&config.road_map_path)?;
    // A selective run must not wipe souvenirs of untouched targets.
    if config.selection.is_none() {
        ArtifactStore::ensure_empty(&souvenir_dir)?;
    } else {
        ArtifactStore::ensure_exists(&souvenir_dir)?;
    }

    let mut result = RunResult::default();

    for (no, target, payload) in road_map.iter() {
        result.total += 1;
        if !config.is_selected(no) {
            result.skipped += 1;
            continue;
        }

        println!();
        println!("Request #{} ==================", no);

        let url = format!("{}{}", config.base_url, target);
        let spec = match RequestSpec::build(&url, payload, base_headers) {
            Ok(spec) => spec,
            Err(e) => {
                println!("{}", format!("ERROR! {}", e).red());
                result.failed.push(no);
                continue;
            }
        };

        let record = match client.execute(&spec).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                println!("ERROR! Request timed out!");
                result.failed.push(no);
                continue;
            }
            Err(e) => {
                println!("{}", format!("ERROR! {}", e).red());
                result.failed.push(no);
                continue;
            }
        };

        ArtifactStore::write(&ArtifactStore::souvenir_path(&souvenir_dir, target), &record)?;

        let code = record.status_code;
        let colored_code = if (400..500).contains(&code) {
            result.bad.push(no);
            code.to_string().magenta()
        } else if code >= 500 {
            result.failed.push(no);
            code.to_string().red()
        } else {
            code.to_string().green()
        };

        println!(
            " --> {}: Stored {} bytes as souvenir",
            colored_code,
            record.body.len()
        );
    }

    print_summary(&result);
    Ok(result)
}

fn print_summary(result: &RunResult) {
    println!();
    println!("==========================");

    let mut status = Vec::new();
    if result.skipped > 0 {
        status.push(format!("{} skipped", result.skipped).blue().to_string());
    }
    if !result.bad.is_empty() {
        status.push(format!("{} bad", result.bad.len()).magenta().to_string());
    }
    if !result.failed.is_empty() {
        status.push(format!("{} failed", result.failed.len()).red().to_string());
    }
    if result.successful() > 0 {
        status.push(
            format!("{} successful", result.successful())
                .green()
                .to_string(),
        );
    }

    println!(
        " Summary: {} requests found [ {} ]",
        result.total,
        status.join(", ")
    );

    if !result.failed.is_empty() {
        println!(
            "{}",
            format!(" Failed requests: {}", join_indices(&result.failed)).red()
        );
    }
    if !result.bad.is_empty() {
        println!(
            "{}",
            format!(" Bad requests: {}", join_indices(&result.bad)).magenta()
        );
    }
}
