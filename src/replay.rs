use crate::{
    artifact_store::ArtifactStore,
    boot::HeaderBag,
    config::RunConfig,
    data::{join_indices, RunResult},
    diff,
    error::Error,
    http_client::{HttpClient, RequestSpec},
    road_map::RoadMap,
};
use colored::Colorize;

/// Re-issues every selected request and compares the live response against
/// the stored souvenir. Classification per entry: timeout, status
/// mismatch, body mismatch, or match. Stored souvenirs are never mutated;
/// a missing or corrupt baseline fails that entry and the run continues.
pub async fn run_replay(
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
    let mut result = RunResult::default();

    for (no, target, payload) in road_map.iter() {
        result.total += 1;
        if !config.is_selected(no) {
            result.skipped += 1;
            continue;
        }

        println!();
        println!("Request #{} ==================", no);

        let souvenir_path = ArtifactStore::souvenir_path(&souvenir_dir, target);
        let stored = match ArtifactStore::read(&souvenir_path) {
            Ok(stored) => stored,
            Err(e) => {
                println!("ERROR - Skipping target \"{}\": {}", target, e);
                result.failed.push(no);
                continue;
            }
        };

        let url = format!("{}{}", config.base_url, target);
        let live = match RequestSpec::build(&url, payload, base_headers) {
            Ok(spec) => client.execute(&spec).await,
            Err(e) => Err(e),
        };

        let live = match live {
            Ok(Some(live)) => live,
            Ok(None) => {
                println!("{}", "ERROR! Request timed out!".red());
                result.failed.push(no);
                continue;
            }
            Err(e) => {
                println!("{}", format!("ERROR! {}", e).red());
                result.failed.push(no);
                continue;
            }
        };

        if live.status_code != stored.status_code {
            println!("{}", "ERROR: Status code mismatch!".red());
            println!("--- EXPECTED ---");
            println!("{}", stored.status_code);
            println!("--- ACTUAL ---");
            println!("{}", live.status_code);
            result.failed.push(no);
        } else if live.body != stored.body {
            println!("{}", "ERROR: Body mismatch!".red());
            println!("--- DIFF ---");
            diff::print_diff(&stored.body, &live.body);
            result.failed.push(no);
        } else {
            println!("{}", "OK!".green());
        }
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
        " Summary: {} tests found [ {} ]",
        result.total,
        status.join(", ")
    );

    if !result.failed.is_empty() {
        println!(
            "{}",
            format!(" Failed tests: {}", join_indices(&result.failed)).red()
        );
    }
}
