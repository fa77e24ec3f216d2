use clap::{Args, CommandFactory, Parser, Subcommand};
use roadsnap::{boot, run_replay, run_snapshot, ArtifactStore, Error, ReqwestHttpClient, RunConfig};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "roadsnap",
    version,
    about = "HTTP snapshot and regression testing against declarative road maps"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record live responses as new souvenirs
    Snapshot(RunArgs),
    /// Re-issue requests and compare them against stored souvenirs
    Replay(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Path to the road map file (".json" is appended when missing)
    road_map: Option<String>,

    /// The base url which is used as prefix
    #[arg(short = 'b', long)]
    baseurl: Option<String>,

    /// A comma separated list of test case numbers which should be executed
    #[arg(short = 't', long)]
    testcases: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    let (args, replay) = match &cli.command {
        Command::Snapshot(args) => (args, false),
        Command::Replay(args) => (args, true),
    };

    if args.no_color {
        colored::control::set_override(false);
    }

    let Some(road_map) = &args.road_map else {
        // a missing road map path is not an error, just print the usage
        let _ = Cli::command().print_help();
        return Ok(());
    };

    let config = RunConfig::resolve(road_map, args.baseurl.clone(), args.testcases.as_deref())?;
    let base_headers = boot(None);
    let store = ArtifactStore::new("souvenirs");
    let client = ReqwestHttpClient::new()?;

    if replay {
        run_replay(&config, &store, &client, &base_headers).await?;
    } else {
        run_snapshot(&config, &store, &client, &base_headers).await?;
    }

    Ok(())
}
