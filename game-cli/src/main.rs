use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use game_cli::{
    Reply, Session,
    commands::{self, HELP},
    config::Config,
    render::render,
    upload::spawn_upload,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't interleave with the game view
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    info!("Starting location game...");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Rules: at least {} players, question {}",
        config.min_players,
        if config.require_question { "required" } else { "optional" }
    );

    let mut session = Session::new(&config);
    let (upload_tx, mut upload_rx) = mpsc::unbounded_channel();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", HELP);
    println!("{}", render(session.game()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                let command = match commands::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match session.execute(command) {
                    Reply::Print(text) => println!("{}", text),
                    Reply::StartUpload(path) => {
                        println!("Loading {}...", path.display());
                        spawn_upload(path, upload_tx.clone());
                    }
                    Reply::Quit => break,
                }
            }
            Some(outcome) = upload_rx.recv() => {
                println!("{}", session.finish_upload(outcome));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!("Goodbye.");
    Ok(())
}
