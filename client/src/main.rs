use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use greenfelt::fetch::Client;
use greenfelt::poll::PollDriver;
use greenfelt::render::TermRenderer;
use greenfelt_protocol::JoinRequest;

/// Terminal front end for a greenfelt table: optionally joins a game,
/// then polls the server and mirrors the table on stdout.
#[derive(Parser, Debug)]
#[command(name = "greenfelt", about = "poll a card table and render it")]
struct Args {
    /// Base URL of the table server.
    #[arg(long, default_value = "http://127.0.0.1:5000/")]
    server: Url,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Join a game before polling: "username:avatar:game_id".
    #[arg(long)]
    join: Option<String>,

    /// Print the open games and exit.
    #[arg(long)]
    list_games: bool,
}

fn parse_join(raw: &str) -> Result<JoinRequest> {
    let mut parts = raw.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(username), Some(avatar), Some(game)) => Ok(JoinRequest {
            username: username.to_string(),
            avatar: avatar.parse().context("avatar must be a number in 1..=10")?,
            game_choice: game.parse().context("game id must be a number")?,
        }),
        _ => bail!("expected username:avatar:game_id, got {:?}", raw),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let client = Client::new(args.server);

    if args.list_games {
        let listing = client.fetch_game_list().await.context("game list failed")?;
        for (name, connected) in &listing {
            println!("{}: {} connected", name, connected);
        }
        return Ok(());
    }

    if let Some(raw) = &args.join {
        let request = parse_join(raw)?;
        client.join(&request).await.context("join failed")?;
        println!("joined game {} as {}", request.game_choice, request.username);
    }

    let mut renderer = TermRenderer;
    PollDriver::new(client, Duration::from_millis(args.interval_ms))
        .run(&mut renderer)
        .await;
    Ok(())
}
