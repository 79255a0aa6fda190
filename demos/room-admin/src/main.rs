use std::time::Duration;

use parley::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search { query: String, limit: u64 },
    Show(RoomId),
    SetActive(RoomId, bool),
    Members(RoomId),
}

const USAGE: &str = "usage: room-admin <search QUERY [LIMIT] | show ROOM | activate ROOM | deactivate ROOM | members ROOM>";

fn parse_command(args: &[String]) -> Result<Command, String> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["search", query] => Ok(Command::Search { query: (*query).to_owned(), limit: 20 }),
        ["search", query, limit] => {
            let limit = limit.parse().map_err(|_| format!("limit must be a number, got {limit:?}"))?;
            Ok(Command::Search { query: (*query).to_owned(), limit })
        }
        ["show", room] => Ok(Command::Show(RoomId::from(*room))),
        ["activate", room] => Ok(Command::SetActive(RoomId::from(*room), true)),
        ["deactivate", room] => Ok(Command::SetActive(RoomId::from(*room), false)),
        ["members", room] => Ok(Command::Members(RoomId::from(*room))),
        _ => Err(USAGE.into()),
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Reads the `PARLEY_*` variables through `lookup` (normally `std::env::var`).
fn settings(lookup: impl Fn(&str) -> Option<String>) -> Result<(ClientConfig, HttpAuthConfig), String> {
    let pod_url = lookup("PARLEY_POD_URL").ok_or("PARLEY_POD_URL is not set")?;

    let mut config = ClientConfig { pod_url: pod_url.clone(), ..ClientConfig::default() };
    if let Some(secs) = lookup("PARLEY_TIMEOUT_SECS") {
        let secs = secs.parse().map_err(|_| format!("PARLEY_TIMEOUT_SECS: not a number: {secs:?}"))?;
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(retries) = lookup("PARLEY_MAX_RETRIES") {
        let retries = retries.parse().map_err(|_| format!("PARLEY_MAX_RETRIES: not a number: {retries:?}"))?;
        config.retry = RetryPolicy::with_retries(retries);
    }

    let auth = HttpAuthConfig {
        session_auth_url: lookup("PARLEY_SESSION_AUTH_URL").unwrap_or_else(|| pod_url.clone()),
        key_auth_url: lookup("PARLEY_KEY_AUTH_URL").unwrap_or(pod_url),
        timeout: config.request_timeout,
    };
    Ok((config, auth))
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn describe(detail: &RoomDetail) -> String {
    let state = if detail.active { "active" } else { "inactive" };
    let mut line = format!("{}  {}  [{state}]", detail.id, detail.room.name);
    if let Some(description) = &detail.room.description {
        line.push_str(&format!("  {description}"));
    }
    for keyword in &detail.room.keywords {
        line.push_str(&format!("  #{}={}", keyword.key, keyword.value));
    }
    line
}

async fn run(client: &ParleyClient, command: Command) -> Result<(), ParleyError> {
    match command {
        Command::Search { query, limit } => {
            let results = client.rooms().search_rooms(&RoomSearchCriteria::new(query), 0, limit).await?;
            println!("{} room(s) match, showing {}", results.count, results.rooms.len());
            for detail in &results.rooms {
                println!("{}", describe(detail));
            }
        }
        Command::Show(room_id) => {
            println!("{}", describe(&client.rooms().room_info(&room_id).await?));
        }
        Command::SetActive(room_id, active) => {
            println!("{}", describe(&client.rooms().set_room_active(&room_id, active).await?));
        }
        Command::Members(room_id) => {
            for member in client.rooms().room_members(&room_id).await? {
                let role = if member.owner { "owner" } else { "member" };
                println!("{}  {role}", member.user);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_command(&args)?;
    let (config, auth_config) = settings(|key| std::env::var(key).ok())?;

    let client = ParleyClient::builder()
        .config(config)
        .connect(HttpAuthenticator::new(&auth_config)?)
        .await?;

    if let Err(e) = run(&client, command).await {
        tracing::error!(kind = %e.kind(), error = %e, "command failed");
        return Err(e.into());
    }
    Ok(())
}
