mod api;
mod config;
mod ranking;
mod session;
mod state;
mod store;

#[cfg(test)]
mod test_support;

pub use api::{FetchError, RankingsClient, RankingsQuery, PAGE_SIZE, PERSONAL_COUNT};
pub use config::Config;
pub use ranking::{decode_rankings, Ranking};
pub use session::SessionState;
pub use state::{
    Commit, Dashboard, DashboardState, RankingKind, RankingSlot, Session, Ticket,
};
pub use store::RankingsStore;

use serde_json::Value;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

async fn app() -> Result<(), Error> {
    let mut args = std::env::args().skip(1);
    let page: u32 = match args.next() {
        Some(page) => page
            .parse()
            .map_err(|e| format!("Invalid page `{}`: {}", page, e))?,
        None => 1,
    };
    let username = args.next();

    let config = Config::from_env()?;
    log::info!("Using ranking API at {}", config.api_url);

    let dashboard = Dashboard::new();
    let store = RankingsStore::new(dashboard.clone(), RankingsClient::new(&config)?);
    let session = SessionState::new(dashboard.clone());

    let mut pending = vec![
        store.dispatch_world_ranks(page),
        store.dispatch_local_ranks(page),
    ];
    if let Some(username) = username {
        session.set_username(username.clone());
        pending.push(store.dispatch_personal_ranks(username));
    }
    for task in pending {
        task.await?;
    }

    let offset = page.saturating_sub(1) * PAGE_SIZE;
    print_ranks(&dashboard, RankingKind::World, offset)?;
    print_ranks(&dashboard, RankingKind::Local, offset)?;
    if !session.username().is_empty() {
        print_ranks(&dashboard, RankingKind::Personal, 0)?;
    }

    Ok(())
}

fn print_ranks(dashboard: &Dashboard, kind: RankingKind, offset: u32) -> Result<(), Error> {
    match dashboard.updated_at(kind) {
        Some(updated_at) => println!("{} (as of {})", kind, updated_at.format("%H:%M:%S UTC")),
        None => println!("{}", kind),
    }

    let payload: Value = match dashboard.ranks(kind) {
        Some(payload) => payload,
        None => {
            println!("  unavailable");
            return Ok(());
        }
    };

    match decode_rankings(&payload) {
        Ok(rows) if rows.is_empty() => println!("  no entries"),
        Ok(rows) => {
            for (i, row) in rows.iter().enumerate() {
                println!(
                    "  {:>4}. {:<24} class {:<3} {:>10}",
                    offset as usize + i + 1,
                    row.username,
                    row.class_id,
                    row.score
                );
            }
        }
        // Not the usual row format, show it as is
        Err(_) => println!("{}", serde_json::to_string_pretty(&payload)?),
    }

    Ok(())
}

pub async fn main() {
    env_logger::init();

    if let Err(e) = app().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
