mod analysis;
mod api;
mod cache;
mod champions;
mod config;
mod display;
mod error;
mod extract;
mod pool;
mod query;

use analysis::scorer::{DEFAULT_BAN_COUNT, DEFAULT_META_COUNT};
use anyhow::{bail, ensure, Context};
use api::client::HttpFetcher;
use api::lcu::{champion_names, name_team, LcuClient};
use api::sources::{Role, SourceChoice};
use cache::FileCache;
use clap::Parser;
use config::Config;
use display::output::{
    display_ban_suggestions, display_blind_picks, display_counter_picks, display_enemy_team,
    display_error, display_info, display_success,
};
use env_logger::Env;
use log::{debug, warn};
use pool::ChampionPool;
use query::CounterService;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "counter_pick")]
#[command(about = "Counter-pick helper filtered to your champion pool", long_about = None)]
struct Args {
    /// Enemy champion (read from champion select or asked for when omitted)
    #[arg(short, long)]
    enemy: Option<String>,

    /// Lane: top, jungle, mid, adc/bot or support
    #[arg(short, long, default_value = "top")]
    role: Role,

    /// Newline-separated list of champions you play
    #[arg(short, long, default_value = "champion_pool.txt")]
    pool: PathBuf,

    /// Preferred stats site (auto tries u.gg, then LoLalytics)
    #[arg(short, long, value_enum, default_value_t = SourceChoice::Auto)]
    source: SourceChoice,

    /// Rank your pool against the current meta instead of one enemy
    #[arg(long)]
    blind: bool,

    /// Number of meta champions used for --blind
    #[arg(long, default_value_t = DEFAULT_META_COUNT)]
    meta_count: usize,

    /// Suggest bans for the champion you plan to play
    #[arg(long, value_name = "CHAMPION")]
    bans: Option<String>,

    /// Number of ban suggestions
    #[arg(long, default_value_t = DEFAULT_BAN_COUNT)]
    ban_count: usize,

    /// Ignore cached pages and download again
    #[arg(long)]
    refresh: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let pool = ChampionPool::load(&args.pool)?;
    ensure!(!pool.is_empty(), "champion pool '{}' is empty", args.pool.display());
    display_info(&format!("Loaded {} champions from {}", pool.len(), args.pool.display()));

    let cache = FileCache::new(
        config.cache_dir.clone(),
        chrono::Duration::hours(config.cache_ttl_hours),
    );
    let fetcher = HttpFetcher::new(&config);

    let enemy = if args.blind || args.bans.is_some() {
        None
    } else {
        Some(match args.enemy {
            Some(enemy) => enemy,
            None => match champ_select_enemy(&config, &fetcher) {
                Ok(Some(enemy)) => enemy,
                Ok(None) => prompt_enemy()?,
                Err(e) => {
                    debug!("champion select unavailable: {}", e);
                    display_info("Champion select unavailable; enter the enemy manually");
                    prompt_enemy()?
                }
            },
        })
    };

    let mut service = CounterService::new(fetcher, cache, config)
        .with_refresh(args.refresh)
        .with_progress(true);

    if args.blind {
        display_info(&format!(
            "Scoring your pool against the top {} {} champions...",
            args.meta_count, args.role
        ));
        let report = service.blind_pick(&pool, args.role, args.meta_count, args.source)?;
        display_blind_picks(&report, &args.role.to_string());
        return Ok(());
    }

    if let Some(main_champ) = &args.bans {
        let main_champ = champions::resolve(main_champ);
        display_info(&format!("Looking for bans as {} {}...", main_champ.name, args.role));
        let bans = service
            .ban_suggestions(&main_champ, args.role, args.ban_count, args.source)
            .with_context(|| format!("no matchup data for {}", main_champ.name))?;
        display_ban_suggestions(&bans, &main_champ.name, &args.role.to_string());
        return Ok(());
    }

    let Some(enemy) = enemy else {
        bail!("no enemy champion given");
    };
    let champion = champions::resolve(&enemy);

    display_info(&format!("Fetching {} matchups for {}...", args.role, champion.name));
    let table = service
        .matchups(&champion, args.role, args.source)
        .with_context(|| format!("no matchup data for {}", champion.name))?;
    display_success(&format!("{} matchups loaded", table.len()));

    display_counter_picks(&table, &pool, &champion.name, &args.role.to_string());

    Ok(())
}

/// Enemy laner picked by number from the live champion select. `None` when
/// the enemy team has not shown any champion yet.
fn champ_select_enemy(config: &Config, fetcher: &HttpFetcher) -> anyhow::Result<Option<String>> {
    let client = LcuClient::connect(config)?;
    let teams = client.champ_select()?;
    if teams.enemies.is_empty() {
        display_info("Enemy team has not picked yet");
        return Ok(None);
    }

    let names = champion_names(fetcher).unwrap_or_else(|e| {
        warn!("no champion names from Data Dragon: {}", e);
        Default::default()
    });
    let enemies = name_team(&teams.enemies, &names);
    display_enemy_team(&enemies);

    print!("Pick a number for the enemy laner: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    match pick_numbered(&enemies, &line) {
        Some(enemy) => Ok(Some(enemy.clone())),
        None => bail!("'{}' is not a number between 1 and {}", line.trim(), enemies.len()),
    }
}

/// 1-based choice out of `options`.
fn pick_numbered<'a>(options: &'a [String], input: &str) -> Option<&'a String> {
    let choice: usize = input.trim().parse().ok()?;
    options.get(choice.checked_sub(1)?)
}

fn prompt_enemy() -> anyhow::Result<String> {
    print!("Enemy champion: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let enemy = line.trim();
    if enemy.is_empty() {
        bail!("no enemy champion given");
    }
    Ok(enemy.to_string())
}
