use crate::analysis::normalizer::MatchupTable;
use crate::analysis::scorer::{BanSuggestion, BlindPickReport, BlindPickScore};
use crate::error::SourceFailure;
use crate::pool::ChampionPool;
use colored::*;
use std::cmp::Ordering;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct CounterRow {
    champion: String,
    #[tabled(rename = "WR %")]
    win_rate: String,
    #[tabled(rename = "Gold Adv @15")]
    gold_adv: String,
    matches: String,
}

#[derive(Tabled)]
struct BlindRow {
    rank: String,
    champion: String,
    #[tabled(rename = "WR %")]
    score: String,
    #[tabled(rename = "meta samples")]
    samples: String,
}

#[derive(Tabled)]
struct MetaRow {
    #[tabled(rename = "#")]
    rank: String,
    champion: String,
    score: String,
}

#[derive(Tabled)]
struct BanRow {
    #[tabled(rename = "#")]
    rank: String,
    champion: String,
    #[tabled(rename = "your WR %")]
    win_rate: String,
    #[tabled(rename = "pick %")]
    pick_rate: String,
    score: String,
}

/// Pool champions out of `table`, best win rate first:
/// `(name, win rate, gold advantage @15, matches)`.
pub fn pool_rows(table: &MatchupTable, pool: &ChampionPool) -> Vec<(String, f64, Option<f64>, f64)> {
    let mut rows: Vec<_> = table
        .iter()
        .filter(|(name, _)| pool.contains(name))
        .map(|(name, r)| (name.clone(), r.win_rate, r.gold_adv_15, r.matches))
        .collect();

    rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    rows
}

pub fn display_counter_picks(table: &MatchupTable, pool: &ChampionPool, enemy: &str, role: &str) {
    let rows = pool_rows(table, pool);

    if rows.is_empty() {
        println!(
            "{}",
            format!("None of your champions appear in the counter list for {}.", enemy).yellow()
        );
        return;
    }

    println!(
        "\n{}",
        format!("🎯 Best picks from your pool vs {} ({})", enemy, role)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<CounterRow> = rows
        .into_iter()
        .map(|(champion, win_rate, gold_adv, matches)| CounterRow {
            champion,
            win_rate: color_win_rate(win_rate),
            gold_adv: gold_adv.map_or_else(|| "-".to_string(), |g| format!("{:+.2}", g)),
            matches: format!("{:.0}", matches),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_blind_picks(report: &BlindPickReport, role: &str) {
    if !report.meta.is_empty() {
        println!(
            "\n{}",
            format!("📈 Meta champions ({})", role).bold().cyan()
        );
        let rows: Vec<MetaRow> = report
            .meta
            .iter()
            .enumerate()
            .map(|(idx, m)| MetaRow {
                rank: format!("{}", idx + 1),
                champion: m.name.clone(),
                score: format!("{:.2}", m.score),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    if report.best.is_empty() {
        println!(
            "{}",
            "None of your champions appear in the meta matchup tables.".yellow()
        );
    } else {
        print_blind_table("🛡️ Best blind picks (average win rate)", &report.best);
        print_blind_table("🧱 Safest blind picks (worst-case win rate)", &report.safest);
    }

    if !report.failures.is_empty() {
        display_failures("Skipped meta champions", &report.failures);
    }
}

pub fn display_ban_suggestions(bans: &[BanSuggestion], main: &str, role: &str) {
    if bans.is_empty() {
        println!(
            "{}",
            format!("No popular champion beats {} in {}.", main, role).yellow()
        );
        return;
    }

    println!(
        "\n{}",
        format!("🚫 Suggested bans when playing {} ({})", main, role)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<BanRow> = bans
        .iter()
        .enumerate()
        .map(|(idx, b)| BanRow {
            rank: format!("{}", idx + 1),
            champion: b.champion_name.clone(),
            win_rate: color_win_rate(b.win_rate),
            pick_rate: format!("{:.2}", b.pick_rate),
            score: format!("{:.2}", b.score),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

/// Numbered list for picking the enemy laner out of champion select.
pub fn display_enemy_team(enemies: &[String]) {
    println!("\n{}", "👀 Enemy team in champion select".bold().cyan());
    for (idx, name) in enemies.iter().enumerate() {
        println!("  {}. {}", idx + 1, name);
    }
}

fn print_blind_table(title: &str, scores: &[BlindPickScore]) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<BlindRow> = scores
        .iter()
        .enumerate()
        .map(|(idx, s)| BlindRow {
            rank: format!("#{}", idx + 1),
            champion: s.champion_name.clone(),
            score: color_win_rate(s.score),
            samples: format!("{}", s.samples),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

fn color_win_rate(win_rate: f64) -> String {
    let text = format!("{:.2}", win_rate);
    if win_rate >= 52.0 {
        text.green().to_string()
    } else if win_rate < 48.0 {
        text.red().to_string()
    } else {
        text
    }
}

pub fn display_failures(title: &str, failures: &[SourceFailure]) {
    println!("\n{}", title.bold().yellow());
    for failure in failures {
        println!("  • {}", failure);
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::MatchupRecord;

    fn record(win_rate: f64) -> MatchupRecord {
        MatchupRecord {
            win_rate,
            gold_adv_15: None,
            pick_rate: 0.0,
            matches: 10.0,
        }
    }

    #[test]
    fn test_pool_rows_sorted_and_filtered() {
        let mut table = MatchupTable::new();
        table.insert("Yorick".to_string(), record(35.0));
        table.insert("Dr. Mundo".to_string(), record(51.5));
        table.insert("Garen".to_string(), record(60.0));

        let pool = ChampionPool::parse("yorick\ndrmundo\n");
        let rows = pool_rows(&table, &pool);
        let names: Vec<&str> = rows.iter().map(|r| r.0.as_str()).collect();
        assert_eq!(names, vec!["Dr. Mundo", "Yorick"]);
    }
}
