use super::normalizer::{round2, MatchupTable};
use crate::error::SourceFailure;
use crate::pool::ChampionPool;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_META_COUNT: usize = 15;
pub const DEFAULT_BAN_COUNT: usize = 5;

/// How much each point of win rate above 50% is worth next to pick rate
/// when picking meta champions. Heuristic, tune freely.
const META_WIN_RATE_WEIGHT: f64 = 0.25;

/// Weight of an enemy's role pick rate in the ban score.
const BAN_PICK_RATE_WEIGHT: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct MetaChampion {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlindPickScore {
    pub champion_name: String,
    pub score: f64,
    pub samples: usize,
}

#[derive(Debug, Default)]
pub struct BlindPickReport {
    pub meta: Vec<MetaChampion>,
    pub best: Vec<BlindPickScore>,
    pub safest: Vec<BlindPickScore>,
    pub failures: Vec<SourceFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BanSuggestion {
    pub champion_name: String,
    /// The main champion's win rate against this enemy
    pub win_rate: f64,
    pub pick_rate: f64,
    pub score: f64,
}

/// Rank the enemies that beat your main champion by
/// `(50 - your_win_rate) + pick_rate * 0.6`.
///
/// `table` is the main champion's own page, so each record holds the listed
/// enemy's win rate against it and yours is `100 - win_rate`. `pick_rates`
/// are role pick rates by display name, usually from the meta reference
/// page; a champion missing there falls back to the pick rate on the main
/// champion's page. Enemies you beat, and enemies nobody picks, are left out.
pub fn suggest_bans(
    table: &MatchupTable,
    pick_rates: &HashMap<String, f64>,
    count: usize,
) -> Vec<BanSuggestion> {
    let mut bans: Vec<BanSuggestion> = table
        .iter()
        .filter_map(|(name, record)| {
            let win_rate = round2(100.0 - record.win_rate);
            let pick_rate = pick_rates
                .get(name)
                .copied()
                .filter(|pk| *pk > 0.0)
                .unwrap_or(record.pick_rate);

            if win_rate >= 50.0 || pick_rate <= 0.0 {
                return None;
            }

            Some(BanSuggestion {
                champion_name: name.clone(),
                win_rate,
                pick_rate,
                score: round2((50.0 - win_rate) + pick_rate * BAN_PICK_RATE_WEIGHT),
            })
        })
        .collect();

    bans.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    bans.truncate(count);
    bans
}

/// Rank the champions listed on a reference page by
/// `pick_rate + (their_win_rate - 50) * 0.25`.
///
/// Records hold *our* win rate against the listed champion, so the listed
/// champion's own win rate is `100 - win_rate`.
pub fn select_meta_champions(table: &MatchupTable, count: usize) -> Vec<MetaChampion> {
    let mut meta: Vec<MetaChampion> = table
        .iter()
        .map(|(name, record)| {
            let their_win_rate = 100.0 - record.win_rate;
            MetaChampion {
                name: name.clone(),
                score: round2(record.pick_rate + (their_win_rate - 50.0) * META_WIN_RATE_WEIGHT),
            }
        })
        .collect();

    meta.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    meta.truncate(count);
    meta
}

/// Win rates of each champion across several meta champions' tables.
#[derive(Debug, Default)]
pub struct BlindPickSamples {
    samples: BTreeMap<String, Vec<f64>>,
}

impl BlindPickSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every row of one meta champion's table, keeping only pool
    /// champions when a pool is given.
    pub fn add_table(&mut self, table: &MatchupTable, pool: Option<&ChampionPool>) {
        for (name, record) in table {
            if pool.map_or(true, |p| p.contains(name)) {
                self.samples
                    .entry(name.clone())
                    .or_default()
                    .push(record.win_rate);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Highest average win rate first.
    pub fn best_blind_pick(&self) -> Vec<BlindPickScore> {
        self.rank(|rates| rates.iter().sum::<f64>() / rates.len() as f64)
    }

    /// Least-bad worst case first.
    pub fn safest_blind_pick(&self) -> Vec<BlindPickScore> {
        self.rank(|rates| rates.iter().copied().fold(f64::INFINITY, f64::min))
    }

    fn rank<F>(&self, aggregate: F) -> Vec<BlindPickScore>
    where
        F: Fn(&[f64]) -> f64,
    {
        let mut scores: Vec<BlindPickScore> = self
            .samples
            .iter()
            .filter(|(_, rates)| !rates.is_empty())
            .map(|(name, rates)| BlindPickScore {
                champion_name: name.clone(),
                score: round2(aggregate(rates)),
                samples: rates.len(),
            })
            .collect();

        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::MatchupRecord;

    fn record(win_rate: f64, pick_rate: f64) -> MatchupRecord {
        MatchupRecord {
            win_rate,
            gold_adv_15: Some(0.0),
            pick_rate,
            matches: 100.0,
        }
    }

    fn table(rows: &[(&str, f64)]) -> MatchupTable {
        rows.iter()
            .map(|(name, wr)| (name.to_string(), record(*wr, 1.0)))
            .collect()
    }

    #[test]
    fn test_mean_and_min_over_three_meta_champions() {
        let mut samples = BlindPickSamples::new();
        samples.add_table(&table(&[("Yorick", 60.0), ("Garen", 52.0)]), None);
        samples.add_table(&table(&[("Yorick", 40.0), ("Garen", 50.0)]), None);
        samples.add_table(&table(&[("Yorick", 80.0), ("Garen", 48.0)]), None);

        let best = samples.best_blind_pick();
        assert_eq!(best[0].champion_name, "Yorick");
        assert_eq!(best[0].score, 60.0);
        assert_eq!(best[0].samples, 3);

        let safest = samples.safest_blind_pick();
        assert_eq!(safest[0].champion_name, "Garen");
        assert_eq!(safest[0].score, 48.0);
        assert_eq!(safest[1].champion_name, "Yorick");
        assert_eq!(safest[1].score, 40.0);
    }

    #[test]
    fn test_pool_filter_and_missing_champions() {
        let pool = ChampionPool::from_names(["yorick", "sion"]);
        let mut samples = BlindPickSamples::new();
        samples.add_table(&table(&[("Yorick", 55.0), ("Garen", 52.0)]), Some(&pool));

        // Sion never showed up, so it is absent rather than scored as 0
        let best = samples.best_blind_pick();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].champion_name, "Yorick");
        assert_eq!(best[0].score, 55.0);
    }

    #[test]
    fn test_placeholder_names_are_scored() {
        let mut samples = BlindPickSamples::new();
        samples.add_table(&table(&[("#950", 51.0)]), None);
        let best = samples.best_blind_pick();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].champion_name, "#950");
    }

    #[test]
    fn test_empty_samples_rank_nothing() {
        let samples = BlindPickSamples::new();
        assert!(samples.is_empty());
        assert!(samples.best_blind_pick().is_empty());
        assert!(samples.safest_blind_pick().is_empty());
    }

    #[test]
    fn test_meta_selection_formula() {
        let mut t = MatchupTable::new();
        // listed champion wins 54% against the reference, picked 10%
        t.insert("Darius".to_string(), record(46.0, 10.0));
        t.insert("Garen".to_string(), record(50.0, 12.0));
        t.insert("Fringe".to_string(), record(30.0, 0.5));

        let meta = select_meta_champions(&t, 2);
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0], MetaChampion { name: "Garen".to_string(), score: 12.0 });
        assert_eq!(meta[1], MetaChampion { name: "Darius".to_string(), score: 11.0 });
    }

    #[test]
    fn test_bans_rank_threat_and_popularity() {
        // Yorick's page: each record is the enemy's win rate against Yorick
        let mut yorick = MatchupTable::new();
        yorick.insert("Darius".to_string(), record(56.0, 1.0));
        yorick.insert("Garen".to_string(), record(52.0, 1.0));
        yorick.insert("Sion".to_string(), record(45.0, 1.0));
        yorick.insert("Urgot".to_string(), record(60.0, 1.0));
        yorick.insert("Fringe".to_string(), record(58.0, 0.0));

        let pick_rates = HashMap::from([
            ("Darius".to_string(), 10.0),
            ("Garen".to_string(), 12.0),
            ("Sion".to_string(), 20.0),
            ("Urgot".to_string(), 0.0),
        ]);

        let bans = suggest_bans(&yorick, &pick_rates, 3);
        let names: Vec<&str> = bans.iter().map(|b| b.champion_name.as_str()).collect();

        // Sion loses to Yorick and Fringe is never picked. Urgot has no
        // meta pick rate, so its 1% from Yorick's page is used.
        assert_eq!(names, vec!["Darius", "Urgot", "Garen"]);
        assert_eq!(bans[0].win_rate, 44.0);
        assert_eq!(bans[0].score, 12.0);
        assert_eq!(bans[1], BanSuggestion {
            champion_name: "Urgot".to_string(),
            win_rate: 40.0,
            pick_rate: 1.0,
            score: 10.6,
        });
        assert_eq!(bans[2].score, 9.2);
    }

    #[test]
    fn test_bans_respect_count() {
        let mut t = MatchupTable::new();
        t.insert("Darius".to_string(), record(56.0, 5.0));
        t.insert("Garen".to_string(), record(52.0, 5.0));
        assert_eq!(suggest_bans(&t, &HashMap::new(), 1).len(), 1);
        assert!(suggest_bans(&t, &HashMap::new(), 0).is_empty());
    }
}
