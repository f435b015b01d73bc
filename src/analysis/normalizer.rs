use crate::api::models::{RawNamedRecord, RawOpponentRecord};
use crate::extract::navigator::ChampionId;
use log::debug;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// One opponent row, already flipped to the subject champion's perspective.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupRecord {
    pub win_rate: f64,
    pub gold_adv_15: Option<f64>,
    pub pick_rate: f64,
    pub matches: f64,
}

/// Display name -> record
pub type MatchupTable = BTreeMap<String, MatchupRecord>;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalize u.gg `counters` rows.
///
/// The site reports the page champion's results against each listed
/// champion; the table we hand out says how *you* fare playing the listed
/// champion, so win rate becomes `100 - raw` and gold advantage is negated.
/// Rows without `gold_adv_15` are off-role or low-sample entries and are
/// dropped, as are rows with no win rate. Unknown ids are kept under a `#<id>` placeholder.
pub fn normalize(counters: &[Value], names: &HashMap<ChampionId, String>) -> MatchupTable {
    let mut table = MatchupTable::new();

    for row in counters {
        let raw: RawOpponentRecord = match serde_json::from_value(row.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("skipping unreadable counter row: {}", e);
                continue;
            }
        };

        let (Some(id), Some(win_rate), Some(gold_adv)) =
            (raw.champion_id, raw.win_rate, raw.gold_adv_15)
        else {
            debug!("skipping incomplete counter row {}", row);
            continue;
        };

        let name = names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("#{}", id));

        table.insert(
            name,
            MatchupRecord {
                win_rate: round2(100.0 - win_rate),
                gold_adv_15: Some(round2(-gold_adv)),
                pick_rate: round2(raw.pick_rate.unwrap_or(0.0)),
                matches: round2(raw.matches.unwrap_or(0.0)),
            },
        );
    }

    table
}

/// Normalize LoLalytics rows, which are keyed by name and use fractions.
pub fn normalize_named(counters: &[Value]) -> MatchupTable {
    let mut table = MatchupTable::new();

    for row in counters {
        let Ok(raw) = serde_json::from_value::<RawNamedRecord>(row.clone()) else {
            continue;
        };
        let (Some(name), Some(win_rate)) = (raw.name(), raw.win_rate) else {
            continue;
        };

        table.insert(
            name.to_string(),
            MatchupRecord {
                win_rate: round2(100.0 - win_rate * 100.0),
                gold_adv_15: raw.gold_diff15.map(|g| round2(-g)),
                pick_rate: round2(raw.pick_rate.unwrap_or(0.0) * 100.0),
                matches: round2(raw.games.unwrap_or(0.0)),
            },
        );
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names() -> HashMap<ChampionId, String> {
        HashMap::from([(83, "Yorick".to_string()), (31, "Cho'Gath".to_string())])
    }

    #[test]
    fn test_perspective_is_inverted() {
        let rows = vec![json!({
            "champion_id": 83, "win_rate": 70.0, "gold_adv_15": 150.0,
            "pick_rate": 3.456, "matches": 1200
        })];
        let table = normalize(&rows, &names());
        let yorick = &table["Yorick"];
        assert_eq!(yorick.win_rate, 30.0);
        assert_eq!(yorick.gold_adv_15, Some(-150.0));
        assert_eq!(yorick.pick_rate, 3.46);
        assert_eq!(yorick.matches, 1200.0);
    }

    #[test]
    fn test_rows_without_gold_are_skipped() {
        let rows = vec![
            json!({"champion_id": 83, "win_rate": 55.0}),
            json!({"champion_id": 31, "win_rate": 45.123, "gold_adv_15": -12.346}),
            json!({"win_rate": 40.0, "gold_adv_15": 5.0}),
            json!("garbage"),
            json!({"champion_id": "not a number", "gold_adv_15": 1.0}),
        ];
        let table = normalize(&rows, &names());
        assert_eq!(table.len(), 1);
        let cho = &table["Cho'Gath"];
        assert_eq!(cho.win_rate, 54.88);
        assert_eq!(cho.gold_adv_15, Some(12.35));
    }

    #[test]
    fn test_rows_without_win_rate_are_skipped() {
        let rows = vec![
            json!({"champion_id": 83, "gold_adv_15": 10.0}),
            json!({"champion_id": 31, "win_rate": null, "gold_adv_15": 10.0}),
        ];
        assert!(normalize(&rows, &names()).is_empty());
    }

    #[test]
    fn test_unknown_id_gets_placeholder() {
        let rows = vec![json!({"champion_id": 999, "win_rate": 50.0, "gold_adv_15": 0.0})];
        let table = normalize(&rows, &HashMap::new());
        assert!(table.contains_key("#999"));
    }

    #[test]
    fn test_named_rows_scale_fractions() {
        let rows = vec![
            json!({"key": "Garen", "winRate": 0.524, "pickRate": 0.031, "games": 812}),
            json!({"championName": " Dr. Mundo ", "winRate": 0.45, "goldDiff15": 80.0}),
            json!({"key": "NoRate"}),
        ];
        let table = normalize_named(&rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table["Garen"].win_rate, 47.6);
        assert_eq!(table["Garen"].pick_rate, 3.1);
        assert_eq!(table["Garen"].gold_adv_15, None);
        assert_eq!(table["Dr. Mundo"].win_rate, 55.0);
        assert_eq!(table["Dr. Mundo"].gold_adv_15, Some(-80.0));
    }
}
