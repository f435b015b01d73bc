//! Finds the blocks we care about inside an extracted page-state tree.
//!
//! The top-level keys of the u.gg tree are request identifiers (mostly API
//! URLs), so a block is recognised by substrings of its key rather than by a
//! fixed path. Every key pattern the crate relies on is listed here.

use crate::error::AppError;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub type ChampionId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    ChampionNames,
    Matchups,
}

impl BlockKind {
    fn sentinels(self) -> &'static [&'static str] {
        match self {
            BlockKind::ChampionNames => &["seo-champion-names", "champion_id"],
            BlockKind::Matchups => &["matchups"],
        }
    }

    pub fn matches(self, key: &str) -> bool {
        self.sentinels().iter().any(|s| key.contains(s))
    }
}

/// Composite stats key, e.g. `world_emerald_plus_top`.
pub fn role_key(rank_tier: &str, role: &str) -> String {
    format!("{}_{}", rank_tier, role).to_lowercase()
}

pub struct SchemaNavigator<'a> {
    blocks: &'a Map<String, Value>,
}

impl<'a> SchemaNavigator<'a> {
    pub fn new(tree: &'a Value) -> Result<Self, AppError> {
        let blocks = tree
            .as_object()
            .ok_or_else(|| AppError::Schema("page state is not a JSON object".to_string()))?;
        Ok(SchemaNavigator { blocks })
    }

    /// `data` fields of every block whose key satisfies `predicate`.
    /// Blocks that are not objects or have no `data` are skipped.
    pub fn data_blocks<P>(&self, predicate: P) -> impl Iterator<Item = (&'a str, &'a Value)>
    where
        P: Fn(&str) -> bool,
    {
        self.blocks.iter().filter_map(move |(key, block)| {
            if !predicate(key) {
                return None;
            }
            let data = block.as_object()?.get("data")?;
            Some((key.as_str(), data))
        })
    }

    pub fn find_subtree<P>(&self, predicate: P) -> Option<&'a Value>
    where
        P: Fn(&str) -> bool,
    {
        self.data_blocks(predicate).map(|(_, data)| data).next()
    }

    pub fn champion_name_map(&self) -> Result<HashMap<ChampionId, String>, AppError> {
        let names = self
            .find_subtree(|key| BlockKind::ChampionNames.matches(key))
            .and_then(Value::as_object)
            .ok_or_else(|| AppError::Schema("champion name block not found".to_string()))?;

        let mut map = HashMap::with_capacity(names.len());
        for (map_key, record) in names {
            let Some(name) = record.get("name").and_then(Value::as_str) else {
                continue;
            };
            // Data Dragon style records key the map by slug and carry the
            // numeric id in `key`; the SEO variant keys the map by id.
            let id = record
                .get("key")
                .and_then(as_champion_id)
                .or_else(|| map_key.parse().ok());
            if let Some(id) = id {
                map.insert(id, name.to_string());
            }
        }

        Ok(map)
    }

    /// Per-opponent `counters` rows for `{rank_tier}_{role}`.
    pub fn role_matchups(&self, rank_tier: &str, role: &str) -> Result<&'a Vec<Value>, AppError> {
        let wanted = role_key(rank_tier, role);

        self.data_blocks(|key| BlockKind::Matchups.matches(key))
            .filter_map(|(_, data)| data.get(&wanted))
            .find_map(|entry| entry.get("counters").and_then(Value::as_array))
            .ok_or_else(|| AppError::Schema(format!("no matchup data for {}", wanted)))
    }
}

/// LoLalytics keeps its counters at `props.pageProps.data.counters` of the
/// `__NEXT_DATA__` tree.
pub fn next_data_counters(tree: &Value) -> Result<&Vec<Value>, AppError> {
    tree.pointer("/props/pageProps/data/counters")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Schema("props.pageProps.data.counters missing".to_string()))
}

fn as_champion_id(value: &Value) -> Option<ChampionId> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| ChampionId::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
