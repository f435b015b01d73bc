use serde::Deserialize;

// u.gg matchups block: data.<tier>_<role>.counters[]
// Every field is optional so one odd row never fails the whole table.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawOpponentRecord {
    pub champion_id: Option<u32>,
    pub win_rate: Option<f64>,
    pub gold_adv_15: Option<f64>,
    #[serde(default)]
    pub pick_rate: Option<f64>,
    #[serde(default)]
    pub matches: Option<f64>,
}

// LoLalytics __NEXT_DATA__: props.pageProps.data.counters[]
// winRate and pickRate are fractions (0.524 = 52.4%)
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawNamedRecord {
    pub key: Option<String>,
    pub champion_name: Option<String>,
    pub win_rate: Option<f64>,
    pub gold_diff15: Option<f64>,
    pub pick_rate: Option<f64>,
    pub games: Option<f64>,
}

impl RawNamedRecord {
    pub fn name(&self) -> Option<&str> {
        self.champion_name
            .as_deref()
            .or(self.key.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

// Data Dragon champion.json: data.<slug> = { key: "266", name: "Aatrox", .. }
#[derive(Debug, Deserialize, Clone)]
pub struct DataDragonChampions {
    pub data: std::collections::HashMap<String, DataDragonChampion>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataDragonChampion {
    pub name: String,
    pub key: String,
}

// League client /lol-champ-select/v1/session, only the fields we read.
// championId is 0 until the player has hovered or locked a champion.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChampSelectSession {
    pub my_team: Vec<ChampSelectMember>,
    pub their_team: Vec<ChampSelectMember>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChampSelectMember {
    pub champion_id: u32,
}
