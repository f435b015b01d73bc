//! Live champion select from the running League client.
//!
//! The client serves a local HTTPS API on a random port with a self-signed
//! certificate. Port and password come from its lockfile, a single line of
//! `name:pid:port:password:protocol`.

use super::client::Fetcher;
use super::models::{ChampSelectMember, ChampSelectSession, DataDragonChampions};
use crate::config::Config;
use crate::error::AppError;
use crate::extract::navigator::ChampionId;
use base64::{engine::general_purpose, Engine};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const CHAMP_SELECT_PATH: &str = "/lol-champ-select/v1/session";
const DATA_DRAGON: &str = "https://ddragon.leagueoflegends.com";

#[derive(Debug, Clone, PartialEq)]
pub struct Lockfile {
    pub port: u16,
    pub password: String,
    pub protocol: String,
}

impl Lockfile {
    pub fn read(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::ClientUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, AppError> {
        let fields: Vec<&str> = content.trim().split(':').collect();
        if fields.len() < 4 {
            return Err(AppError::malformed(format!(
                "lockfile has {} fields, expected name:pid:port:password:protocol",
                fields.len()
            )));
        }

        let port = fields[2]
            .parse()
            .map_err(|_| AppError::malformed(format!("lockfile port '{}' is not a number", fields[2])))?;

        Ok(Lockfile {
            port,
            password: fields[3].to_string(),
            protocol: fields.get(4).copied().unwrap_or("https").to_string(),
        })
    }

    pub fn base_url(&self) -> String {
        format!("{}://127.0.0.1:{}", self.protocol, self.port)
    }

    pub fn authorization(&self) -> String {
        let token = general_purpose::STANDARD.encode(format!("riot:{}", self.password));
        format!("Basic {}", token)
    }
}

/// Champion ids hovered or locked on each side. Empty slots are left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChampSelectTeams {
    pub allies: Vec<ChampionId>,
    pub enemies: Vec<ChampionId>,
}

pub fn parse_session(body: &str) -> Result<ChampSelectTeams, AppError> {
    let session: ChampSelectSession =
        serde_json::from_str(body).map_err(|e| AppError::MalformedInput {
            reason: "champion select session is not valid JSON".to_string(),
            source: Some(e),
        })?;

    Ok(ChampSelectTeams {
        allies: picked(&session.my_team),
        enemies: picked(&session.their_team),
    })
}

fn picked(team: &[ChampSelectMember]) -> Vec<ChampionId> {
    team.iter()
        .map(|member| member.champion_id)
        .filter(|&id| id != 0)
        .collect()
}

pub struct LcuClient {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
}

impl LcuClient {
    /// Fails with `ClientUnavailable` when the lockfile is missing, which is
    /// the normal case when the client is not running.
    pub fn connect(config: &Config) -> Result<Self, AppError> {
        let lockfile = Lockfile::read(&config.lockfile_path)?;
        debug!("League client on port {}", lockfile.port);

        // the client's certificate is self-signed and only served on loopback
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| AppError::ClientUnavailable(format!("TLS setup failed: {}", e)))?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .tls_connector(Arc::new(tls))
            .build();

        Ok(LcuClient {
            agent,
            base_url: lockfile.base_url(),
            authorization: lockfile.authorization(),
        })
    }

    pub fn champ_select(&self) -> Result<ChampSelectTeams, AppError> {
        let url = format!("{}{}", self.base_url, CHAMP_SELECT_PATH);

        let response = self
            .agent
            .get(&url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json")
            .call();

        match response {
            Ok(resp) => {
                let body = resp
                    .into_string()
                    .map_err(|e| AppError::Transport(format!("{}: {}", url, e)))?;
                parse_session(&body)
            }
            Err(ureq::Error::Status(404, _)) => {
                Err(AppError::NotFound("no champion select in progress".to_string()))
            }
            Err(ureq::Error::Status(code, _)) => Err(AppError::Transport(format!(
                "HTTP {} from the League client",
                code
            ))),
            Err(e) => Err(AppError::ClientUnavailable(e.to_string())),
        }
    }
}

/// Champion id -> display name from the latest Data Dragon release.
pub fn champion_names<F: Fetcher>(fetcher: &F) -> Result<HashMap<ChampionId, String>, AppError> {
    let referer = format!("{}/", DATA_DRAGON);

    let versions = fetcher.fetch(&format!("{}/api/versions.json", DATA_DRAGON), &referer)?;
    let versions: Vec<String> = serde_json::from_str(&versions).map_err(|e| AppError::MalformedInput {
        reason: "Data Dragon versions list".to_string(),
        source: Some(e),
    })?;
    let latest = versions
        .first()
        .ok_or_else(|| AppError::NotFound("Data Dragon lists no versions".to_string()))?;
    info!("using Data Dragon {}", latest);

    let url = format!("{}/cdn/{}/data/en_US/champion.json", DATA_DRAGON, latest);
    let body = fetcher.fetch(&url, &referer)?;
    let champions: DataDragonChampions = serde_json::from_str(&body).map_err(|e| AppError::MalformedInput {
        reason: "Data Dragon champion.json".to_string(),
        source: Some(e),
    })?;

    Ok(champions
        .data
        .into_values()
        .filter_map(|champ| Some((champ.key.parse().ok()?, champ.name)))
        .collect())
}

/// Display names for `ids`, with `#<id>` for anything the map lacks.
pub fn name_team(ids: &[ChampionId], names: &HashMap<ChampionId, String>) -> Vec<String> {
    ids.iter()
        .map(|id| names.get(id).cloned().unwrap_or_else(|| format!("#{}", id)))
        .collect()
}
