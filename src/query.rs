//! Ties fetching, caching, extraction and normalization together for one
//! CLI invocation. Requests run one after another on the calling thread.

use crate::analysis::normalizer::{normalize, normalize_named, MatchupTable};
use crate::analysis::scorer::{
    select_meta_champions, suggest_bans, BanSuggestion, BlindPickReport, BlindPickSamples,
    MetaChampion,
};
use crate::api::client::Fetcher;
use crate::api::sources::{Role, Source, SourceChoice};
use crate::cache::{cache_key, Cache};
use crate::champions::{resolve, ChampionRef};
use crate::config::Config;
use crate::error::{AppError, SourceFailure};
use crate::extract::embedded::extract;
use crate::extract::navigator::{next_data_counters, SchemaNavigator};
use crate::pool::ChampionPool;
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

/// One counter page and the cache slot it belongs to.
#[derive(Debug)]
pub struct Page {
    pub key: String,
    pub html: String,
    pub downloaded: bool,
}

pub struct CounterService<F: Fetcher, C: Cache> {
    fetcher: F,
    cache: C,
    config: Config,
    refresh: bool,
    show_progress: bool,
}

impl<F: Fetcher, C: Cache> CounterService<F, C> {
    pub fn new(fetcher: F, cache: C, config: Config) -> Self {
        CounterService {
            fetcher,
            cache,
            config,
            refresh: false,
            show_progress: false,
        }
    }

    /// Skip cache reads; fresh pages that extract are still written back.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Page text for one source, from the cache when fresh. Downloads are
    /// not stored here; [`Self::matchups_from`] stores them once the page
    /// state extracts, so a challenge or maintenance page is never cached.
    pub fn document(&mut self, source: Source, champion: &ChampionRef, role: Role) -> Result<Page, AppError> {
        let key = cache_key(source.id(), &champion.slug, role.ugg());

        if !self.refresh {
            if let Some(html) = self.cache.get(&key) {
                debug!("cache hit for {} {} on {}", champion.name, role, source);
                return Ok(Page { key, html, downloaded: false });
            }
        }

        let url = source.counter_url(&champion.slug, role, &self.config.rank);
        info!("fetching {}", url);
        let html = self.fetcher.fetch(&url, source.referer())?;

        Ok(Page { key, html, downloaded: true })
    }

    /// Matchup table for `champion` as seen on one site.
    pub fn matchups_from(&mut self, source: Source, champion: &ChampionRef, role: Role) -> Result<MatchupTable, AppError> {
        let page = self.document(source, champion, role)?;
        let tree = extract(&page.html, source.marker())?;

        if page.downloaded {
            if let Err(e) = self.cache.put(&page.key, &page.html) {
                warn!("could not cache {} page for {}: {}", source, champion.name, e);
            }
        }

        let table = match source {
            Source::Ugg => {
                let navigator = SchemaNavigator::new(&tree)?;
                let names = navigator.champion_name_map().unwrap_or_else(|e| {
                    warn!("{}; opponents will show as #<id>", e);
                    HashMap::new()
                });
                let counters = navigator.role_matchups(&self.config.rank_tier(), role.ugg())?;
                normalize(counters, &names)
            }
            Source::Lolalytics => normalize_named(next_data_counters(&tree)?),
        };

        if table.is_empty() {
            return Err(AppError::Schema(format!(
                "{} lists no usable matchups for {} {}",
                source, champion.name, role
            )));
        }

        Ok(table)
    }

    /// Try each source in turn until one delivers.
    pub fn matchups(&mut self, champion: &ChampionRef, role: Role, choice: SourceChoice) -> Result<MatchupTable, AppError> {
        let mut failures = Vec::new();

        for (attempt, &source) in choice.order().iter().enumerate() {
            if attempt > 0 {
                thread::sleep(Duration::from_millis(self.config.source_delay_ms));
            }

            match self.matchups_from(source, champion, role) {
                Ok(table) => return Ok(table),
                Err(e) => {
                    warn!("{} failed for {}: {}", source, champion.name, e);
                    failures.push(SourceFailure::new(source.id(), e));
                }
            }
        }

        Err(AppError::AllSourcesFailed(failures))
    }

    /// Popular champions for `role`, read off the reference champion's page.
    pub fn meta_champions(&mut self, role: Role, count: usize, choice: SourceChoice) -> Result<Vec<MetaChampion>, AppError> {
        let reference = resolve(&self.config.meta_reference);
        let table = self.matchups(&reference, role, choice)?;
        Ok(select_meta_champions(&table, count))
    }

    /// Enemies worth banning when you play `main`. Role pick rates come from
    /// the meta reference page; if it cannot be loaded the pick rates on
    /// `main`'s own page are used instead.
    pub fn ban_suggestions(&mut self, main: &ChampionRef, role: Role, count: usize, choice: SourceChoice) -> Result<Vec<BanSuggestion>, AppError> {
        let table = self.matchups(main, role, choice)?;

        let reference = resolve(&self.config.meta_reference);
        let pick_rates: HashMap<String, f64> = match self.matchups(&reference, role, choice) {
            Ok(meta) => meta
                .into_iter()
                .map(|(name, record)| (name, record.pick_rate))
                .collect(),
            Err(e) => {
                warn!("no meta pick rates for {}: {}", role, e);
                HashMap::new()
            }
        };

        Ok(suggest_bans(&table, &pick_rates, count))
    }

    /// Rank pool champions against the meta. A meta champion whose data
    /// cannot be fetched is skipped and reported in `failures`.
    pub fn blind_pick(&mut self, pool: &ChampionPool, role: Role, count: usize, choice: SourceChoice) -> Result<BlindPickReport, AppError> {
        let meta = self.meta_champions(role, count, choice)?;

        let pb = if self.show_progress {
            ProgressBar::new(meta.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_message("Fetching meta matchups");

        let mut samples = BlindPickSamples::new();
        let mut failures = Vec::new();

        for champ in &meta {
            let champion = resolve(&champ.name);
            match self.matchups(&champion, role, choice) {
                Ok(table) => samples.add_table(&table, Some(pool)),
                Err(e) => {
                    warn!("skipping meta champion {}: {}", champion.name, e);
                    failures.push(SourceFailure::new(champion.name.clone(), e));
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();

        if samples.is_empty() {
            info!("no pool champion appears in any meta matchup table");
        }

        Ok(BlindPickReport {
            best: samples.best_blind_pick(),
            safest: samples.safest_blind_pick(),
            meta,
            failures,
        })
    }
}
