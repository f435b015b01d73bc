use crate::config::Config;
use crate::error::AppError;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::{debug, warn};
use std::io::Read;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

const PACING_TICK: Duration = Duration::from_millis(50);

const HEADERS: &[(&str, &str)] = &[
    ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("DNT", "1"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// Anything that can turn a URL into page text.
pub trait Fetcher {
    fn fetch(&self, url: &str, referer: &str) -> Result<String, AppError>;
}

pub struct HttpFetcher {
    agent: ureq::Agent,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build();

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        HttpFetcher {
            agent,
            rate_limiter,
        }
    }

    fn wait_for_slot(&self) {
        while self.rate_limiter.check().is_err() {
            thread::sleep(PACING_TICK);
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, referer: &str) -> Result<String, AppError> {
        self.wait_for_slot();
        debug!("GET {}", url);

        let mut request = self.agent.get(url).set("Referer", referer);
        for (name, value) in HEADERS {
            request = request.set(name, value);
        }

        match request.call() {
            Ok(resp) => {
                // into_string() caps bodies at 10MB; SSR pages can be larger
                let mut body = String::new();
                resp.into_reader()
                    .read_to_string(&mut body)
                    .map_err(|e| AppError::Transport(format!("{}: {}", url, e)))?;
                Ok(body)
            }
            Err(ureq::Error::Status(code, _)) => {
                warn!("{} answered HTTP {}", url, code);
                Err(AppError::Transport(format!("HTTP {} from {}", code, url)))
            }
            Err(e) => Err(AppError::Transport(e.to_string())),
        }
    }
}
