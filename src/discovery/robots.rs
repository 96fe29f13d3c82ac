// src/discovery/robots.rs
//! Per-host robots.txt cache plus the domain blocklist

use std::collections::HashMap;
use texting_robots::Robot;
use tracing::{debug, warn};

use super::fetcher::PageFetcher;
use crate::utils::{host_matches_domain, host_of};

enum RobotsRule {
    AllowAll,
    DisallowAll,
    Parsed(Robot),
}

impl RobotsRule {
    fn allows(&self, url: &str) -> bool {
        match self {
            RobotsRule::AllowAll => true,
            RobotsRule::DisallowAll => false,
            RobotsRule::Parsed(robot) => robot.allowed(url),
        }
    }
}

/// Lives for one crawl. Each host's robots.txt is fetched at most once and never refreshed.
pub struct RobotsCache {
    user_agent: String,
    blocked_domains: Vec<String>,
    rules: HashMap<String, RobotsRule>,
}

impl RobotsCache {
    pub fn new(user_agent: &str, blocked_domains: &[String]) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            blocked_domains: blocked_domains.iter().map(|d| d.to_lowercase()).collect(),
            rules: HashMap::new(),
        }
    }

    pub fn is_blocked_host(&self, host: &str) -> bool {
        self.blocked_domains
            .iter()
            .any(|domain| host_matches_domain(host, domain))
    }

    pub fn cached_hosts(&self) -> usize {
        self.rules.len()
    }

    /// Blocked domains and unparseable URLs are never fetchable
    pub async fn can_fetch(&mut self, fetcher: &dyn PageFetcher, url: &str) -> bool {
        let Some(host) = host_of(url) else {
            return false;
        };
        if self.is_blocked_host(&host) {
            return false;
        }

        if !self.rules.contains_key(&host) {
            let rule = self.load_rule(fetcher, &host).await;
            self.rules.insert(host.clone(), rule);
        }

        self.rules
            .get(&host)
            .map(|rule| rule.allows(url))
            .unwrap_or(false)
    }

    async fn load_rule(&self, fetcher: &dyn PageFetcher, host: &str) -> RobotsRule {
        let robots_url = format!("https://{}/robots.txt", host);

        let page = match fetcher.fetch(&robots_url).await {
            Ok(page) => page,
            Err(e) => {
                debug!("robots.txt unreachable for {}, allowing: {}", host, e);
                return RobotsRule::AllowAll;
            }
        };

        match page.status {
            401 | 403 => RobotsRule::DisallowAll,
            400..=499 => RobotsRule::AllowAll,
            500..=599 => RobotsRule::DisallowAll,
            _ => match Robot::new(&self.user_agent, page.body.as_bytes()) {
                Ok(robot) => RobotsRule::Parsed(robot),
                Err(e) => {
                    warn!("Unparseable robots.txt for {}, allowing: {}", host, e);
                    RobotsRule::AllowAll
                }
            },
        }
    }
}
