use std::collections::BTreeMap;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use chrono::Local;
use stargazer_core::{update, Effect, FeedAdapter, FeedKind, FeedPhase, FeedView, Msg};
use stargazer_engine::{GatewaySettings, ReqwestGateway};
use stargazer_logging::{parse_level, sg_debug, sg_info};

use super::cli::Cli;
use super::config::{AppConfig, ConfigOrigin, API_KEY_ENV};
use super::effects::EffectRunner;
use super::{logging, ui};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Slack on top of the gateway timeouts before the run is abandoned.
const DEADLINE_SLACK: Duration = Duration::from_secs(5);

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let (config, origin) = AppConfig::load(&cli.config)?;
    let config = config.with_overrides(
        std::env::var(API_KEY_ENV).ok(),
        cli.api_key.clone(),
        cli.log_level.clone(),
    );
    logging::initialize(config.log.destination, parse_level(&config.log.level));
    match origin {
        ConfigOrigin::File => sg_info!("Loaded config from {:?}", cli.config),
        ConfigOrigin::Defaults => sg_debug!("No config at {:?}; using defaults", cli.config),
    }

    let settings = config.gateway_settings();
    let deadline = run_deadline(&settings);
    let gateway = ReqwestGateway::new(settings).context("building HTTP client")?;
    let runner = EffectRunner::new(Arc::new(gateway)).context("starting engine")?;

    let params = cli.command.feed_params(Local::now().date_naive());
    let mut screen = Screen::default();
    for p in params {
        let effects = screen.dispatch(p.kind(), Msg::ParamsChanged(p));
        runner.enqueue(effects);
    }

    if screen.any_loading() {
        eprintln!("{}", ui::constants::LOADING_TEXT);
    }

    let started = Instant::now();
    while screen.any_loading() {
        if started.elapsed() > deadline {
            bail!("no response from the API within {}s", deadline.as_secs());
        }
        if let Some((feed, msg)) = runner.poll(POLL_INTERVAL) {
            let effects = screen.dispatch(feed, msg);
            runner.enqueue(effects);
        }
    }

    let views = screen.views();
    let failed = views.iter().any(|view| view.phase == FeedPhase::Failed);
    let panels: Vec<String> = views
        .iter()
        .map(|view| ui::render::render(view, cli.json))
        .collect();
    println!("{}", panels.join("\n"));

    sg_info!("Run finished; failed={}", failed);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_deadline(settings: &GatewaySettings) -> Duration {
    settings.connect_timeout + settings.request_timeout + DEADLINE_SLACK
}

/// Adapters shown on one screen, kept in the order they were first used.
#[derive(Default)]
struct Screen {
    adapters: BTreeMap<FeedKind, FeedAdapter>,
    order: Vec<FeedKind>,
}

impl Screen {
    fn dispatch(&mut self, feed: FeedKind, msg: Msg) -> Vec<Effect> {
        if !self.adapters.contains_key(&feed) {
            self.order.push(feed);
        }
        let adapter = self
            .adapters
            .remove(&feed)
            .unwrap_or_else(|| FeedAdapter::new(feed));
        let (adapter, effects) = update(adapter, msg);
        sg_debug!("{} now {:?}", feed, adapter.view().phase);
        self.adapters.insert(feed, adapter);
        effects
    }

    fn any_loading(&self) -> bool {
        self.adapters.values().any(FeedAdapter::is_loading)
    }

    /// Views in display order; marks each adapter clean.
    fn views(&mut self) -> Vec<FeedView> {
        let mut views = Vec::with_capacity(self.order.len());
        for kind in &self.order {
            if let Some(adapter) = self.adapters.get_mut(kind) {
                adapter.consume_dirty();
                views.push(adapter.view());
            }
        }
        views
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stargazer_core::FeedParams;

    fn fetch_tag(effects: &[Effect]) -> u64 {
        match effects {
            [Effect::Fetch { tag, .. }] => *tag,
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    #[test]
    fn screen_keeps_first_use_order() {
        let mut screen = Screen::default();
        screen.dispatch(
            FeedKind::NeoFeed,
            Msg::ParamsChanged(FeedParams::NeoFeed {
                start_date: "2024-01-01".into(),
                end_date: "2024-01-02".into(),
            }),
        );
        screen.dispatch(
            FeedKind::Apod,
            Msg::ParamsChanged(FeedParams::Apod { date: None }),
        );

        let kinds: Vec<_> = screen.views().iter().map(|v| v.feed).collect();
        assert_eq!(kinds, vec![FeedKind::NeoFeed, FeedKind::Apod]);
    }

    #[test]
    fn screen_stops_loading_once_resolved() {
        let mut screen = Screen::default();
        let effects = screen.dispatch(
            FeedKind::Apod,
            Msg::ParamsChanged(FeedParams::Apod { date: None }),
        );
        assert!(screen.any_loading());

        let tag = fetch_tag(&effects);
        screen.dispatch(
            FeedKind::Apod,
            Msg::Resolved {
                tag,
                result: Ok(json!({ "title": "t", "url": "u" })),
            },
        );
        assert!(!screen.any_loading());

        let views = screen.views();
        assert_eq!(views[0].phase, FeedPhase::Success);
        assert!(!views[0].dirty);
    }

    #[test]
    fn deadline_covers_both_timeouts() {
        let settings = GatewaySettings {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(3),
            ..GatewaySettings::default()
        };
        assert_eq!(run_deadline(&settings), Duration::from_secs(10));
    }
}
