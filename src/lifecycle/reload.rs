//! Atomic router publication and hot reload.
//!
//! # Responsibilities
//! - Hold the live `Router` behind an `ArcSwap`
//! - Compile new configurations off to the side and publish them in
//!   one pointer swap
//! - Serve hot-path lookups from the current snapshot
//! - Consume watcher updates until shutdown
//!
//! # Design Decisions
//! - Readers never lock; in-flight lookups finish on the snapshot they
//!   loaded even if a reload lands mid-request
//! - A configuration that fails to compile is never published
//! - Reload is all-or-nothing: routes and delays swap together
//! - Writers serialize on a mutex so a returned generation always
//!   names the router it published

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use tokio::sync::{broadcast, mpsc};

use crate::config::RawConfig;
use crate::observability::metrics;
use crate::routing::{CompileError, RouteDescriptor, Router};

/// The live routing state shared by every request handler.
#[derive(Debug)]
pub struct SharedRouter {
    current: ArcSwap<Router>,
    generation: AtomicU64,
    reload_lock: Mutex<()>,
}

impl SharedRouter {
    /// Publish an already compiled router as generation 1.
    pub fn new(router: Router) -> Self {
        metrics::record_table_sizes(router.routes().len(), router.delays().len());
        Self {
            current: ArcSwap::from_pointee(router),
            generation: AtomicU64::new(1),
            reload_lock: Mutex::new(()),
        }
    }

    /// Compile `config` and publish it as generation 1.
    pub fn from_config(config: &RawConfig) -> Result<Self, CompileError> {
        Ok(Self::new(Router::from_config(config)?))
    }

    /// Snapshot of the current router.
    ///
    /// The snapshot stays valid (and unchanged) across later reloads.
    pub fn load(&self) -> Arc<Router> {
        self.current.load_full()
    }

    /// Number of successful publications so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Compile `config` and, only if it compiles, swap it in.
    ///
    /// Returns the new generation number.
    pub fn reload(&self, config: &RawConfig) -> Result<u64, CompileError> {
        let started = Instant::now();
        let router = match Router::from_config(config) {
            Ok(router) => router,
            Err(e) => {
                metrics::record_reload(false);
                tracing::warn!(
                    error = %e,
                    "Rejected routing configuration; keeping current routes"
                );
                return Err(e);
            }
        };

        let (routes, delays) = (router.routes().len(), router.delays().len());
        let generation = {
            // Guards no data; a panicked writer leaves nothing half-done.
            let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.current.store(Arc::new(router));
            self.generation.fetch_add(1, Ordering::AcqRel) + 1
        };

        metrics::record_reload(true);
        metrics::record_table_sizes(routes, delays);
        tracing::info!(
            generation,
            routes,
            delays,
            elapsed = ?started.elapsed(),
            "Routing configuration published"
        );
        Ok(generation)
    }

    /// Upstream URL for `path`, or `None` when no route matches.
    pub fn route(&self, path: &str) -> Option<String> {
        let started = Instant::now();
        let url = self.current.load().route(path).into_url();
        metrics::record_lookup(url.is_some(), started);
        url
    }

    /// Every route matching `path`, cloned out of the current snapshot.
    pub fn find_routes(&self, path: &str) -> Vec<RouteDescriptor> {
        self.current
            .load()
            .find_routes(path)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Configured delay for `path`.
    pub fn delay_for(&self, path: &str) -> Duration {
        self.current.load().delays().find_delay_duration(path)
    }

    /// Sleep for the configured delay of `path`, if any.
    ///
    /// Returns the delay that was applied.
    pub async fn inject_delay(&self, path: &str) -> Duration {
        let delay = self.delay_for(path);
        if !delay.is_zero() {
            metrics::record_delay_injected(delay);
            tracing::debug!(path, delay = ?delay, "Injecting delay");
            tokio::time::sleep(delay).await;
        }
        delay
    }

    /// Apply configuration updates until shutdown or the sender closes.
    pub async fn run(
        self: Arc<Self>,
        mut updates: mpsc::UnboundedReceiver<RawConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                update = updates.recv() => match update {
                    Some(config) => {
                        // Rejections are logged in reload(); the old table keeps serving.
                        let _ = self.reload(&config);
                    }
                    None => {
                        tracing::debug!("Config update channel closed");
                        break;
                    }
                },
                _ = shutdown.recv() => {
                    tracing::info!("Reload loop stopping");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, ConfigFormat};

    fn config(yaml: &str) -> RawConfig {
        parse_config(yaml, ConfigFormat::Yaml).unwrap()
    }

    const V1: &str = r#"
paths:
  /api/**:
    target: v1:80
    pathRewrite:
      '^/api/': '/'
pathDelays:
  /api/slow: 5
"#;

    const V2: &str = r#"
paths:
  /api/**:
    target: v2:443
    secure: true
"#;

    #[test]
    fn test_reload_swaps_routes_and_delays() {
        let shared = SharedRouter::from_config(&config(V1)).unwrap();
        assert_eq!(shared.generation(), 1);
        assert_eq!(shared.route("/api/users").as_deref(), Some("http://v1:80/users"));
        assert_eq!(shared.delay_for("/api/slow"), Duration::from_millis(5));

        assert_eq!(shared.reload(&config(V2)).unwrap(), 2);
        assert_eq!(
            shared.route("/api/users").as_deref(),
            Some("https://v2:443/api/users")
        );
        assert_eq!(shared.delay_for("/api/slow"), Duration::ZERO);
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let shared = SharedRouter::from_config(&config(V1)).unwrap();
        let before = shared.load();
        shared.reload(&config(V2)).unwrap();

        assert_eq!(before.route("/api/x").url(), Some("http://v1:80/x"));
        assert_eq!(shared.load().route("/api/x").url(), Some("https://v2:443/api/x"));
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let shared = SharedRouter::from_config(&config(V1)).unwrap();
        let mut broken = config(V2);
        broken
            .paths
            .get_mut("/api/**")
            .unwrap()
            .path_rewrite
            .insert("^/api/(".into(), "/".into());

        assert!(shared.reload(&broken).is_err());
        assert_eq!(shared.generation(), 1);
        assert_eq!(shared.route("/api/users").as_deref(), Some("http://v1:80/users"));
    }

    #[test]
    fn test_find_routes_owned() {
        let shared = SharedRouter::new(Router::default());
        assert!(shared.find_routes("/x").is_empty());
        assert!(shared.route("/x").is_none());

        shared.reload(&config(V1)).unwrap();
        let found = shared.find_routes("/api/x");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target(), "v1:80");
    }

    #[test]
    fn test_concurrent_reloads_report_the_live_generation() {
        let shared = Arc::new(SharedRouter::new(Router::default()));

        let writers: Vec<_> = (0..8)
            .map(|writer| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    (0..25)
                        .map(|i| {
                            let target = format!("w{writer}-{i}:80");
                            let yaml = format!("paths:\n  /**:\n    target: {target}\n");
                            (shared.reload(&config(&yaml)).unwrap(), target)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut published: Vec<(u64, String)> = writers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect();
        published.sort();

        let generations: Vec<u64> = published.iter().map(|(g, _)| *g).collect();
        assert_eq!(generations, (2..=201).collect::<Vec<_>>());

        let (last_generation, last_target) = published.last().unwrap();
        assert_eq!(shared.generation(), *last_generation);
        assert_eq!(shared.route("/x"), Some(format!("http://{last_target}/x")));
    }

    #[tokio::test]
    async fn test_inject_delay() {
        let shared = SharedRouter::from_config(&config(V1)).unwrap();
        assert_eq!(shared.inject_delay("/api/fast").await, Duration::ZERO);

        let started = Instant::now();
        assert_eq!(shared.inject_delay("/api/slow").await, Duration::from_millis(5));
        assert!(started.elapsed() >= Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_run_applies_updates_until_closed() {
        let shared = Arc::new(SharedRouter::from_config(&config(V1)).unwrap());
        let (tx, rx) = mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let task = tokio::spawn(shared.clone().run(rx, shutdown_rx));
        tx.send(config(V2)).unwrap();
        drop(tx);
        task.await.unwrap();

        assert_eq!(shared.generation(), 2);
        assert_eq!(shared.route("/api/x").as_deref(), Some("https://v2:443/api/x"));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let shared = Arc::new(SharedRouter::new(Router::default()));
        let (_tx, rx) = mpsc::unbounded_channel::<RawConfig>();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let task = tokio::spawn(shared.clone().run(rx, shutdown_rx));
        shutdown_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), task).await.unwrap().unwrap();
        assert_eq!(shared.generation(), 1);
    }
}
