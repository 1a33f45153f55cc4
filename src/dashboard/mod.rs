//! Token dashboard: fetch, normalize, simulate history, render.
//!
//! Mounting issues the token-info and transaction fetches concurrently. Each
//! fetch owns its loading flag and flips it exactly once. Results are only
//! written while the mount that issued them is still current; unmounting or
//! remounting invalidates older fetches and aborts them.

use crate::api::TokenDataSource;
use crate::config::Config;
use crate::models::{TokenInfo, Transaction};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub mod chart;
pub mod history;
pub mod token_panel;
pub mod transactions;

pub use chart::{ChartGeometry, ChartRenderer, Point};
pub use history::{OsRandom, RandomSource, SeededRandom, SeriesSynthesizer};
pub use token_panel::TokenPanel;
pub use transactions::{TransactionRow, TransactionView, TransactionsPanel};

pub const LOADING_TOKEN: &str = "Loading token info...";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub token_loading: bool,
    pub token: Option<TokenInfo>,
    pub error: Option<String>,
    /// Simulated history for the current `token`.
    pub history: Vec<f64>,
    pub transactions_loading: bool,
    pub transactions: Vec<Transaction>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            token_loading: true,
            token: None,
            error: None,
            history: Vec::new(),
            transactions_loading: true,
            transactions: Vec::new(),
        }
    }
}

/// Everything a screen needs to draw the data sections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSections {
    pub token: TokenPanel,
    pub history: Vec<f64>,
    pub chart: ChartGeometry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub token_loading: bool,
    /// Page-level error; when set no data sections are rendered.
    pub error: Option<String>,
    pub sections: Option<DashboardSections>,
    pub transactions: TransactionsPanel,
}

impl DashboardView {
    pub fn render_text(&self) -> String {
        let mut out = String::from("$TRO Token Dashboard\n\n");
        if self.token_loading {
            out.push_str(LOADING_TOKEN);
            out.push('\n');
        }
        if let Some(err) = &self.error {
            out.push_str(&format!("Error: {}\n", err));
            return out;
        }
        if let Some(sections) = &self.sections {
            out.push_str(&sections.token.render_text());
            out.push_str("\nPrice History (Demo)\n");
            out.push_str(&sparkline(&sections.history));
            out.push_str(&format!(
                "\nLast {} days (simulated)\n",
                sections.history.len()
            ));
            out.push_str("\nRecent Transactions\n");
            out.push_str(&self.transactions.render_text());
            out.push('\n');
        }
        out
    }
}

/// Identifies one mount. Results carrying a stale token are dropped.
#[derive(Debug, Clone)]
pub struct MountToken {
    current: Arc<AtomicU64>,
    issued: u64,
}

impl MountToken {
    pub fn is_live(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.issued
    }
}

pub struct Dashboard {
    source: Arc<dyn TokenDataSource>,
    config: Arc<Config>,
    state: Arc<RwLock<DashboardState>>,
    generation: Arc<AtomicU64>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    rng: Arc<Mutex<Box<dyn RandomSource + Send>>>,
    synthesizer: SeriesSynthesizer,
    renderer: ChartRenderer,
    transaction_view: TransactionView,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("source", &format_args!("<TokenDataSource>"))
            .field("config", &self.config)
            .field("generation", &self.generation)
            .field("synthesizer", &self.synthesizer)
            .field("renderer", &self.renderer)
            .finish()
    }
}

impl Dashboard {
    pub fn new(source: Arc<dyn TokenDataSource>, config: Config) -> Self {
        Self::with_random(source, config, Box::new(OsRandom::new()))
    }

    pub fn with_random(
        source: Arc<dyn TokenDataSource>,
        config: Config,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        Self {
            synthesizer: SeriesSynthesizer::new(&config.history),
            renderer: ChartRenderer::new(&config.chart),
            transaction_view: TransactionView::new(config.explorer.web_base_url.clone()),
            source,
            config: Arc::new(config),
            state: Arc::new(RwLock::new(DashboardState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            tasks: Mutex::new(Vec::new()),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Starts both fetches without waiting for either. Must run inside a Tokio runtime.
    pub async fn mount(&self) -> MountToken {
        let token = {
            let mut state = self.state.write().await;
            let issued = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = DashboardState::default();
            MountToken {
                current: self.generation.clone(),
                issued,
            }
        };
        self.abort_tasks();

        let explorer = &self.config.explorer;
        info!("Mounting dashboard for {} (mount #{})", explorer.token_id, token.issued);

        let token_task = tokio::spawn(fetch_token_info(
            self.source.clone(),
            explorer.token_id.clone(),
            self.state.clone(),
            token.clone(),
            self.synthesizer.clone(),
            self.rng.clone(),
        ));
        let transactions_task = tokio::spawn(fetch_transactions(
            self.source.clone(),
            explorer.token_id.clone(),
            explorer.transactions_page_size,
            self.state.clone(),
            token.clone(),
        ));

        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.push(token_task);
            tasks.push(transactions_task);
        }
        token
    }

    /// Invalidates in-flight fetches so they can no longer touch the state.
    pub async fn unmount(&self) {
        {
            let _state = self.state.write().await;
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
        self.abort_tasks();
        info!("Dashboard unmounted");
    }

    /// Waits until every fetch of the current mount has finished.
    pub async fn settle(&self) {
        let tasks: Vec<JoinHandle<()>> = match self.tasks.lock() {
            Ok(mut tasks) => tasks.drain(..).collect(),
            Err(_) => return,
        };
        for task in tasks {
            if let Err(e) = task.await {
                debug!("Dashboard fetch task ended early: {}", e);
            }
        }
    }

    /// Mounts, waits for both fetches and returns the resulting view.
    pub async fn load(&self) -> DashboardView {
        self.mount().await;
        self.settle().await;
        self.view().await
    }

    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub async fn view(&self) -> DashboardView {
        let state = self.state.read().await;
        let web_url = &self.config.explorer.web_base_url;

        let sections = match (&state.error, &state.token) {
            (None, Some(info)) => Some(DashboardSections {
                token: TokenPanel::new(info, web_url),
                history: state.history.clone(),
                chart: self.renderer.render(&state.history),
            }),
            _ => None,
        };

        DashboardView {
            token_loading: state.token_loading,
            error: state.error.clone(),
            sections,
            transactions: self
                .transaction_view
                .panel(state.transactions_loading, &state.transactions),
        }
    }

    fn abort_tasks(&self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_tasks();
    }
}

async fn fetch_token_info(
    source: Arc<dyn TokenDataSource>,
    token_id: String,
    state: Arc<RwLock<DashboardState>>,
    token: MountToken,
    synthesizer: SeriesSynthesizer,
    rng: Arc<Mutex<Box<dyn RandomSource + Send>>>,
) {
    let result = source.fetch_token_info(&token_id).await;

    let mut state = state.write().await;
    if !token.is_live() {
        debug!("Discarding token info for {} from a stale mount", token_id);
        return;
    }

    match result {
        Ok(info) => {
            let history = match rng.lock() {
                Ok(mut rng) => synthesizer.synthesize(info.effective_price(), rng.as_mut()),
                Err(_) => {
                    warn!("Random source poisoned, using a flat history");
                    vec![info.effective_price().max(synthesizer.floor()); synthesizer.length()]
                }
            };
            info!("Token info ready for {}", info.identifier);
            state.history = history;
            state.token = Some(info);
            state.error = None;
        }
        Err(e) => {
            error!("Token info fetch failed for {}: {}", token_id, e);
            state.token = None;
            state.history.clear();
            state.error = Some(e.user_message());
        }
    }
    state.token_loading = false;
}

async fn fetch_transactions(
    source: Arc<dyn TokenDataSource>,
    token_id: String,
    size: usize,
    state: Arc<RwLock<DashboardState>>,
    token: MountToken,
) {
    let result = source.fetch_transactions(&token_id, size).await;

    let mut state = state.write().await;
    if !token.is_live() {
        debug!("Discarding transactions for {} from a stale mount", token_id);
        return;
    }

    state.transactions = match result {
        Ok(mut transactions) => {
            transactions.truncate(size);
            transactions
        }
        Err(e) => {
            warn!("Transactions unavailable for {}, showing none: {}", token_id, e);
            Vec::new()
        }
    };
    state.transactions_loading = false;
}

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block character per value, scaled to the series' own range.
pub fn sparkline(values: &[f64]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    values
        .iter()
        .map(|v| {
            let level = (((v - min) / span) * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}
