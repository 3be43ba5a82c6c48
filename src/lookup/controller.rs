//! `LookupController` drives one presentation area through lookups.
//!
//! ```text
//! Idle ──lookup──▶ Loading ──ok──▶ Rendered
//!                     │
//!                     └──err──▶ Failed
//! Rendered | Failed ──lookup──▶ Loading
//! ```
//!
//! Lookups may overlap. Each one takes a sequence number when it starts and
//! only the latest is allowed to present anything; an older result that
//! arrives later is dropped as [`LookupOutcome::Stale`].
//!
//! A failed fetch is final unless a [`RetryPolicy`] is set; retries stop as
//! soon as the lookup is superseded.

use super::form::{InputEvent, LookupForm};
use super::retry::RetryPolicy;
use super::DatasetSource;
use crate::chart::{ChartOptions, ChartPresenter, Theme};
use crate::domain::dataset::{normalize, Partitioner, RawDataset};
use crate::error::FetchError;
use crate::shared::LookupKey;

use async_lock::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counts for the chart currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub key: LookupKey,
    pub buy: usize,
    pub sell: usize,
    pub rejected: usize,
    /// First and last timestamp of the dataset, if it was non-empty.
    pub time_range: Option<(i64, i64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Idle,
    Loading { seq: u64, key: LookupKey },
    Rendered(RenderSummary),
    Failed { key: Option<LookupKey>, message: String },
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading { .. })
    }
}

/// What happened to one `lookup` call.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Rendered(RenderSummary),
    /// The message that was presented.
    Failed(String),
    /// Superseded by a newer lookup; nothing was presented.
    Stale,
}

pub struct LookupController<S, P> {
    source: S,
    presenter: Mutex<P>,
    state: Mutex<LookupState>,
    seq: AtomicU64,
    theme: Theme,
    partitioner: Partitioner,
    retry: RetryPolicy,
}

impl<S: DatasetSource, P: ChartPresenter> LookupController<S, P> {
    pub fn new(source: S, presenter: P) -> Self {
        Self {
            source,
            presenter: Mutex::new(presenter),
            state: Mutex::new(LookupState::Idle),
            seq: AtomicU64::new(0),
            theme: Theme::dark(),
            partitioner: Partitioner::new(),
            retry: RetryPolicy::None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_partitioner(mut self, partitioner: Partitioner) -> Self {
        self.partitioner = partitioner;
        self
    }

    /// Repeat failed fetches per `retry`. Off by default.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn state(&self) -> LookupState {
        self.state.lock().await.clone()
    }

    /// Sequence number of the most recent lookup (0 before the first).
    pub fn latest_seq(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_presenter(self) -> P {
        self.presenter.into_inner()
    }

    /// Run a lookup if `event` is one that starts one.
    pub async fn handle_event(
        &self,
        form: &LookupForm,
        event: &InputEvent,
    ) -> Option<LookupOutcome> {
        if !LookupForm::triggers(event) {
            return None;
        }
        Some(self.lookup(form).await)
    }

    /// Validate `form` and run a lookup for it.
    ///
    /// Invalid input is a failed lookup: it still supersedes anything in flight.
    pub async fn lookup(&self, form: &LookupForm) -> LookupOutcome {
        let seq = self.next_seq();
        match form.key() {
            Ok(key) => self.run(seq, key).await,
            Err(e) => {
                tracing::debug!(seq, error = %e, "Rejected lookup input");
                self.fail(seq, None, e.to_string()).await
            }
        }
    }

    /// Run a lookup for an already validated key.
    pub async fn lookup_key(&self, key: LookupKey) -> LookupOutcome {
        let seq = self.next_seq();
        self.run(seq, key).await
    }

    // ── Internal ─────────────────────────────────────────────────────────

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }

    async fn run(&self, seq: u64, key: LookupKey) -> LookupOutcome {
        {
            let mut state = self.state.lock().await;
            if !self.is_current(seq) {
                return LookupOutcome::Stale;
            }
            tracing::info!(seq, %key, "Looking up dataset");
            *state = LookupState::Loading {
                seq,
                key: key.clone(),
            };
            self.presenter.lock().await.show_loading(&key);
        }

        match self.fetch(seq, &key).await {
            Ok(raw) => self.render(seq, key, raw).await,
            Err(e) => {
                if !self.is_current(seq) {
                    tracing::debug!(seq, %key, "Discarding superseded failure");
                    return LookupOutcome::Stale;
                }
                tracing::info!(seq, %key, error = %e, "Dataset lookup failed");
                self.fail(seq, Some(key), e.to_string()).await
            }
        }
    }

    async fn fetch(&self, seq: u64, key: &LookupKey) -> Result<RawDataset, FetchError> {
        let config = match self.retry.config() {
            None => return self.source.fetch_dataset(key).await,
            Some(c) => c,
        };

        let mut attempt = 0;
        loop {
            let err = match self.source.fetch_dataset(key).await {
                Ok(raw) => return Ok(raw),
                Err(e) => e,
            };
            if attempt >= config.max_retries || !config.should_retry(&err) {
                return Err(err);
            }

            let delay = config.delay_for_attempt(attempt);
            tracing::debug!(
                seq,
                %key,
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Retrying dataset lookup"
            );
            futures_timer::Delay::new(delay).await;
            if !self.is_current(seq) {
                return Err(err);
            }
            attempt += 1;
        }
    }

    async fn render(&self, seq: u64, key: LookupKey, raw: RawDataset) -> LookupOutcome {
        {
            let _state = self.state.lock().await;
            if !self.is_current(seq) {
                tracing::debug!(seq, %key, "Discarding superseded dataset");
                return LookupOutcome::Stale;
            }
            self.presenter.lock().await.show_rendering(&key);
        }

        // Let the host paint the rendering indicator before the draw.
        futures_timer::Delay::new(Duration::ZERO).await;

        let dataset = normalize(raw);
        let parts = self.partitioner.partition(&dataset);
        let summary = RenderSummary {
            key,
            buy: parts.buy.len(),
            sell: parts.sell.len(),
            rejected: parts.rejected_count(),
            time_range: dataset.time_range(),
        };
        let options = ChartOptions::for_dataset(&summary.key.pair, &parts, self.theme.clone());

        let mut state = self.state.lock().await;
        if !self.is_current(seq) {
            tracing::debug!(seq, key = %summary.key, "Discarding superseded dataset");
            return LookupOutcome::Stale;
        }
        self.presenter.lock().await.draw(options);
        tracing::info!(
            seq,
            key = %summary.key,
            buy = summary.buy,
            sell = summary.sell,
            rejected = summary.rejected,
            "Dataset rendered"
        );
        *state = LookupState::Rendered(summary.clone());
        LookupOutcome::Rendered(summary)
    }

    async fn fail(&self, seq: u64, key: Option<LookupKey>, message: String) -> LookupOutcome {
        let mut state = self.state.lock().await;
        if !self.is_current(seq) {
            return LookupOutcome::Stale;
        }
        self.presenter.lock().await.show_error(&message);
        *state = LookupState::Failed {
            key,
            message: message.clone(),
        };
        LookupOutcome::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::TradeRecord;
    use crate::lookup::form::{DateField, InputField};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Loading(String),
        Rendering(String),
        Error(String),
        Draw(ChartOptions),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl ChartPresenter for Recorder {
        fn show_loading(&mut self, key: &LookupKey) {
            self.calls.push(Call::Loading(key.to_string()));
        }

        fn show_rendering(&mut self, key: &LookupKey) {
            self.calls.push(Call::Rendering(key.to_string()));
        }

        fn show_error(&mut self, message: &str) {
            self.calls.push(Call::Error(message.to_string()));
        }

        fn draw(&mut self, options: ChartOptions) {
            self.calls.push(Call::Draw(options));
        }
    }

    /// Canned responses per pair.
    #[derive(Default)]
    struct Canned {
        responses: HashMap<String, Result<Vec<TradeRecord>, (u16, String)>>,
    }

    impl Canned {
        fn ok(mut self, pair: &str, records: Vec<TradeRecord>) -> Self {
            self.responses.insert(pair.to_string(), Ok(records));
            self
        }

        fn err(mut self, pair: &str, status: u16, message: &str) -> Self {
            self.responses
                .insert(pair.to_string(), Err((status, message.to_string())));
            self
        }
    }

    impl DatasetSource for Canned {
        async fn fetch_dataset(&self, key: &LookupKey) -> Result<RawDataset, FetchError> {
            match self.responses.get(key.pair.as_str()) {
                Some(Ok(records)) => Ok(RawDataset(records.clone())),
                Some(Err((status, message))) => Err(FetchError::Server {
                    status: *status,
                    message: message.clone(),
                }),
                None => Err(FetchError::Decode("no canned response".to_string())),
            }
        }
    }

    fn form(pair: &str) -> LookupForm {
        let today = NaiveDate::from_ymd_opt(2022, 9, 14).unwrap();
        LookupForm::new("binance", pair, DateField::new(today))
    }

    fn worked_example() -> Vec<TradeRecord> {
        vec![
            TradeRecord::new(3, 10.0, "sell"),
            TradeRecord::new(1, 9.0, "buy"),
            TradeRecord::new(2, 9.5, "buy"),
            TradeRecord::new(1, 8.0, "sell"),
        ]
    }

    #[test]
    fn test_rendered_lookup() {
        let source = Canned::default().ok("BTC-USDT", worked_example());
        let controller = LookupController::new(source, Recorder::default());

        let outcome = tokio_test::block_on(controller.lookup(&form("BTC-USDT")));
        let LookupOutcome::Rendered(summary) = outcome else {
            panic!("expected a rendered outcome, got {outcome:?}");
        };
        assert_eq!((summary.buy, summary.sell, summary.rejected), (2, 2, 0));
        assert_eq!(summary.time_range, Some((1, 3)));
        assert_eq!(
            tokio_test::block_on(controller.state()),
            LookupState::Rendered(summary)
        );

        let calls = controller.into_presenter().calls;
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], Call::Loading("binance/BTC-USDT/2022-09-13".to_string()));
        assert_eq!(calls[1], Call::Rendering("binance/BTC-USDT/2022-09-13".to_string()));
        let Call::Draw(options) = &calls[2] else {
            panic!("expected a draw, got {:?}", calls[2]);
        };
        assert_eq!(options.series_named("buy").unwrap().data, vec![(1, 9.0), (2, 9.5)]);
        assert_eq!(options.series_named("sell").unwrap().data, vec![(1, 8.0), (3, 10.0)]);
        assert_eq!(options.theme, Theme::dark());
    }

    #[test]
    fn test_server_error_presented_verbatim() {
        let source = Canned::default().err("NOPE", 404, "no data");
        let controller = LookupController::new(source, Recorder::default());

        let outcome = tokio_test::block_on(controller.lookup(&form("NOPE")));
        assert_eq!(outcome, LookupOutcome::Failed("no data".to_string()));
        assert!(matches!(
            tokio_test::block_on(controller.state()),
            LookupState::Failed { key: Some(_), ref message } if message == "no data"
        ));

        let calls = controller.into_presenter().calls;
        assert_eq!(
            calls,
            vec![
                Call::Loading("binance/NOPE/2022-09-13".to_string()),
                Call::Error("no data".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_input_fails_without_fetch() {
        let controller = LookupController::new(Canned::default(), Recorder::default());

        let outcome = tokio_test::block_on(controller.lookup(&form("")));
        assert_eq!(outcome, LookupOutcome::Failed("pair must not be empty".to_string()));
        assert_eq!(controller.latest_seq(), 1);
        assert_eq!(
            controller.into_presenter().calls,
            vec![Call::Error("pair must not be empty".to_string())]
        );
    }

    #[test]
    fn test_rejected_records_counted() {
        let mut records = worked_example();
        records.push(TradeRecord::new(4, 11.0, "hold"));
        let source = Canned::default().ok("BTC-USDT", records);
        let controller = LookupController::new(source, Recorder::default());

        let outcome = tokio_test::block_on(controller.lookup(&form("BTC-USDT")));
        assert!(matches!(
            outcome,
            LookupOutcome::Rendered(RenderSummary { buy: 2, sell: 2, rejected: 1, .. })
        ));
    }

    #[test]
    fn test_strict_partitioner() {
        let records = vec![
            TradeRecord::new(1, 9.0, "buy"),
            TradeRecord::new(2, f64::NAN, "sell"),
        ];
        let source = Canned::default().ok("BTC-USDT", records);
        let controller = LookupController::new(source, Recorder::default())
            .with_partitioner(Partitioner::strict());

        let outcome = tokio_test::block_on(controller.lookup(&form("BTC-USDT")));
        assert!(matches!(
            outcome,
            LookupOutcome::Rendered(RenderSummary { buy: 1, sell: 0, rejected: 1, .. })
        ));
    }

    #[test]
    fn test_handle_event_ignores_other_keys() {
        let source = Canned::default().ok("BTC-USDT", worked_example());
        let controller = LookupController::new(source, Recorder::default());
        let form = form("BTC-USDT");

        let ignored = InputEvent::key_up(InputField::Pair, "x");
        assert_eq!(tokio_test::block_on(controller.handle_event(&form, &ignored)), None);
        assert_eq!(tokio_test::block_on(controller.state()), LookupState::Idle);

        let enter = InputEvent::key_up(InputField::Date, "Enter");
        assert!(matches!(
            tokio_test::block_on(controller.handle_event(&form, &enter)),
            Some(LookupOutcome::Rendered(_))
        ));
    }

    #[test]
    fn test_sequence_increments_per_lookup() {
        let source = Canned::default()
            .ok("BTC-USDT", worked_example())
            .err("NOPE", 404, "no data");
        let controller = LookupController::new(source, Recorder::default());

        tokio_test::block_on(controller.lookup(&form("BTC-USDT")));
        tokio_test::block_on(controller.lookup(&form("NOPE")));
        assert_eq!(controller.latest_seq(), 2);
        assert!(matches!(
            tokio_test::block_on(controller.state()),
            LookupState::Failed { .. }
        ));
    }

    /// Fails with `status` for the first `failures` calls, then succeeds.
    struct Flaky {
        failures: u32,
        status: u16,
        calls: std::cell::Cell<u32>,
    }

    impl Flaky {
        fn new(failures: u32, status: u16) -> Self {
            Self {
                failures,
                status,
                calls: std::cell::Cell::new(0),
            }
        }
    }

    impl DatasetSource for Flaky {
        async fn fetch_dataset(&self, _key: &LookupKey) -> Result<RawDataset, FetchError> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call <= self.failures {
                return Err(FetchError::Server {
                    status: self.status,
                    message: "busy".to_string(),
                });
            }
            Ok(RawDataset(worked_example()))
        }
    }

    fn fast_retry(max_retries: u32) -> RetryPolicy {
        RetryPolicy::Custom(crate::lookup::RetryConfig {
            max_retries,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_factor: 2.0,
            jitter: false,
            retryable_statuses: vec![503],
        })
    }

    #[test]
    fn test_single_fetch_without_retry() {
        let controller = LookupController::new(Flaky::new(1, 503), Recorder::default());

        let outcome = tokio_test::block_on(controller.lookup(&form("BTC-USDT")));
        assert_eq!(outcome, LookupOutcome::Failed("busy".to_string()));
        assert_eq!(controller.source().calls.get(), 1);
    }

    #[test]
    fn test_retry_recovers_from_retryable_status() {
        let controller = LookupController::new(Flaky::new(2, 503), Recorder::default())
            .with_retry(fast_retry(2));

        let outcome = tokio_test::block_on(controller.lookup(&form("BTC-USDT")));
        assert!(matches!(outcome, LookupOutcome::Rendered(_)));
        assert_eq!(controller.source().calls.get(), 3);
        let calls = controller.into_presenter().calls;
        assert!(!calls.iter().any(|c| matches!(c, Call::Error(_))));
    }

    #[test]
    fn test_retry_gives_up_with_last_error() {
        let controller = LookupController::new(Flaky::new(5, 503), Recorder::default())
            .with_retry(fast_retry(2));

        let outcome = tokio_test::block_on(controller.lookup(&form("BTC-USDT")));
        assert_eq!(outcome, LookupOutcome::Failed("busy".to_string()));
        assert_eq!(controller.source().calls.get(), 3);
    }

    #[test]
    fn test_retry_skips_final_statuses() {
        let controller = LookupController::new(Flaky::new(1, 404), Recorder::default())
            .with_retry(fast_retry(2));

        let outcome = tokio_test::block_on(controller.lookup(&form("BTC-USDT")));
        assert_eq!(outcome, LookupOutcome::Failed("busy".to_string()));
        assert_eq!(controller.source().calls.get(), 1);
    }
}
