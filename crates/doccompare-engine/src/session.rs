//! Comparison session orchestrator with boundary logging.
//!
//! A [`ComparisonSession`] runs one comparison at a time. Starting a new
//! comparison bumps a generation counter; work belonging to an older
//! generation keeps running to completion but is never published, and its
//! caller gets `Superseded`.
//!
//! ## Logging Ownership
//!
//! The session owns lifecycle logging for `compare`, `layout_ready` and
//! `select`:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//! - an `event = "superseded"` record when a stale result is discarded
//!
//! The kernel uses only `tracing::debug!()` for internal details.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use doccompare_core::compare::compare_texts;
use doccompare_core::config::CompareConfig;
use doccompare_core::core_types::schema::EVENT_SUPERSEDED;
use doccompare_core::core_types::{ChangeId, ComparisonId};
use doccompare_core::correlate::{HighlightSet, OverlayDelta};
use doccompare_core::errors::{DocCompareError, ExError, Result};
use doccompare_core::extract::{ExtractorRegistry, TextExtractor};
use doccompare_core::model::{ComparisonResult, DocumentInput, DocumentSide, ExtractedText, TextFragment};
use doccompare_core::{log_op_end, log_op_error, log_op_start};

use crate::overlay::SideOverlay;
use crate::state::{LayoutOutcome, SessionState};

/// Emphasis changes on both documents after a selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionDelta {
    pub original: OverlayDelta,
    pub updated: OverlayDelta,
}

#[derive(Default)]
struct Inner {
    state: SessionState,
    result: Option<Arc<ComparisonResult>>,
    selected: Option<ChangeId>,
}

impl Inner {
    /// Whether `id` names the published result
    fn shows(&self, id: &ComparisonId) -> bool {
        self.result.as_ref().is_some_and(|r| &r.id == id)
    }
}

/// Orchestrates extraction, diffing and highlight correlation for two
/// documents
pub struct ComparisonSession<E: TextExtractor + 'static = ExtractorRegistry> {
    config: Arc<CompareConfig>,
    extractor: Arc<E>,
    generation: AtomicU64,
    inner: Mutex<Inner>,
    original: SideOverlay,
    updated: SideOverlay,
}

impl ComparisonSession<ExtractorRegistry> {
    /// A session using the built-in extractors, limited by `config.extract`
    pub fn with_default_extractor(config: CompareConfig) -> Self {
        let extractor = ExtractorRegistry::new(config.extract.clone());
        Self::new(config, extractor)
    }
}

impl<E: TextExtractor + 'static> ComparisonSession<E> {
    pub fn new(config: CompareConfig, extractor: E) -> Self {
        Self {
            config: Arc::new(config),
            extractor: Arc::new(extractor),
            generation: AtomicU64::new(0),
            inner: Mutex::new(Inner::default()),
            original: SideOverlay::new(DocumentSide::Original),
            updated: SideOverlay::new(DocumentSide::Updated),
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    // ===== Accessors =====

    pub fn state(&self) -> SessionState {
        self.lock_inner().state.clone()
    }

    /// The result of the current comparison, once diffing has finished
    pub fn result(&self) -> Option<Arc<ComparisonResult>> {
        self.lock_inner().result.clone()
    }

    /// Highlights currently published for one document
    pub fn highlights(&self, side: DocumentSide) -> Arc<HighlightSet> {
        self.overlay(side).current()
    }

    /// Generation of the most recently started comparison (0 before any)
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn selected(&self) -> Option<ChangeId> {
        self.lock_inner().selected.clone()
    }

    // ===== Operations =====

    /// Compare two documents, replacing any comparison in flight
    ///
    /// Both documents are extracted concurrently on the blocking pool, then
    /// diffed and chunked there too. Overlays of the previous comparison are
    /// cleared immediately.
    ///
    /// # Errors
    ///
    /// - `Superseded` if another `compare` started before this one finished;
    ///   the session state then belongs to the newer comparison
    /// - the extraction error of the first failing document (original before
    ///   updated); the session moves to `Errored`
    /// - `Internal` if a background task panicked
    pub async fn compare(
        &self,
        original: DocumentInput,
        updated: DocumentInput,
    ) -> Result<Arc<ComparisonResult>> {
        let generation = self.begin();
        log_op_start!(
            "compare",
            generation = generation,
            original = %original.name,
            updated = %updated.name
        );
        let start = Instant::now();

        let outcome = self.compare_impl(generation, original, updated).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &outcome {
            Ok(result) => {
                log_op_end!(
                    "compare",
                    duration_ms = duration_ms,
                    generation = generation,
                    comparison_id = %result.id,
                    changes_len = result.changes.len()
                );
            }
            Err(DocCompareError::Superseded { .. }) => {
                tracing::info!(
                    component = module_path!(),
                    op = "compare",
                    event = EVENT_SUPERSEDED,
                    generation = generation,
                    duration_ms = duration_ms,
                );
            }
            Err(e) => {
                log_op_error!("compare", e.clone(), duration_ms = duration_ms);
            }
        }
        outcome
    }

    async fn compare_impl(
        &self,
        generation: u64,
        original: DocumentInput,
        updated: DocumentInput,
    ) -> Result<Arc<ComparisonResult>> {
        let (original, updated) = tokio::join!(
            self.extract_side(DocumentSide::Original, original),
            self.extract_side(DocumentSide::Updated, updated),
        );
        self.ensure_current(generation)?;

        let (original, updated) = match (original, updated) {
            (Ok(original), Ok(updated)) => (original, updated),
            (Err(e), _) | (Ok(_), Err(e)) => return Err(self.fail(generation, e)),
        };

        self.transition(generation, SessionState::Diffing)?;
        let config = Arc::clone(&self.config);
        let result = tokio::task::spawn_blocking(move || compare_texts(&original, &updated, &config))
            .await
            .map_err(|e| DocCompareError::Internal {
                side: None,
                message: format!("diff task failed: {}", e),
            });
        let result = match result {
            Ok(result) => Arc::new(result),
            Err(e) => {
                self.ensure_current(generation)?;
                return Err(self.fail(generation, e));
            }
        };

        // From here on the result is visible and `layout_ready` correlates
        // whatever the renderer hands over.
        self.publish_result(generation, Arc::clone(&result))?;
        self.transition(generation, SessionState::Ready)?;
        Ok(result)
    }

    /// Hand over a freshly rendered layout for one document
    ///
    /// Discards that side's highlights and recomputes them from `fragments`,
    /// keeping the current selection. Layouts for a comparison that is no
    /// longer current are ignored. Rebuilds of one side are serialized; the
    /// two sides may rebuild concurrently.
    ///
    /// # Errors
    ///
    /// `Internal` if the correlation task panicked.
    pub async fn layout_ready(
        &self,
        comparison_id: &ComparisonId,
        side: DocumentSide,
        fragments: Vec<TextFragment>,
    ) -> Result<LayoutOutcome> {
        log_op_start!(
            "layout_ready",
            comparison_id = %comparison_id,
            side = %side,
            fragments_len = fragments.len()
        );
        let start = Instant::now();

        let outcome = self.layout_ready_impl(comparison_id, side, fragments).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &outcome {
            Ok(LayoutOutcome::Applied(delta)) => {
                log_op_end!(
                    "layout_ready",
                    duration_ms = duration_ms,
                    comparison_id = %comparison_id,
                    side = %side,
                    added = delta.added.len(),
                    removed = delta.removed.len()
                );
            }
            Ok(LayoutOutcome::Ignored) => {
                log_op_end!(
                    "layout_ready",
                    duration_ms = duration_ms,
                    comparison_id = %comparison_id,
                    side = %side,
                    ignored = true
                );
            }
            Err(e) => {
                let err = ExError::from(e.clone()).with_comparison_id(comparison_id.clone());
                log_op_error!("layout_ready", err, duration_ms = duration_ms);
            }
        }
        outcome
    }

    async fn layout_ready_impl(
        &self,
        comparison_id: &ComparisonId,
        side: DocumentSide,
        fragments: Vec<TextFragment>,
    ) -> Result<LayoutOutcome> {
        let result = match self.result() {
            Some(result) if &result.id == comparison_id => result,
            _ => return Ok(LayoutOutcome::Ignored),
        };

        let _rebuild = self.overlay(side).rebuild.lock().await;
        self.rebuild_side(side, result, fragments).await
    }

    /// Emphasize one change on both documents and dim everything else
    ///
    /// Never re-runs correlation. `None` clears the selection.
    pub fn select(&self, change_id: Option<ChangeId>) -> SelectionDelta {
        log_op_start!("select", change_id = ?change_id);
        let start = Instant::now();

        let mut inner = self.lock_inner();
        inner.selected = change_id;
        let selected = inner.selected.as_ref();

        let restyle = |overlay: &SideOverlay| {
            let previous = overlay.current();
            let mut next = (*previous).clone();
            next.select(selected);
            let delta = next.delta_from(&previous);
            overlay.replace(next);
            delta
        };
        let delta = SelectionDelta {
            original: restyle(&self.original),
            updated: restyle(&self.updated),
        };
        drop(inner);

        log_op_end!(
            "select",
            duration_ms = start.elapsed().as_millis() as u64,
            restyled = delta.original.restyled.len() + delta.updated.restyled.len()
        );
        delta
    }

    // ===== Internals =====

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn overlay(&self, side: DocumentSide) -> &SideOverlay {
        match side {
            DocumentSide::Original => &self.original,
            DocumentSide::Updated => &self.updated,
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    fn ensure_current(&self, generation: u64) -> Result<()> {
        if self.is_current(generation) {
            Ok(())
        } else {
            Err(DocCompareError::Superseded { generation })
        }
    }

    /// Start a new generation and reset the session for it
    ///
    /// The bump happens under the inner lock, so nobody can observe the new
    /// generation next to the previous result.
    fn begin(&self) -> u64 {
        let mut inner = self.lock_inner();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        inner.state = SessionState::Extracting;
        inner.result = None;
        inner.selected = None;
        self.original.clear();
        self.updated.clear();
        generation
    }

    fn transition(&self, generation: u64, state: SessionState) -> Result<()> {
        let mut inner = self.lock_inner();
        self.ensure_current(generation)?;
        tracing::debug!(generation, from = inner.state.name(), to = state.name(), "session transition");
        inner.state = state;
        Ok(())
    }

    /// Move to `Errored` if still current and hand the error back
    fn fail(&self, generation: u64, err: DocCompareError) -> DocCompareError {
        let mut inner = self.lock_inner();
        if self.is_current(generation) {
            inner.state = SessionState::Errored {
                side: err.side(),
                message: err.to_string(),
            };
        }
        err
    }

    fn publish_result(&self, generation: u64, result: Arc<ComparisonResult>) -> Result<()> {
        let mut inner = self.lock_inner();
        self.ensure_current(generation)?;
        inner.result = Some(result);
        inner.state = SessionState::Correlating;
        Ok(())
    }

    async fn extract_side(&self, side: DocumentSide, input: DocumentInput) -> Result<ExtractedText> {
        let extractor = Arc::clone(&self.extractor);
        tokio::task::spawn_blocking(move || -> Result<ExtractedText> {
            let text = extractor.extract(side, &input)?;
            let kind = input.kind().ok_or_else(|| DocCompareError::UnsupportedFormat {
                side,
                document: input.name.clone(),
                mime_type: input.mime_type.clone(),
            })?;
            Ok(ExtractedText::new(input.name, kind, text))
        })
        .await
        .map_err(|e| DocCompareError::Internal {
            side: Some(side),
            message: format!("extraction task failed: {}", e),
        })?
    }

    /// Recompute one side's highlights and publish them if `result` is
    /// still the one shown
    ///
    /// Callers hold the side's rebuild lock.
    async fn rebuild_side(
        &self,
        side: DocumentSide,
        result: Arc<ComparisonResult>,
        fragments: Vec<TextFragment>,
    ) -> Result<LayoutOutcome> {
        let config = Arc::clone(&self.config);
        let built = Arc::clone(&result);
        let mut next = tokio::task::spawn_blocking(move || {
            HighlightSet::build(side, &built.changes, &fragments, &config.correlate)
        })
        .await
        .map_err(|e| DocCompareError::Internal {
            side: Some(side),
            message: format!("correlation task failed: {}", e),
        })?;

        let inner = self.lock_inner();
        if !inner.shows(&result.id) {
            return Ok(LayoutOutcome::Ignored);
        }
        next.select(inner.selected.as_ref());
        let overlay = self.overlay(side);
        let previous = overlay.replace(next);
        let current = overlay.current();
        drop(inner);

        tracing::debug!(
            comparison_id = %result.id,
            side = %side,
            highlights = current.len(),
            "highlights published"
        );
        Ok(LayoutOutcome::Applied(current.delta_from(&previous)))
    }
}

impl<E: TextExtractor + 'static> std::fmt::Debug for ComparisonSession<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonSession")
            .field("generation", &self.generation())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
