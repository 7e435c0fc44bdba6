#![forbid(unsafe_code)]

//! The drag session state machine.
//!
//! [`ReorderEngine`] owns every piece of mutable reorder state: the active
//! [`DragSession`], the [`SettleFlags`], the re-entrancy guard, the settle
//! timers and the geometry cache. Input arrives one event at a time through
//! [`handle`](ReorderEngine::handle); timers fire through
//! [`tick`](ReorderEngine::tick). Both return [`ReorderTransition`]s with a
//! monotonically increasing `transition_id`, so a recorded run can be
//! compared transition by transition.
//!
//! # Invariants
//!
//! 1. At most one session exists.
//! 2. While a session exists, `dragged_index` and `target_index` are below the
//!    item count captured at drag start, that count still equals the store's
//!    length, and the dragged id still sits at `dragged_index`. Any other
//!    store shape cancels the session instead.
//! 3. [`OrderStore::move_item`] is called only from a drop with a displaced
//!    target and no armed guard, and only with distinct in-range indices.
//! 4. The session is cleared and the settling flag raised before the store
//!    is mutated.
//!
//! # Failure Modes
//!
//! None are surfaced. Degraded input (sentinel or non-finite pointers,
//! missing geometry, redundant drops) produces a
//! [`ReorderEffect::Noop`] or leaves the target unchanged.

use tabshift_core::{DragEvent, Point};
use web_time::Instant;

use crate::boundary::GeometrySampler;
use crate::config::{ReorderConfig, ReorderConfigError};
use crate::resolver::resolve_target;
use crate::session::{
    CancelReason, DragSession, ReorderEffect, ReorderNoopReason, ReorderState, ReorderTransition,
    SettleFlags, SettleTimerKind,
};
use crate::settle::SettleTimers;
use crate::store::OrderStore;
use crate::transform::{ItemPreview, PreviewView, preview_frame};

/// Drag-to-reorder lifecycle machine.
#[derive(Debug, Clone, Default)]
pub struct ReorderEngine {
    config: ReorderConfig,
    session: Option<DragSession>,
    flags: SettleFlags,
    drop_guard: bool,
    timers: SettleTimers,
    geometry: GeometrySampler,
    transition_counter: u64,
}

impl ReorderEngine {
    /// Construct an engine with an explicit configuration.
    pub fn new(config: ReorderConfig) -> Result<Self, ReorderConfigError> {
        Ok(Self {
            config: config.validated()?,
            ..Self::default()
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Current lifecycle state.
    ///
    /// Settling lasts while any post-commit marker is still live.
    #[must_use]
    pub fn state(&self) -> ReorderState {
        if let Some(session) = self.session {
            ReorderState::Dragging { session }
        } else if self.flags.settling || self.drop_guard || self.flags.just_dropped.is_some() {
            ReorderState::Settling {
                just_dropped: self.flags.just_dropped,
            }
        } else {
            ReorderState::Idle
        }
    }

    /// Active session, if dragging.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Post-commit markers.
    #[must_use]
    pub fn settle_flags(&self) -> SettleFlags {
        self.flags
    }

    /// Whether a commit's re-entrancy guard is still armed.
    #[must_use]
    pub fn is_drop_in_flight(&self) -> bool {
        self.drop_guard
    }

    /// Earliest pending timer deadline. Hosts wake up and call
    /// [`tick`](Self::tick) no earlier than this.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Measured item geometry.
    #[must_use]
    pub fn geometry(&self) -> &GeometrySampler {
        &self.geometry
    }

    /// Mutable geometry, for recording widths as items are laid out.
    pub fn geometry_mut(&mut self) -> &mut GeometrySampler {
        &mut self.geometry
    }

    /// Apply one drag event.
    ///
    /// `now` arms the settle timers on a commit. `store` is read for ids and
    /// length, and mutated at most once.
    pub fn handle<S>(&mut self, event: &DragEvent, now: Instant, store: &mut S) -> ReorderTransition
    where
        S: OrderStore + ?Sized,
    {
        let from = self.state();
        let effect = match self.session {
            Some(session) if event.is_pointer_event() && !session_matches(&session, store) => {
                self.geometry.truncate(store.len());
                self.cancel_session(CancelReason::ItemsChanged)
            }
            _ => self.apply(event, now, store),
        };
        self.finish(from, effect)
    }

    /// Fire every settle timer due at `now`, earliest first.
    pub fn tick(&mut self, now: Instant) -> Vec<ReorderTransition> {
        let fired = self.timers.due(now);
        let mut transitions = Vec::with_capacity(fired.len());
        for timer in fired {
            let from = self.state();
            match timer.kind {
                SettleTimerKind::ReleaseGuard => {
                    self.drop_guard = false;
                    self.flags.settling = false;
                }
                SettleTimerKind::ClearJustDropped => {
                    self.flags.just_dropped = None;
                }
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(
                timer = ?timer.kind,
                generation = timer.generation,
                "settle timer fired"
            );
            transitions.push(self.finish(
                from,
                ReorderEffect::TimerFired {
                    timer: timer.kind,
                    generation: timer.generation,
                },
            ));
        }
        transitions
    }

    /// Abandon the active drag from the host side.
    ///
    /// Returns `None` when no drag is active. Settle markers are untouched.
    pub fn cancel(&mut self) -> Option<ReorderTransition> {
        self.session?;
        let from = self.state();
        let effect = self.cancel_session(CancelReason::Programmatic);
        Some(self.finish(from, effect))
    }

    /// Per-item preview for the current frame, in store order.
    #[must_use]
    pub fn preview<S>(&self, store: &S) -> Vec<ItemPreview>
    where
        S: OrderStore + ?Sized,
    {
        let ids = (0..store.len()).filter_map(|index| store.id_at(index));
        preview_frame(ids, &self.preview_view(), self.flags.just_dropped)
    }

    /// Preview offset for the item at `index`.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> f32 {
        self.preview_view().offset(index)
    }

    fn preview_view(&self) -> PreviewView<'_> {
        let dragged_width = self
            .session
            .and_then(|s| self.geometry.width(s.dragged_index))
            .unwrap_or(0.0);
        PreviewView {
            session: self.session.as_ref(),
            settling: self.flags.settling,
            dragged_width,
            gap: self.config.gap,
            transition_ms: self.config.transition_ms,
        }
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    fn apply<S>(&mut self, event: &DragEvent, now: Instant, store: &mut S) -> ReorderEffect
    where
        S: OrderStore + ?Sized,
    {
        match *event {
            DragEvent::Start { index, pointer } => self.start(index, pointer, store),
            DragEvent::Move { pointer } | DragEvent::Over { pointer } => self.update(pointer),
            DragEvent::Drop => self.release(now, store),
            DragEvent::End => {
                if self.session.is_some() {
                    self.cancel_session(CancelReason::ReleasedOutside)
                } else {
                    noop(ReorderNoopReason::IdleWithoutActiveDrag)
                }
            }
            DragEvent::ItemsChanged { len } => {
                self.geometry.truncate(len);
                if self.session.is_some() {
                    self.cancel_session(CancelReason::ItemsChanged)
                } else {
                    ReorderEffect::ItemsResized { len }
                }
            }
        }
    }

    fn start<S>(&mut self, index: usize, pointer: Point, store: &S) -> ReorderEffect
    where
        S: OrderStore + ?Sized,
    {
        if self.session.is_some() {
            return noop(ReorderNoopReason::ActiveDragAlreadyInProgress);
        }
        if !pointer.is_finite() {
            return noop(ReorderNoopReason::NonFinitePointer);
        }
        let Some(id) = store.id_at(index).filter(|_| index < store.len()) else {
            return noop(ReorderNoopReason::IndexOutOfRange);
        };

        let interrupted_settle = self.end_settle_early();
        self.session = Some(DragSession::begin(id, index, pointer, store.len()));

        #[cfg(feature = "tracing")]
        tracing::debug!(%id, index, interrupted_settle, "drag started");

        ReorderEffect::DragStarted {
            id,
            index,
            pointer,
            interrupted_settle,
        }
    }

    fn update(&mut self, pointer: Point) -> ReorderEffect {
        let Some(session) = self.session.as_mut() else {
            return noop(ReorderNoopReason::IdleWithoutActiveDrag);
        };
        if !pointer.is_usable() {
            return noop(if pointer.is_finite() {
                ReorderNoopReason::NullPointerSentinel
            } else {
                ReorderNoopReason::NonFinitePointer
            });
        }

        session.current = pointer;
        let previous = session.target_index;
        let boundaries = self.geometry.sample(session.item_count, self.config.gap);
        if let Some(target) = resolve_target(session, &boundaries, self.geometry.origin()) {
            session.target_index = target;
        }
        let offset = session.offset();
        let target = session.target_index;

        if target == previous {
            ReorderEffect::PointerUpdated {
                pointer,
                offset,
                target,
            }
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(previous, target, offset, "drop target changed");
            ReorderEffect::TargetChanged {
                pointer,
                offset,
                previous,
                target,
            }
        }
    }

    fn release<S>(&mut self, now: Instant, store: &mut S) -> ReorderEffect
    where
        S: OrderStore + ?Sized,
    {
        if self.drop_guard {
            #[cfg(feature = "tracing")]
            tracing::debug!("drop ignored while a commit is settling");
            return noop(ReorderNoopReason::DropInFlight);
        }
        let Some(session) = self.session else {
            return noop(ReorderNoopReason::IdleWithoutActiveDrag);
        };
        if !session.is_displaced() {
            return self.cancel_session(CancelReason::DroppedOnOrigin);
        }

        // One step: clear the preview and raise settling, then mutate.
        self.session = None;
        self.flags.settling = true;
        self.drop_guard = true;

        let (id, from, to) = (session.dragged_id, session.dragged_index, session.target_index);
        store.move_item(from, to);
        self.flags.just_dropped = Some(id);

        self.timers
            .schedule(SettleTimerKind::ReleaseGuard, now, self.config.settle_window());
        self.timers.schedule(
            SettleTimerKind::ClearJustDropped,
            now,
            self.config.just_dropped_window(),
        );

        #[cfg(feature = "tracing")]
        tracing::info!(%id, from, to, "reorder committed");

        ReorderEffect::Committed { id, from, to }
    }

    fn cancel_session(&mut self, reason: CancelReason) -> ReorderEffect {
        let id = self.session.take().map(|s| s.dragged_id);

        #[cfg(feature = "tracing")]
        tracing::debug!(id = ?id, reason = ?reason, "drag canceled");

        ReorderEffect::Canceled { id, reason }
    }

    /// Close any open settle window. Returns whether one was open.
    fn end_settle_early(&mut self) -> bool {
        let pending = self.timers.cancel_all() > 0;
        let open = pending || self.drop_guard || self.flags != SettleFlags::default();
        self.drop_guard = false;
        self.flags = SettleFlags::default();
        open
    }

    fn finish(&mut self, from: ReorderState, effect: ReorderEffect) -> ReorderTransition {
        #[cfg(feature = "tracing")]
        {
            if let ReorderEffect::Noop { reason } = effect {
                tracing::debug!(reason = ?reason, state = from.name(), "event ignored");
            }
        }

        self.transition_counter = self.transition_counter.saturating_add(1);
        ReorderTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state(),
            effect,
        }
    }
}

#[inline]
const fn noop(reason: ReorderNoopReason) -> ReorderEffect {
    ReorderEffect::Noop { reason }
}

/// The store still has the captured length and the dragged item at its
/// origin slot.
fn session_matches<S>(session: &DragSession, store: &S) -> bool
where
    S: OrderStore + ?Sized,
{
    store.len() == session.item_count
        && store.id_at(session.dragged_index) == Some(session.dragged_id)
}
