//! The carousel component
//!
//! Owns the deck, the active index, the navigation controller and the
//! transition driver, and pushes displayed geometry to an attached sink.
//!
//! # Example
//!
//! ```rust
//! use deckflow_carousel::{Carousel, CarouselConfig, RecordingSink};
//!
//! let mut carousel = Carousel::from_config(CarouselConfig::default()).unwrap();
//! carousel.attach_sink(Box::new(RecordingSink::new()));
//!
//! // One strong wheel gesture moves to the next card
//! carousel.on_wheel(120.0, 0.0);
//! assert_eq!(carousel.current_index(), 1);
//!
//! // Frames advance the shared transition clock
//! let report = carousel.tick(500.0);
//! assert!(report.completed);
//! ```

use deckflow_core::{step_index, ConfigError, Deck, Geometry, ItemId, ViewportMetrics};
use deckflow_platform::{Event, EventListener, InputEvent, Propagation, WindowEvent};
use rustc_hash::FxHashSet;

use crate::config::{BusyGatePolicy, CarouselConfig};
use crate::layout::SlotLayout;
use crate::navigation::{Direction, NavigationCommand, NavigationController};
use crate::sink::{GeometrySink, GeometryUpdate, SinkError};
use crate::slot::{slot_for, SlotKind};
use crate::transition::{TransitionDriver, TransitionHandle, TransitionState, TransitionTiming};

/// Outcome of one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// A transition is still in flight after this frame
    pub animating: bool,
    /// A transition finished on this frame
    pub completed: bool,
    /// Updates the sink accepted
    pub updates_sent: usize,
    /// Updates that could not be delivered and will be retried
    pub updates_deferred: usize,
}

/// Wheel-driven stacked card carousel
pub struct Carousel {
    deck: Deck,
    config: CarouselConfig,
    viewport: ViewportMetrics,
    layout: SlotLayout,
    current_index: usize,
    navigation: NavigationController,
    driver: TransitionDriver,
    sink: Option<Box<dyn GeometrySink>>,
    /// Last geometry the sink accepted per deck position
    last_sent: Vec<Option<Geometry>>,
    /// Items whose latest geometry has not reached the sink
    pending: FxHashSet<ItemId>,
    now_ms: f64,
}

impl Carousel {
    /// Build a carousel over `deck`
    ///
    /// `config.item_count` is replaced by the deck length. Fails if the
    /// configuration is invalid.
    pub fn new(deck: Deck, mut config: CarouselConfig) -> Result<Self, ConfigError> {
        config.item_count = deck.len();
        config.validate()?;

        let viewport = ViewportMetrics::default();
        let layout = SlotLayout::new(&config, viewport);
        let driver = TransitionDriver::new(&layout, deck.len(), 0);

        tracing::debug!(
            "Carousel: {} items, {:?} input, {:?} busy gate",
            deck.len(),
            config.rate_limit,
            config.busy_gate
        );

        Ok(Self {
            navigation: NavigationController::new(config.rate_limit),
            last_sent: vec![None; deck.len()],
            pending: deck.ids().collect(),
            deck,
            config,
            viewport,
            layout,
            current_index: 0,
            driver,
            sink: None,
            now_ms: 0.0,
        })
    }

    /// Build a carousel with `config.item_count` numbered cards
    pub fn from_config(config: CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let deck = Deck::numbered(config.item_count)?;
        Self::new(deck, config)
    }

    /// Start with a specific viewport instead of the default one
    pub fn with_viewport(mut self, viewport: ViewportMetrics) -> Self {
        self.viewport = viewport;
        self.layout = SlotLayout::new(&self.config, viewport);
        self.driver.place(&self.layout, self.current_index);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Index of the expanded card
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn state(&self) -> TransitionState {
        self.driver.state()
    }

    /// True while a transition holds the busy gate
    pub fn is_animating(&self) -> bool {
        self.driver.is_busy()
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Slot of the item at `index` for the current active index
    pub fn slot_of(&self, index: usize) -> SlotKind {
        slot_for(index, self.current_index, self.deck.len())
    }

    /// Resting geometry of the item at `index` for the current active index
    pub fn target_of(&self, index: usize) -> Geometry {
        self.layout
            .target(self.slot_of(index), self.driver.park_side())
    }

    /// Displayed geometry of every item, in deck order
    pub fn displayed(&self) -> &[Geometry] {
        self.driver.displayed()
    }

    /// Displayed geometry of one item
    pub fn geometry_of(&self, id: ItemId) -> Option<Geometry> {
        let index = self.deck.position(id)?;
        self.driver.displayed().get(index).copied()
    }

    /// Items whose latest geometry has not been delivered
    pub fn pending_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.pending.iter().copied()
    }

    // =========================================================================
    // Sink
    // =========================================================================

    /// Attach the rendering surface and push the full current state to it
    pub fn attach_sink(&mut self, sink: Box<dyn GeometrySink>) -> FrameReport {
        tracing::debug!("Carousel: sink attached");
        self.sink = Some(sink);
        self.last_sent.iter_mut().for_each(|sent| *sent = None);
        self.flush()
    }

    /// Detach the rendering surface, returning it
    pub fn detach_sink(&mut self) -> Option<Box<dyn GeometrySink>> {
        tracing::debug!("Carousel: sink detached");
        self.last_sent.iter_mut().for_each(|sent| *sent = None);
        self.pending = self.deck.ids().collect();
        self.sink.take()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed a wheel delta
    ///
    /// Returns the navigation command when the event caused one.
    pub fn on_wheel(&mut self, delta_y: f32, now_ms: f64) -> Option<NavigationCommand> {
        self.now_ms = now_ms;

        if self.gate_closed() {
            tracing::trace!("Carousel: wheel {} dropped, transition in flight", delta_y);
            return None;
        }

        let command = self.navigation.on_wheel(delta_y, now_ms)?;
        self.navigate(command.direction, now_ms)?;
        Some(command)
    }

    /// Viewport changed: re-place everything for the new metrics without
    /// changing the active index
    pub fn on_resize(&mut self, viewport: ViewportMetrics) -> FrameReport {
        tracing::debug!(
            "Carousel: resized to {}x{}",
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        self.layout = SlotLayout::new(&self.config, viewport);
        self.driver
            .relayout(&self.layout, self.current_index, self.now_ms);
        self.flush()
    }

    /// Advance animations to `now_ms` and push the frame to the sink
    pub fn tick(&mut self, now_ms: f64) -> FrameReport {
        self.now_ms = now_ms;

        if let Some(command) = self.navigation.poll(now_ms) {
            if self.gate_closed() {
                tracing::trace!("Carousel: debounced command dropped, transition in flight");
            } else {
                self.navigate(command.direction, now_ms);
            }
        }

        let completed = self.driver.tick(now_ms);
        if completed {
            tracing::debug!("Carousel: transition to {} complete", self.current_index);
        }

        FrameReport {
            completed,
            ..self.flush()
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move to the next card, bypassing rate limiting
    pub fn advance(&mut self, now_ms: f64) -> Option<TransitionHandle> {
        self.now_ms = now_ms;
        if self.gate_closed() {
            return None;
        }
        self.navigate(Direction::Advance, now_ms)
    }

    /// Move to the previous card, bypassing rate limiting
    pub fn retreat(&mut self, now_ms: f64) -> Option<TransitionHandle> {
        self.now_ms = now_ms;
        if self.gate_closed() {
            return None;
        }
        self.navigate(Direction::Retreat, now_ms)
    }

    /// Jump to `index` in one transition, taking the shorter way round
    pub fn go_to(&mut self, index: usize, now_ms: f64) -> Option<TransitionHandle> {
        self.now_ms = now_ms;
        let len = self.deck.len();
        if index >= len || index == self.current_index || self.gate_closed() {
            return None;
        }

        let forward = (index + len - self.current_index) % len;
        let direction = if forward <= len - forward {
            Direction::Advance
        } else {
            Direction::Retreat
        };
        self.transition_to(index, direction, now_ms)
    }

    fn gate_closed(&self) -> bool {
        self.config.busy_gate == BusyGatePolicy::Drop && self.driver.is_busy()
    }

    fn navigate(&mut self, direction: Direction, now_ms: f64) -> Option<TransitionHandle> {
        let next = step_index(self.current_index, direction.step(), self.deck.len());
        if next == self.current_index {
            return None;
        }
        self.transition_to(next, direction, now_ms)
    }

    fn transition_to(
        &mut self,
        index: usize,
        direction: Direction,
        now_ms: f64,
    ) -> Option<TransitionHandle> {
        let from = self.current_index;
        let timing = TransitionTiming {
            duration_ms: self.config.transition_duration_ms,
            easing: self.config.easing,
        };

        let handle = self
            .driver
            .begin(&self.layout, from, index, direction, now_ms, timing);
        self.current_index = index;

        tracing::debug!(
            "Carousel: {:?} {} -> {} at {:.1}ms",
            direction,
            from,
            index,
            now_ms
        );

        self.flush();
        Some(handle)
    }

    // =========================================================================
    // Sink delivery
    // =========================================================================

    /// Push every changed or undelivered geometry to the sink
    fn flush(&mut self) -> FrameReport {
        let mut report = FrameReport {
            animating: self.driver.is_busy(),
            ..Default::default()
        };

        let Some(sink) = self.sink.as_mut() else {
            report.updates_deferred = self.pending.len();
            return report;
        };

        for ((item, geometry), sent) in self
            .deck
            .iter()
            .zip(self.driver.displayed())
            .zip(self.last_sent.iter_mut())
        {
            if *sent == Some(*geometry) {
                continue;
            }

            let update = GeometryUpdate {
                item: item.id,
                geometry: *geometry,
            };
            match sink.apply(&update) {
                Ok(()) => {
                    *sent = Some(*geometry);
                    self.pending.remove(&item.id);
                    report.updates_sent += 1;
                }
                Err(SinkError::MissingHandle(id)) => {
                    tracing::trace!("Carousel: no handle for {}, deferring", id);
                    self.pending.insert(item.id);
                    report.updates_deferred += 1;
                }
            }
        }

        sink.end_frame();
        report
    }
}

impl EventListener for Carousel {
    fn on_event(&mut self, event: &Event) -> Propagation {
        match event {
            Event::Input(InputEvent::Scroll {
                delta_y,
                timestamp_ms,
                ..
            }) => {
                self.on_wheel(*delta_y, *timestamp_ms);
                Propagation::Stop
            }
            Event::Input(InputEvent::ScrollEnd { .. }) => Propagation::Continue,
            Event::Window(WindowEvent::Resized { width, height }) => {
                self.on_resize(ViewportMetrics::new(*width, *height));
                Propagation::Continue
            }
            Event::Window(WindowEvent::Focused(_)) => Propagation::Continue,
            Event::Frame { timestamp_ms } => {
                self.tick(*timestamp_ms);
                Propagation::Continue
            }
        }
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("items", &self.deck.len())
            .field("current_index", &self.current_index)
            .field("state", &self.driver.state())
            .field("sink_attached", &self.sink.is_some())
            .finish()
    }
}
