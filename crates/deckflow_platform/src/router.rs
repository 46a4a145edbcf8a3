//! Listener routing
//!
//! The router owns the only references it takes to a listener. Detaching a
//! listener (or removing its target) drops those references, so nothing is
//! left behind after teardown.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::error::{PlatformError, Result};
use crate::event::{Event, EventListener, Propagation};

new_key_type! {
    /// Handle to a target region (the area that receives wheel input)
    pub struct TargetId;
    /// Handle to an attached listener
    pub struct ListenerId;
}

/// Listener shared between the host and the router
pub type SharedListener = Rc<RefCell<dyn EventListener>>;

struct Target {
    name: String,
    /// Attachment order, which is also dispatch order
    listeners: Vec<ListenerId>,
}

struct Registration {
    target: TargetId,
    listener: SharedListener,
}

/// Routes host events to listeners attached to target regions
///
/// Single-threaded by construction: listeners are `Rc<RefCell<_>>`.
pub struct EventRouter {
    targets: SlotMap<TargetId, Target>,
    listeners: SlotMap<ListenerId, Registration>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self {
            targets: SlotMap::with_key(),
            listeners: SlotMap::with_key(),
        }
    }

    /// Register a new target region
    pub fn create_target(&mut self, name: impl Into<String>) -> TargetId {
        let name = name.into();
        tracing::debug!("EventRouter: created target '{}'", name);
        self.targets.insert(Target {
            name,
            listeners: Vec::new(),
        })
    }

    /// Remove a target region and detach every listener on it
    pub fn remove_target(&mut self, target: TargetId) -> bool {
        let Some(removed) = self.targets.remove(target) else {
            return false;
        };
        for id in removed.listeners {
            self.listeners.remove(id);
        }
        tracing::debug!("EventRouter: removed target '{}'", removed.name);
        true
    }

    pub fn target_name(&self, target: TargetId) -> Option<&str> {
        self.targets.get(target).map(|t| t.name.as_str())
    }

    /// Attach a listener to a target region
    pub fn attach<L>(&mut self, target: TargetId, listener: Rc<RefCell<L>>) -> Result<ListenerId>
    where
        L: EventListener + 'static,
    {
        let listener: SharedListener = listener;
        let Some(entry) = self.targets.get_mut(target) else {
            return Err(PlatformError::UnknownTarget(target_raw(target)));
        };
        let id = self.listeners.insert(Registration { target, listener });
        entry.listeners.push(id);
        tracing::debug!("EventRouter: attached listener to '{}'", entry.name);
        Ok(id)
    }

    /// Detach a listener, dropping the router's reference to it
    pub fn detach(&mut self, id: ListenerId) -> bool {
        let Some(registration) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(target) = self.targets.get_mut(registration.target) {
            target.listeners.retain(|l| *l != id);
            tracing::debug!("EventRouter: detached listener from '{}'", target.name);
        }
        true
    }

    /// Total number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an event to the listeners of one target, in attachment order,
    /// until one of them stops propagation
    pub fn dispatch(&self, target: TargetId, event: &Event) -> Result<Propagation> {
        let Some(entry) = self.targets.get(target) else {
            return Err(PlatformError::UnknownTarget(target_raw(target)));
        };

        for id in &entry.listeners {
            let Some(registration) = self.listeners.get(*id) else {
                continue;
            };
            let mut listener = registration
                .listener
                .try_borrow_mut()
                .map_err(|_| PlatformError::ListenerBusy)?;
            if listener.on_event(event) == Propagation::Stop {
                return Ok(Propagation::Stop);
            }
        }

        Ok(Propagation::Continue)
    }

    /// Deliver an event to every attached listener regardless of target
    ///
    /// Used for viewport and frame notifications, which have no target.
    pub fn broadcast(&self, event: &Event) -> Result<()> {
        for entry in self.targets.values() {
            for id in &entry.listeners {
                if let Some(registration) = self.listeners.get(*id) {
                    registration
                        .listener
                        .try_borrow_mut()
                        .map_err(|_| PlatformError::ListenerBusy)?
                        .on_event(event);
                }
            }
        }
        Ok(())
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn target_raw(target: TargetId) -> u64 {
    use slotmap::Key;
    target.data().as_ffi()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::WindowEvent;
    use crate::input::InputEvent;

    #[derive(Default)]
    struct Counter {
        seen: usize,
        stop: bool,
    }

    impl EventListener for Counter {
        fn on_event(&mut self, _event: &Event) -> Propagation {
            self.seen += 1;
            if self.stop {
                Propagation::Stop
            } else {
                Propagation::Continue
            }
        }
    }

    fn wheel() -> Event {
        Event::Input(InputEvent::scroll(0.0, 100.0, 0.0))
    }

    #[test]
    fn test_dispatch_only_reaches_target() {
        let mut router = EventRouter::new();
        let a = router.create_target("a");
        let b = router.create_target("b");
        let on_a = Rc::new(RefCell::new(Counter::default()));
        let on_b = Rc::new(RefCell::new(Counter::default()));
        router.attach(a, on_a.clone()).unwrap();
        router.attach(b, on_b.clone()).unwrap();

        router.dispatch(a, &wheel()).unwrap();

        assert_eq!(on_a.borrow().seen, 1);
        assert_eq!(on_b.borrow().seen, 0);
    }

    #[test]
    fn test_stop_propagation() {
        let mut router = EventRouter::new();
        let target = router.create_target("stack");
        let first = Rc::new(RefCell::new(Counter {
            seen: 0,
            stop: true,
        }));
        let second = Rc::new(RefCell::new(Counter::default()));
        router.attach(target, first.clone()).unwrap();
        router.attach(target, second.clone()).unwrap();

        assert_eq!(router.dispatch(target, &wheel()), Ok(Propagation::Stop));
        assert_eq!(first.borrow().seen, 1);
        assert_eq!(second.borrow().seen, 0);
    }

    #[test]
    fn test_detach_releases_reference() {
        let mut router = EventRouter::new();
        let target = router.create_target("stack");
        let listener = Rc::new(RefCell::new(Counter::default()));
        let id = router.attach(target, listener.clone()).unwrap();
        assert_eq!(Rc::strong_count(&listener), 2);

        assert!(router.detach(id));
        assert!(!router.detach(id));
        assert_eq!(Rc::strong_count(&listener), 1);
        assert_eq!(router.listener_count(), 0);

        router.dispatch(target, &wheel()).unwrap();
        assert_eq!(listener.borrow().seen, 0);
    }

    #[test]
    fn test_remove_target_detaches_listeners() {
        let mut router = EventRouter::new();
        let target = router.create_target("stack");
        let listener = Rc::new(RefCell::new(Counter::default()));
        router.attach(target, listener.clone()).unwrap();

        assert!(router.remove_target(target));
        assert_eq!(Rc::strong_count(&listener), 1);
        assert!(matches!(
            router.dispatch(target, &wheel()),
            Err(PlatformError::UnknownTarget(_))
        ));
    }

    #[test]
    fn test_broadcast_reaches_all() {
        let mut router = EventRouter::new();
        let a = router.create_target("a");
        let b = router.create_target("b");
        let on_a = Rc::new(RefCell::new(Counter::default()));
        let on_b = Rc::new(RefCell::new(Counter::default()));
        router.attach(a, on_a.clone()).unwrap();
        router.attach(b, on_b.clone()).unwrap();

        let resize = Event::Window(WindowEvent::Resized {
            width: 800.0,
            height: 600.0,
        });
        router.broadcast(&resize).unwrap();

        assert_eq!(on_a.borrow().seen, 1);
        assert_eq!(on_b.borrow().seen, 1);
    }

    #[test]
    fn test_busy_listener_reports_error() {
        let mut router = EventRouter::new();
        let target = router.create_target("stack");
        let listener = Rc::new(RefCell::new(Counter::default()));
        router.attach(target, listener.clone()).unwrap();

        let _guard = listener.borrow_mut();
        assert_eq!(
            router.dispatch(target, &wheel()),
            Err(PlatformError::ListenerBusy)
        );
    }
}
