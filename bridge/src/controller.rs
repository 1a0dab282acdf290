//! Configuration sync between UI controls and the guest module.
//!
//! The guest is the only authority for field values. Every state change
//! goes through the same cycle:
//!
//! 1. at most one setter call (the triggering change)
//! 2. [`Controller::redraw`]: every exported field is read back and pushed
//!    into its control, then `generate` runs once
//!
//! Events are handled strictly one at a time in arrival order; a cycle
//! always completes before the next event is looked at.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use masm_hostapi::{ControlPanel, DrawingSurface, Field, FieldValue};

use crate::error::BridgeError;
use crate::runtime::ModuleHandle;

/// A user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The user put `value` into the control for `field`.
    ControlInput { field: Field, value: FieldValue },
    /// The user clicked the drawing surface.
    CanvasClick,
}

/// A seed derived from the wall clock, kept within `0..=i32::MAX` so any
/// accessor width can hold it.
pub fn time_seed() -> i64 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    (millis % (i32::MAX as u128 + 1)) as i64
}

/// Drives a module handle from UI events and mirrors it into a panel.
pub struct Controller<S: DrawingSurface + 'static, P: ControlPanel> {
    handle: ModuleHandle<S>,
    panel: P,
    redraws: u64,
}

impl<S: DrawingSurface + 'static, P: ControlPanel> Controller<S, P> {
    pub fn new(handle: ModuleHandle<S>, panel: P) -> Self {
        Self {
            handle,
            panel,
            redraws: 0,
        }
    }

    /// Seed the module and draw for the first time.
    pub fn initial_load(&mut self, seed: i64) -> Result<(), BridgeError> {
        let _span = tracing::debug_span!("cycle", trigger = "load").entered();
        if self.handle.has_field(Field::Seed) {
            self.handle.set(Field::Seed, FieldValue::Int(seed))?;
        } else {
            tracing::debug!("module exports no seed; generating with its own");
        }
        self.redraw()
    }

    /// Copy every field from the module into the panel, then generate once.
    pub fn redraw(&mut self) -> Result<(), BridgeError> {
        let fields: Vec<Field> = self.handle.fields().collect();
        for field in fields {
            let value = self.handle.get(field)?;
            self.panel.display(field, value);
        }
        self.handle.generate()?;
        self.redraws += 1;
        tracing::debug!(redraws = self.redraws, "redraw complete");
        Ok(())
    }

    /// Push the control's current value for `field` into the module.
    pub fn on_control_change(&mut self, field: Field) -> Result<(), BridgeError> {
        let _span = tracing::debug_span!("cycle", trigger = "control", %field).entered();
        if !self.handle.has_field(field) {
            return Err(BridgeError::FieldNotExported(field));
        }
        let value = self
            .panel
            .value(field)
            .ok_or(BridgeError::ControlMissing(field))?;
        self.handle.set(field, value)?;
        self.redraw()
    }

    /// Advance to the next seed and redraw.
    pub fn on_canvas_click(&mut self) -> Result<(), BridgeError> {
        let _span = tracing::debug_span!("cycle", trigger = "click").entered();
        let seed = self.handle.get(Field::Seed)?.as_int();
        self.handle
            .set(Field::Seed, FieldValue::Int(seed.wrapping_add(1)))?;
        self.redraw()
    }

    /// Handle one event to completion.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<(), BridgeError> {
        match event {
            UiEvent::ControlInput { field, value } => {
                self.panel.input(field, value);
                self.on_control_change(field)
            }
            UiEvent::CanvasClick => self.on_canvas_click(),
        }
    }

    pub fn handle(&self) -> &ModuleHandle<S> {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut ModuleHandle<S> {
        &mut self.handle
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Completed redraw cycles.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn into_parts(self) -> (ModuleHandle<S>, P) {
        (self.handle, self.panel)
    }
}

/// FIFO of pending UI events.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<UiEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: UiEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Dispatch queued events in order until empty.
    ///
    /// Stops at the first failing event, leaving later events queued.
    /// Returns how many events were handled.
    pub fn run<S, P>(&mut self, controller: &mut Controller<S, P>) -> Result<usize, BridgeError>
    where
        S: DrawingSurface + 'static,
        P: ControlPanel,
    {
        let mut handled = 0;
        while let Some(event) = self.events.pop_front() {
            controller.dispatch(event)?;
            handled += 1;
        }
        Ok(handled)
    }
}

impl Extend<UiEvent> for EventQueue {
    fn extend<I: IntoIterator<Item = UiEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_seed_in_range() {
        let seed = time_seed();
        assert!((0..=i32::MAX as i64).contains(&seed));
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = EventQueue::new();
        queue.push(UiEvent::CanvasClick);
        queue.extend([UiEvent::ControlInput {
            field: Field::Width,
            value: FieldValue::Int(3),
        }]);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.events.pop_front(), Some(UiEvent::CanvasClick));
        assert!(matches!(
            queue.events.pop_front(),
            Some(UiEvent::ControlInput { field: Field::Width, .. })
        ));
        assert!(queue.is_empty());
    }
}
