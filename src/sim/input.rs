//! Input bridge
//!
//! Translates platform pointer/touch/press events into the per-tick signals
//! the controller understands. Events arriving between ticks are coalesced -
//! the last movement wins, the first press wins - and drained exactly once
//! per tick, which keeps every state mutation on the single tick path even
//! when the embedding platform delivers events from callbacks.

use glam::Vec2;

use super::tick::TickInput;

/// Pointer button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// A discrete pointer event from the embedding platform
///
/// Touch input maps onto the same two shapes: a touch drag is `Moved`, a tap
/// is `Pressed` with the primary button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved { pos: Vec2 },
    Pressed { button: PointerButton },
}

/// Coalesces platform events into one `TickInput` per tick
#[derive(Debug, Clone, Default)]
pub struct InputBridge {
    pointer: Option<Vec2>,
    pressed: Option<PointerButton>,
}

impl InputBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved { pos } => self.pointer = Some(pos),
            PointerEvent::Pressed { button } => {
                if self.pressed.is_none() {
                    self.pressed = Some(button);
                }
            }
        }
    }

    /// Take the coalesced input for the next tick, resetting the bridge
    pub fn drain(&mut self) -> TickInput {
        TickInput {
            pointer: self.pointer.take(),
            pressed: self.pressed.take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_move_wins() {
        let mut bridge = InputBridge::new();
        bridge.push(PointerEvent::Moved { pos: Vec2::new(1.0, 1.0) });
        bridge.push(PointerEvent::Moved { pos: Vec2::new(9.0, 9.0) });
        let input = bridge.drain();
        assert_eq!(input.pointer, Some(Vec2::new(9.0, 9.0)));
    }

    #[test]
    fn test_first_press_wins() {
        let mut bridge = InputBridge::new();
        bridge.push(PointerEvent::Pressed { button: PointerButton::Primary });
        bridge.push(PointerEvent::Pressed { button: PointerButton::Secondary });
        let input = bridge.drain();
        assert_eq!(input.pressed, Some(PointerButton::Primary));
    }

    #[test]
    fn test_drain_resets_bridge() {
        let mut bridge = InputBridge::new();
        bridge.push(PointerEvent::Moved { pos: Vec2::ONE });
        bridge.push(PointerEvent::Pressed { button: PointerButton::Primary });
        let first = bridge.drain();
        assert!(first.pointer.is_some() && first.pressed.is_some());
        let second = bridge.drain();
        assert_eq!(second, TickInput::default());
    }
}
