use std::collections::BTreeSet;

use crate::event::{Event, EventKind};
use crate::input::{Button, Controller, InputSource};

/// Turns per-frame pressed state into press, hold and release events.
#[derive(Debug, Default)]
pub struct InputPoller {
    pressed: BTreeSet<Button>,
}

impl InputPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the current frame against the previous one.
    ///
    /// For each button: a press event on the first pressed frame, a hold
    /// event on every pressed frame, a release event on the first frame
    /// after it was let go.
    pub fn poll<S: InputSource + ?Sized>(&mut self, source: &S) -> Vec<Event> {
        let mut events = Vec::new();
        for button in Button::polled() {
            let pressed = source.is_pressed(Controller::Either, button);
            let was_pressed = self.pressed.contains(&button);

            if pressed && !was_pressed {
                events.push(Event::button(EventKind::ButtonPressed, button));
                self.pressed.insert(button);
            }
            if pressed {
                events.push(Event::button(EventKind::ButtonHeld, button));
            }
            if !pressed && was_pressed {
                events.push(Event::button(EventKind::ButtonReleased, button));
                self.pressed.remove(&button);
            }
        }
        events
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }
}
