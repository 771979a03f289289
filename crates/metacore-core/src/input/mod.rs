//! Controller buttons and per-frame edge detection.

mod poller;

pub use poller::*;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr, IntoStaticStr};

use crate::config::input::BUTTONS_MAX;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    FromRepr,
    EnumIter,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Button {
    Trigger = 0,
    Grip = 1,
    AX = 2,
    BY = 3,
    Thumbstick = 4,
    ThumbstickUp = 5,
    ThumbstickDown = 6,
    ThumbstickLeft = 7,
    ThumbstickRight = 8,
}

impl Button {
    /// Every polled button id, `0..=BUTTONS_MAX`
    pub fn polled() -> impl Iterator<Item = Button> {
        (0..=BUTTONS_MAX).filter_map(Button::from_repr)
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Controller {
    Left,
    Right,
    #[default]
    Either,
}

/// Host-side controller state
pub trait InputSource {
    fn is_pressed(&self, controller: Controller, button: Button) -> bool;
}

impl<F> InputSource for F
where
    F: Fn(Controller, Button) -> bool,
{
    fn is_pressed(&self, controller: Controller, button: Button) -> bool {
        self(controller, button)
    }
}
