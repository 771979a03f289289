//! Events command implementation.

use metacore_core::EventKind;

/// List every built-in event name
pub fn run() {
    for kind in EventKind::BUILTIN {
        println!("{}", kind);
    }
}
