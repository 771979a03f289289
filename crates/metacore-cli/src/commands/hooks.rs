//! Hooks command implementation.

use metacore_core::HookPoint;

/// List every interception point, marking the ones that replace the
/// host's implementation instead of wrapping it
pub fn run() {
    for point in HookPoint::all() {
        if point.replaces_original() {
            println!("{} (replaced)", point);
        } else {
            println!("{}", point);
        }
    }
}
