//! Physical input: the cursor-automation contract.
//!
//! The core only needs three primitives — move the cursor, press the
//! button, release the button — and composes them into the two gestures
//! the game understands: a click and a drag. The actual device or OS
//! automation behind the primitives is a collaborator concern.

use std::time::Duration;

use log::trace;

use crate::layout::Point;

/// How long to wait after a gesture for the game's rendering to catch up.
///
/// This is a fixed, best-effort delay: how long the window actually takes
/// depends on the machine, and a recognition call immediately after a
/// gesture may still observe mid-animation pixels.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Cursor-automation primitives, plus the gesture compositions built on
/// them.
///
/// Implementations provide the three primitives; `click` and `drag` are
/// the only entry points the move executor uses. `settle` blocks the
/// calling thread after each gesture — in-process implementations (the
/// simulated table) override it to return immediately.
pub trait InputDriver {
    /// Move the cursor to an absolute screen position.
    fn move_cursor(&mut self, x: i32, y: i32);

    /// Press the primary button at the current cursor position.
    fn press_button(&mut self);

    /// Release the primary button at the current cursor position.
    fn release_button(&mut self);

    /// Block until the game's rendering has had time to catch up.
    fn settle(&mut self) {
        std::thread::sleep(SETTLE_DELAY);
    }

    /// Click at a position: move, press, release, settle.
    fn click(&mut self, at: Point) {
        trace!("click at {at}");
        self.move_cursor(at.x, at.y);
        self.press_button();
        self.release_button();
        self.settle();
    }

    /// Drag from one position to another: move, press, move, release,
    /// settle.
    fn drag(&mut self, from: Point, to: Point) {
        trace!("drag {from} -> {to}");
        self.move_cursor(from.x, from.y);
        self.press_button();
        self.move_cursor(to.x, to.y);
        self.release_button();
        self.settle();
    }
}
