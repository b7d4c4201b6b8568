//! Scripted touches for the input thread.

use std::{
    thread,
    time::{Duration, Instant},
};

use smooth_tabs::{LayoutRect, Point, PointerEvent, TabStripInput};
use tracing::info;

const POLL: Duration = Duration::from_millis(16);

fn centre(rect: &LayoutRect) -> Point {
    Point::new(rect.center_x(), rect.y + rect.height / 2.0)
}

/// Holds the pointer down at `position` for `hold`, polling the long-press
/// timer the way a platform input loop would.
fn press(input: &mut TabStripInput, position: Point, hold: Duration) {
    let down = Instant::now();
    input.handle(PointerEvent::Down { position, at: down });
    while down.elapsed() < hold {
        thread::sleep(POLL);
        input.poll(Instant::now());
    }
    input.handle(PointerEvent::Up {
        position,
        at: Instant::now(),
    });
}

/// Taps "Upcoming", long-presses "Now Playing", then drags off a label so
/// neither gesture fires.
pub fn replay(input: &mut TabStripInput, rects: &[LayoutRect]) {
    thread::sleep(Duration::from_millis(200));
    if let Some(rect) = rects.get(2) {
        info!("tap on tab 2");
        press(input, centre(rect), Duration::from_millis(80));
    }

    thread::sleep(Duration::from_millis(300));
    if let Some(rect) = rects.get(3) {
        info!("long press on tab 3");
        press(input, centre(rect), Duration::from_millis(900));
    }

    thread::sleep(Duration::from_millis(100));
    if let Some(rect) = rects.get(1) {
        info!("drag across tab 1");
        let start = centre(rect);
        input.handle(PointerEvent::Down {
            position: start,
            at: Instant::now(),
        });
        thread::sleep(POLL);
        input.handle(PointerEvent::Move {
            position: Point::new(start.x + 40.0, start.y),
            at: Instant::now(),
        });
        thread::sleep(POLL);
        input.handle(PointerEvent::Cancel { at: Instant::now() });
    }
}
