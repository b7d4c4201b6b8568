//! Headless replay of a five-tab screen.
//!
//! Runs the three threads a real host would: an input thread that replays
//! touches, the UI thread that owns the widget and a render thread that pulls
//! indicator frames. Pass a JSON `TabsConfig` path as the first argument to
//! override the defaults.

mod script;

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use smooth_tabs::{
    IndicatorFrame, LayoutRect, TabContainer, TabDescriptor, TabsConfig, TabsError, TabsStyle,
    UiMessage, pager::PagerModel, strip::StripScroll, ui_channel,
};
use tracing::{debug, error, info};

const TITLES: [&str; 5] = ["Popular", "Top Rated", "Upcoming", "Now Playing", "Trending"];
const FRAME: Duration = Duration::from_millis(16);
const TAB_HEIGHT: f32 = 48.0;
const TAB_GAP: f32 = 12.0;
const CONTENT_PADDING: f32 = 16.0;
const SWIPE_START_FRAME: u32 = 110;
const SWIPE_FRAMES: u32 = 20;
const TOTAL_FRAMES: u32 = 240;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Tabs(#[from] TabsError),
    #[error("{0} thread panicked")]
    Thread(&'static str),
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,smooth_tabs=debug,smooth_tabs_example=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init();
}

fn load_config() -> Result<TabsConfig, DemoError> {
    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return Ok(TabsConfig::default());
    };
    let text = std::fs::read_to_string(&path).map_err(|source| DemoError::Io {
        path: path.clone(),
        source,
    })?;
    let config =
        serde_json::from_str(&text).map_err(|source| DemoError::Config { path, source })?;
    info!(?config, "loaded config");
    Ok(config)
}

/// Lays the labels out left to right, sized roughly by their text.
fn layout_labels() -> Vec<LayoutRect> {
    let mut x = CONTENT_PADDING;
    TITLES
        .iter()
        .map(|title| {
            let width = 48.0 + title.chars().count() as f32 * 8.5;
            let rect = LayoutRect::new(x, 0.0, width, TAB_HEIGHT);
            x += width + TAB_GAP;
            rect
        })
        .collect()
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    let tabs = TITLES
        .iter()
        .enumerate()
        .map(|(index, title)| TabDescriptor::new(index, *title))
        .collect();
    let pager = PagerModel::new(TITLES.len(), config.viewport_width, config.pager);
    let strip = StripScroll::new(config.viewport_width, config.strip_spring);
    let mut container =
        TabContainer::new(tabs, TITLES.len(), pager, strip, config, TabsStyle::default())?;

    let (dispatcher, inbox) = ui_channel();
    for (index, rect) in layout_labels().into_iter().enumerate() {
        dispatcher.post(UiMessage::Measured { index, rect });
    }
    let applied = container.pump(&inbox);
    debug!(applied, "initial layout applied");

    let stop = Arc::new(AtomicBool::new(false));
    let latest = Arc::new(Mutex::new(IndicatorFrame::default()));

    let render = {
        let mut driver = container.indicator_driver();
        let stop = stop.clone();
        let latest = latest.clone();
        thread::Builder::new()
            .name("render".into())
            .spawn(move || {
                let mut last = Instant::now();
                let mut frames = 0u64;
                while !stop.load(Ordering::Acquire) {
                    let now = Instant::now();
                    let frame = driver.next_frame(now - last);
                    last = now;
                    frames += 1;
                    *latest.lock() = frame;
                    thread::sleep(FRAME);
                }
                info!(frames, skipped = driver.skipped_frames(), "render loop stopped");
            })
            .map_err(|_| DemoError::Thread("render"))?
    };

    let input = {
        let mut strip_input = container.gesture_input(dispatcher.clone());
        let rects = layout_labels();
        thread::Builder::new()
            .name("input".into())
            .spawn(move || script::replay(&mut strip_input, &rects))
            .map_err(|_| DemoError::Thread("input"))?
    };

    let dt = FRAME.as_secs_f32();
    for frame in 0..TOTAL_FRAMES {
        container.pump(&inbox);

        if frame == SWIPE_START_FRAME {
            info!(from = container.active_tab(), "swiping content");
            container.pager_mut().begin_drag();
        }
        if (SWIPE_START_FRAME..SWIPE_START_FRAME + SWIPE_FRAMES).contains(&frame) {
            let step = -config.viewport_width * 0.6 / SWIPE_FRAMES as f32;
            if let Some(event) = container.pager_mut().drag_by(step) {
                container.on_page_event(event);
            }
        }
        if frame == SWIPE_START_FRAME + SWIPE_FRAMES {
            container.pager_mut().end_drag(0.0);
        }

        for event in container.pager_mut().tick(dt) {
            container.on_page_event(event);
        }
        container.strip_mut().tick(dt);

        if frame % 30 == 0 {
            let indicator = *latest.lock();
            info!(
                frame,
                active = container.active_tab(),
                progress = container.scroll_progress(),
                strip_offset = container.strip().offset(),
                indicator_x = indicator.rect.x,
                indicator_width = indicator.rect.width,
                scale = indicator.scale,
                "tick"
            );
        }
        thread::sleep(FRAME);
    }

    input.join().map_err(|_| DemoError::Thread("input"))?;
    container.pump(&inbox);
    stop.store(true, Ordering::Release);
    render.join().map_err(|_| DemoError::Thread("render"))?;

    for item in container.tab_items() {
        info!(
            index = item.index,
            title = %item.title,
            active = item.is_active,
            "tab"
        );
    }
    info!(
        active = container.active_tab(),
        trigger = ?container.trigger_mode(),
        strip_offset = container.strip().offset(),
        "done"
    );
    Ok(())
}
