//! keysynth - Terminal sine keyboard
//!
//! Run with: cargo run
//!
//! Environment:
//!   KEYSYNTH_GAIN      starting gain (0.0 - 1.0)
//!   KEYSYNTH_LOG       tracing filter, e.g. `debug` or `keysynth=trace`
//!   KEYSYNTH_LOG_FILE  log destination (defaults to keysynth.log in the temp dir)

mod app;
mod input;
mod logging;
mod ui;

use app::Keysynth;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;

    let mut app = Keysynth::new();
    if let Some(gain) = std::env::var("KEYSYNTH_GAIN")
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
    {
        app = app.gain(gain);
    }

    app.run()
}
