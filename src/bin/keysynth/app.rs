//! Keysynth - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use rtrb::RingBuffer;

use keysynth::synth::{control::DEFAULT_GAIN, VoiceBank, VoiceControls};

use super::input::KeyMode;
use super::ui::{StreamInfo, UiApp, VIS_BUFFER_SIZE};

/// Capacity in visualisation windows for the audio -> UI ring
const AUDIO_RING_BLOCKS: usize = 16;

/// Main application builder
pub struct Keysynth {
    gain: f32,
}

impl Keysynth {
    pub fn new() -> Self {
        Self { gain: DEFAULT_GAIN }
    }

    /// Starting gain, clamped to [0, 1] like any later change.
    pub fn gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Open the default output device and run the terminal UI until quit.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;
        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(eyre!(
                "output device uses {:?} samples, keysynth needs f32",
                config.sample_format()
            ));
        }

        let sample_rate = config.sample_rate().0;
        let channels = config.channels();
        tracing::info!(
            device = %device.name().unwrap_or_else(|_| "unknown".into()),
            sample_rate,
            channels,
            "opened output device"
        );

        let controls = VoiceControls::new(self.gain);
        let mut bank = VoiceBank::new(controls.clone());
        bank.configure(sample_rate)
            .wrap_err("failed to configure voice bank")?;

        // Mono copy of the output for the scope, dropped when the UI lags.
        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * AUDIO_RING_BLOCKS);
        let frame_len = channels as usize;

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    bank.render_interleaved(data, frame_len);

                    for &s in data.iter().step_by(frame_len.max(1)) {
                        if audio_tx.push(s).is_err() {
                            break;
                        }
                    }
                },
                |err| tracing::error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let terminal = ratatui::init();
        let info = StreamInfo {
            sample_rate,
            channels,
        };
        let res = run_ui(terminal, controls.clone(), audio_rx, info);
        ratatui::restore();

        controls.release_all();
        drop(stream);
        tracing::info!("audio stream closed");
        res
    }
}

impl Default for Keysynth {
    fn default() -> Self {
        Self::new()
    }
}

fn run_ui(
    mut terminal: ratatui::DefaultTerminal,
    controls: VoiceControls,
    audio_rx: rtrb::Consumer<f32>,
    info: StreamInfo,
) -> EyreResult<()> {
    let mut stdout = std::io::stdout();

    // Hold-to-play needs key release events, which only terminals with the
    // keyboard enhancement protocol report.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    execute!(stdout, EnableFocusChange)?;

    let mode = if enhanced { KeyMode::Hold } else { KeyMode::Toggle };
    tracing::info!(?mode, "keyboard mode selected");

    let res = UiApp::new(controls, audio_rx, info, mode).run(&mut terminal);

    execute!(stdout, DisableFocusChange)?;
    if enhanced {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    res
}
