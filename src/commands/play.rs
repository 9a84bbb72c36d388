//! Play subcommand handler

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::style::{Attribute, ResetColor, SetAttribute};

use ttyplay::player::{run, LoopTimer, PlaybackResult, Player, WriterSink};
use ttyplay::source::read_recording;
use ttyplay::PlaybackConfig;

/// Replay `file` to stdout until it finishes or Ctrl-C is pressed.
///
/// `speed` and `max_delay_ms` override the configured values.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    file: &Path,
    mut playback: PlaybackConfig,
    speed: Option<f64>,
    max_delay_ms: Option<u64>,
) -> Result<()> {
    if let Some(speed) = speed {
        playback.speed = speed;
    }
    if let Some(max_delay_ms) = max_delay_ms {
        playback.max_delay_ms = max_delay_ms;
    }
    playback.autostart = true;

    let sink = WriterSink::new(io::stdout());
    let mut player = Player::new(sink, LoopTimer::new(), &playback)
        .context("Invalid playback settings")?
        .with_decoder(super::decoder());

    let (interrupt_tx, interrupt_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.send(());
    })
    .context("Failed to install Ctrl-C handler")?;

    player
        .open(read_recording(file))
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let result = run(&mut player, &interrupt_rx);
    let frames = player.state().len();
    let cursor = player.cursor();
    let failed = player.sink().failed_writes();
    if failed > 0 {
        tracing::warn!(failed, "some frames could not be written to stdout");
    }

    if result == PlaybackResult::Interrupted {
        let mut stdout = player.into_sink().into_inner();
        if stdout.is_terminal() {
            restore_terminal(&mut stdout).context("Failed to restore terminal")?;
        }
        eprintln!("Stopped at frame {}/{}", cursor, frames);
    }

    Ok(())
}

/// Undo styling a cut-off recording may have left active.
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    crossterm::execute!(
        out,
        SetAttribute(Attribute::Reset),
        ResetColor,
        crossterm::cursor::Show
    )?;
    writeln!(out)
}
