//! Terminal Blockfall runner.
//!
//! Wires the controller to a crossterm terminal, the system clock and a JSON
//! high-score file. Configuration comes from `BLOCKFALL_*` environment
//! variables (see [`GameConfig::from_env`]).

use std::fs::File;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::LevelFilter;
use simplelog::WriteLogger;

use blockfall::core::GameState;
use blockfall::engine::{Clock, Controller, FramePacer, GameConfig, JsonFileStore, SystemClock};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, Screen, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    setup_logging(&config);
    log::info!(
        "starting: seed {}, scores at {}",
        config.seed,
        config.scores_path.display()
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("terminated with error: {:#}", e);
    }
    result
}

/// Log to a file; stdout belongs to the game screen.
fn setup_logging(config: &GameConfig) {
    let Some(path) = &config.log_path else {
        return;
    };
    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("could not open log file {}: {}", path.display(), e);
            return;
        }
    };
    let log_config = simplelog::ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();
    if let Err(e) = WriteLogger::init(config.log_level, log_config, file) {
        eprintln!("could not initialise logging: {}", e);
    }
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let mut controller = Controller::new(
        GameState::new(config.seed),
        Screen::new(),
        JsonFileStore::new(&config.scores_path),
        SystemClock::new(),
    );

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut pacer = FramePacer::new(FRAME_MS as u64, controller.clock().now_ms());

    loop {
        // Line clears resolve even while paused.
        controller.fire_due_timers();

        // The tick is consumed even when no frame is wanted, so the poll
        // below always waits while idle, paused or over.
        if pacer.poll(controller.clock().now_ms()) && controller.frame_requested() {
            controller.frame();
        }

        if controller.renderer_mut().take_dirty() {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(controller.renderer(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        let timeout = Duration::from_millis(pacer.timeout_ms(controller.clock().now_ms()));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key, controller.is_playing()) {
                        controller.handle_command(command);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    controller.renderer_mut().mark_dirty();
                }
                _ => {}
            }
        }
    }
}
