use std::env;
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures_util::StreamExt;
use log::{debug, error, info};
use voicecraft::app::App;
use voicecraft::config::Settings;
use voicecraft::event::Event;
use voicecraft::tui::{self, Tui};
use voicecraft::{data, logging, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let root = env::current_dir().context("failed to resolve working directory")?;
    let settings = Settings::load(&root)?;
    logging::init(&root, &settings.logging)?;
    info!(
        "Starting VoiceCraft ({}, tick {}ms)",
        settings.environment.label(),
        settings.tick_rate_ms
    );

    let service = data::connect(&settings.data_service)?;
    let mut app = App::new(&settings, service);

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = tui::restore();
        default_hook(info);
    }));

    let mut terminal = tui::init().context("failed to initialize terminal")?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore().context("failed to restore terminal")?;

    if let Err(err) = &result {
        error!("VoiceCraft stopped: {:#}", err);
    } else {
        info!("VoiceCraft exited");
    }
    result
}

async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut stream = EventStream::new();
    let mut interval = tokio::time::interval(app.tick_rate());

    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, &*app))?;

        let event = tokio::select! {
            _ = interval.tick() => Event::Tick,
            maybe_event = stream.next() => {
                match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                    Some(Ok(CrosstermEvent::Resize(width, height))) => Event::Resize(width, height),
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => return Err(err).context("terminal event stream failed"),
                    None => break,
                }
            }
        };

        match event {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.handle_key(key),
            Event::Resize(width, height) => debug!("Terminal resized to {}x{}", width, height),
        }
    }
    Ok(())
}
