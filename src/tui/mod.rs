pub mod app;
pub mod event;
mod screen;

use std::io;

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;

use crate::store::Store;
use app::{App, Flow};

pub fn run(store: &mut Store) -> Result<()> {
    let mut app = App::new();

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, store);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    loop {
        terminal.draw(|frame| screen::render(frame, app, store))?;

        if let Event::Key(key) = ct_event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let action = event::handle_key(app, store, key);
            if app.perform(store, action) == Flow::Quit {
                return Ok(());
            }
        }
    }
}
