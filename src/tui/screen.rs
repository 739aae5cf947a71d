use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{App, AuthMode, Level, LoginField, Message};
use crate::model::Task;
use crate::store::Store;

const HELP_TEXT: &str = "\
j/k, Up/Down   move selection
a              add task
d, x           mark as done
i              mark as important
r              add reminder
D, Delete      delete task
L              logout
?              toggle this help
q, Esc         quit";

pub fn render(frame: &mut Frame, app: &App, store: &Store) {
    match app.session.username() {
        Some(username) => render_tasks(frame, app, store, username),
        None => render_login(frame, app),
    }

    if let Some(prompt) = &app.prompt {
        let area = centered_rect(60, 7, frame.area());
        frame.render_widget(Clear, area);
        let text = vec![
            Line::from(prompt.label()),
            Line::from(""),
            Line::from(Span::styled(
                format!("{}_", prompt.input),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                "Enter to confirm, Esc to cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", prompt.title())),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    if app.show_help {
        let area = centered_rect(50, 13, frame.area());
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(HELP_TEXT).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys "),
        );
        frame.render_widget(paragraph, area);
    }
}

fn render_login(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 14, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" To-Do List App ")
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(Color::LightBlue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::Black).bg(Color::LightBlue).bold(),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
        }
    };
    let tabs = Line::from(vec![
        tab("Login", app.login.mode == AuthMode::Login),
        Span::raw(" "),
        tab("Register", app.login.mode == AuthMode::Register),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(tabs), chunks[0]);

    let masked = "*".repeat(app.login.password.chars().count());
    render_field(
        frame,
        chunks[1],
        "Username",
        &app.login.username,
        app.login.focused == LoginField::Username,
    );
    render_field(
        frame,
        chunks[2],
        "Password",
        &masked,
        app.login.focused == LoginField::Password,
    );

    let hint = Paragraph::new("Tab field  Left/Right mode  Enter submit  Esc quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[3]);

    if let Some(message) = &app.message {
        frame.render_widget(message_line(message), chunks[4]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if focused { "_" } else { "" };
    let paragraph = Paragraph::new(format!("{value}{cursor}")).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {title} ")),
    );
    frame.render_widget(paragraph, area);
}

fn render_tasks(frame: &mut Frame, app: &App, store: &Store, username: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(Span::styled(
        format!("Welcome {username}"),
        Style::default().fg(Color::LightBlue).bold(),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = app
        .session
        .user(store)
        .map(|user| {
            user.tasks
                .iter()
                .map(|task| ListItem::new(task.describe()).style(task_style(task)))
                .collect()
        })
        .unwrap_or_default();
    let empty = items.is_empty();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Tasks "))
        .highlight_style(Style::default().bg(Color::DarkGray).bold());
    let mut state = ListState::default();
    if !empty {
        state.select(Some(app.cursor));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let keys = Paragraph::new("a add  d done  D delete  r remind  i important  L logout  ? help  q quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(keys, chunks[2]);

    if let Some(message) = &app.message {
        frame.render_widget(message_line(message), chunks[3]);
    }
}

fn task_style(task: &Task) -> Style {
    if task.completed {
        Style::default().fg(Color::DarkGray)
    } else if task.important {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn message_line(message: &Message) -> Paragraph<'_> {
    let color = match message.level {
        Level::Info => Color::Green,
        Level::Warning => Color::Yellow,
        Level::Error => Color::Red,
    };
    Paragraph::new(message.text.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
}

/// A rectangle `percent_x` wide and `height` rows tall, centered in `r`.
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
