// Terminal front end: layout, input handling, and rendering.
//
// The TUI owns a `ViewState` that mirrors the latest `ViewSnapshot` plus
// local editing state (the name being typed, the selected row). The app task
// pushes `UiUpdate` messages over an mpsc channel; the TUI applies them and
// re-renders at ~30 fps.

pub mod input;
pub mod layout;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::layout::Alignment;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use santa_core::{Group, Participant, Screen};

use crate::protocol::{RevealedMatch, UiUpdate, UserCommand, ViewSnapshot};
use layout::{build_layout, build_setup_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state.
pub struct ViewState {
    /// Latest snapshot from the app task.
    pub snapshot: ViewSnapshot,
    /// Name being typed on the setup screen.
    pub name_input: String,
    /// Group the next added participant joins.
    pub input_group: Group,
    /// Selected row: roster rows on setup, names on reveal.
    pub selected: usize,
    /// Quit confirmation prompt is showing.
    pub confirm_quit: bool,
    /// One-line message for the status line.
    pub status: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: ViewSnapshot::default(),
            name_input: String::new(),
            input_group: Group::Adult,
            selected: 0,
            confirm_quit: false,
            status: None,
        }
    }
}

impl ViewState {
    /// Replace the snapshot and keep the selection inside the new list.
    pub fn apply_snapshot(&mut self, snapshot: ViewSnapshot) {
        if snapshot.screen != self.snapshot.screen {
            self.selected = 0;
        }
        self.snapshot = snapshot;

        let len = match self.snapshot.screen {
            Screen::Setup => self.snapshot.roster_len(),
            Screen::Reveal => self.snapshot.reveal_list.len(),
        };
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::Rejected(message) => state.status = Some(message),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    render_title(frame, &layout, state);
    match state.snapshot.screen {
        Screen::Setup => render_setup(frame, &layout, state),
        Screen::Reveal => render_reveal(frame, &layout, state),
    }
    render_status_line(frame, &layout, state);
    render_help_bar(frame, &layout, state);
}

fn render_title(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let (title, subtitle) = match state.snapshot.screen {
        Screen::Setup => (
            "Secret Santa Generator",
            "Create gift exchanges with complete privacy",
        ),
        Screen::Reveal => (
            "Secret Santa Reveal",
            "Pass the device around. Each person picks their name to see their match privately.",
        ),
    };
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, layout.title);
}

fn render_setup(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let setup = build_setup_layout(layout.body);

    let entry = Line::from(vec![
        Span::raw(" Name: "),
        Span::styled(
            format!("{}_", state.name_input),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Group: "),
        Span::styled(
            format!("[{}]", state.input_group),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(entry).block(Block::default().borders(Borders::ALL).title("Add Participants")),
        setup.entry,
    );

    let adults = &state.snapshot.adults;
    let kids = &state.snapshot.kids;
    let adult_title = format!("Adults ({})", count_label(adults.len(), "person", "people"));
    let kid_title = format!("Kids ({})", count_label(kids.len(), "kid", "kids"));

    frame.render_widget(
        group_list(adults, 0, state.selected, "No adults added yet", &adult_title),
        setup.adults,
    );
    frame.render_widget(
        group_list(kids, adults.len(), state.selected, "No kids added yet", &kid_title),
        setup.kids,
    );

    let generate = if state.snapshot.can_generate {
        Line::from(Span::styled(
            " F5: Generate Secret Santa Pairings",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {}", input::GENERATE_HINT),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(
        Paragraph::new(generate).block(Block::default().borders(Borders::ALL)),
        setup.generate,
    );
}

/// One group's column. `offset` is where this group starts in the combined
/// adults-then-kids selection index.
fn group_list<'a>(
    members: &'a [Participant],
    offset: usize,
    selected: usize,
    empty_text: &'a str,
    title: &'a str,
) -> Paragraph<'a> {
    let lines: Vec<Line> = if members.is_empty() {
        vec![Line::from(Span::styled(empty_text, Style::default().fg(Color::DarkGray)))]
    } else {
        members
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let style = if offset + i == selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!(" {}", p.name), style))
            })
            .collect()
    };
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title))
}

fn render_reveal(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    // While a match is showing, nothing else is drawn in the body.
    if let Some(ref shown) = state.snapshot.revealed {
        frame.render_widget(reveal_card(shown), layout.body);
        return;
    }

    let lines: Vec<Line> = state
        .snapshot
        .reveal_list
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let style = if i == state.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {} ", p.name), style))
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Pick Your Name")),
        layout.body,
    );
}

fn reveal_card(shown: &RevealedMatch) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(format!("{}, you're giving a gift to:", shown.giver.name)),
        Line::from(""),
        Line::from(Span::styled(
            shown.receiver_name.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: Hide (Pass to Next Person)",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Your Match"))
}

fn render_status_line(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.confirm_quit {
        " Quit? (y/n)".to_string()
    } else {
        state
            .status
            .as_deref()
            .map(|s| format!(" {s}"))
            .unwrap_or_default()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(Color::Yellow))),
        layout.status_line,
    );
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = match state.snapshot.screen {
        Screen::Setup => " Enter:Add | Tab:Adult/Kid | Up/Down:Select | Del:Remove | F5:Generate | Esc:Quit",
        Screen::Reveal if state.snapshot.revealed.is_some() => " Enter:Hide",
        Screen::Reveal => " Up/Down:Select | Enter:Reveal | s:Start Over | q:Quit",
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

fn count_label(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over UI updates, keyboard input, and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App task has shut down
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events are redrawn on the next tick
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
