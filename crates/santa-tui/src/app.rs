// Application state and orchestration logic.
//
// The app task owns the `Session`. It applies user commands from the TUI one
// at a time and pushes a fresh `ViewSnapshot` after each, so the core never
// sees two operations at once.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use santa_core::{Screen, Session};

use crate::protocol::{RevealedMatch, UiUpdate, UserCommand, ViewSnapshot};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub session: Session,
    /// Whether "start over" also empties the roster.
    pub clear_roster_on_start_over: bool,
}

impl AppState {
    pub fn new(session: Session, clear_roster_on_start_over: bool) -> Self {
        AppState {
            session,
            clear_roster_on_start_over,
        }
    }

    /// Build a `ViewSnapshot` from the session.
    ///
    /// Only the revealed giver's receiver is copied out; the rest of the
    /// pairing set stays inside the session.
    pub fn build_snapshot(&self) -> ViewSnapshot {
        let roster = self.session.snapshot();
        let reveal_list = self
            .session
            .pairings()
            .map(|set| set.participants().to_vec())
            .unwrap_or_default();
        let revealed = self
            .session
            .revealed()
            .map(|(giver, receiver)| RevealedMatch {
                giver: giver.clone(),
                receiver_name: receiver.name.clone(),
            });

        ViewSnapshot {
            screen: self.session.screen(),
            can_generate: roster.can_generate(),
            adults: roster.adults,
            kids: roster.kids,
            reveal_list,
            revealed,
        }
    }

    /// Apply one user command. Returns a rejection message for the status
    /// line when the command could not be carried out.
    pub fn apply(&mut self, cmd: UserCommand) -> Option<String> {
        match cmd {
            UserCommand::AddParticipant { name, group } => {
                if self.session.screen() != Screen::Setup {
                    return Some("Start over to edit the participant list".into());
                }
                match self.session.add_participant(&name, group) {
                    Ok(_) => None,
                    Err(e) => {
                        warn!("Rejected participant '{}': {}", name, e);
                        Some(e.to_string())
                    }
                }
            }
            UserCommand::RemoveParticipant(id) => {
                if self.session.screen() != Screen::Setup {
                    return Some("Start over to edit the participant list".into());
                }
                self.session.remove_participant(&id);
                None
            }
            UserCommand::Generate => {
                if !self.session.can_generate() {
                    return Some("Add at least 2 people in one group to generate pairings".into());
                }
                let count = self.session.generate().len();
                info!("Pairings generated: {} assignments", count);
                None
            }
            UserCommand::Reveal(id) => {
                if self.session.screen() != Screen::Reveal {
                    return None;
                }
                if self.session.reveal(&id).is_none() {
                    debug!("No match to reveal for {}", id);
                }
                None
            }
            UserCommand::Hide => {
                self.session.hide();
                None
            }
            UserCommand::StartOver => {
                self.session.start_over(self.clear_roster_on_start_over);
                None
            }
            UserCommand::Quit => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the app task until `Quit` arrives or the command channel closes.
///
/// Sends an initial snapshot, then one snapshot per command.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(state.build_snapshot())))
        .await;

    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == UserCommand::Quit {
            info!("Quit command received, shutting down");
            break;
        }

        debug!("Handling command: {}", command_label(&cmd));
        if let Some(message) = state.apply(cmd) {
            let _ = ui_tx.send(UiUpdate::Rejected(message)).await;
        }
        let _ = ui_tx
            .send(UiUpdate::StateSnapshot(Box::new(state.build_snapshot())))
            .await;
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Command name for logs. Ids and names stay out of the log so a reveal
/// cannot be reconstructed from it.
fn command_label(cmd: &UserCommand) -> &'static str {
    match cmd {
        UserCommand::AddParticipant { .. } => "AddParticipant",
        UserCommand::RemoveParticipant(_) => "RemoveParticipant",
        UserCommand::Generate => "Generate",
        UserCommand::Reveal(_) => "Reveal",
        UserCommand::Hide => "Hide",
        UserCommand::StartOver => "StartOver",
        UserCommand::Quit => "Quit",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
