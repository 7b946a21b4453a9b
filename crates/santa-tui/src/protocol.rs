// Messages between the TUI task and the app task.
//
// The TUI sends `UserCommand`s; the app answers each one with a
// `UiUpdate::StateSnapshot`. A snapshot never carries the pairing set itself,
// only the receiver of the giver whose match is currently revealed.

use santa_core::{Group, Participant, ParticipantId, Screen};

/// Actions the user can take, forwarded from the TUI to the app task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    AddParticipant { name: String, group: Group },
    RemoveParticipant(ParticipantId),
    Generate,
    Reveal(ParticipantId),
    Hide,
    StartOver,
    Quit,
}

/// Updates pushed from the app task to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    StateSnapshot(Box<ViewSnapshot>),
    /// A command was rejected; the text is shown in the status line.
    Rejected(String),
}

/// The match currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedMatch {
    pub giver: Participant,
    pub receiver_name: String,
}

/// Everything the TUI needs to draw one frame.
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    pub screen: Screen,
    /// Current roster, adults in insertion order.
    pub adults: Vec<Participant>,
    /// Current roster, kids in insertion order.
    pub kids: Vec<Participant>,
    pub can_generate: bool,
    /// Names to pick from on the reveal screen (the frozen pairing snapshot,
    /// in roster order).
    pub reveal_list: Vec<Participant>,
    pub revealed: Option<RevealedMatch>,
}

impl ViewSnapshot {
    /// Setup-screen rows: adults then kids.
    pub fn roster_rows(&self) -> impl Iterator<Item = &Participant> {
        self.adults.iter().chain(&self.kids)
    }

    pub fn roster_len(&self) -> usize {
        self.adults.len() + self.kids.len()
    }
}
