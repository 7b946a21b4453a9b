// Session orchestration: roster edits, generation, reveal, and start over.
//
// A `Session` is the single object a front end drives. Every method is one
// discrete transition; nothing here blocks or is shared across threads.

use tracing::{info, warn};

use crate::config::Config;
use crate::error::ValidationError;
use crate::pairing::{PairingEngine, PairingSet};
use crate::reveal::{RevealSession, RevealState};
use crate::roster::{Group, Participant, ParticipantId, Roster, RosterSnapshot};

/// Which screen the exchange is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Building the participant list.
    #[default]
    Setup,
    /// Passing the device around to reveal matches.
    Reveal,
}

pub struct Session {
    roster: Roster,
    engine: PairingEngine,
    reveal: RevealSession,
    screen: Screen,
}

impl Session {
    pub fn new(engine: PairingEngine) -> Self {
        Session {
            roster: Roster::new(),
            engine,
            reveal: RevealSession::new(),
            screen: Screen::Setup,
        }
    }

    /// Build a session from config: seeded engine if `pairing.seed` is set,
    /// and the preset roster already added.
    pub fn from_config(config: &Config) -> Result<Self, ValidationError> {
        let engine = match config.pairing.seed {
            Some(seed) => {
                info!("Using fixed pairing seed {}", seed);
                PairingEngine::seeded(seed)
            }
            None => PairingEngine::from_entropy(),
        };

        let mut session = Session::new(engine);
        for preset in &config.roster {
            session.add_participant(&preset.name, preset.group)?;
        }
        Ok(session)
    }

    // --- roster ---

    pub fn add_participant(
        &mut self,
        name: &str,
        group: Group,
    ) -> Result<Participant, ValidationError> {
        self.roster.add(name, group)
    }

    /// Remove by id. An installed pairing set is a snapshot and is unaffected.
    pub fn remove_participant(&mut self, id: &ParticipantId) -> bool {
        self.roster.remove(id)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        self.roster.snapshot()
    }

    pub fn can_generate(&self) -> bool {
        self.roster.can_generate()
    }

    // --- pairing ---

    /// Generate a fresh pairing set from the current roster and switch to the
    /// reveal screen. The reveal state is `Hidden` afterwards, whatever it was.
    pub fn generate(&mut self) -> &PairingSet {
        if !self.can_generate() {
            warn!("Generating with no group of two or more; the set will be empty");
        }
        let snapshot = self.roster.snapshot();
        let set = self.engine.generate(&snapshot.adults, &snapshot.kids);
        self.screen = Screen::Reveal;
        self.reveal.install(set)
    }

    pub fn pairings(&self) -> Option<&PairingSet> {
        self.reveal.pairings()
    }

    // --- reveal ---

    pub fn reveal(&mut self, giver: &ParticipantId) -> Option<&Participant> {
        self.reveal.show(giver)
    }

    pub fn reveal_by_name(&mut self, giver_name: &str) -> Option<&Participant> {
        self.reveal.show_by_name(giver_name)
    }

    pub fn hide(&mut self) {
        self.reveal.hide();
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal.state()
    }

    /// The visible (giver, receiver) pair, if any.
    pub fn revealed(&self) -> Option<(&Participant, &Participant)> {
        self.reveal.revealed()
    }

    // --- lifecycle ---

    /// Discard the pairing set, hide everything, and go back to setup.
    pub fn start_over(&mut self, clear_roster: bool) {
        self.reveal.clear();
        if clear_roster {
            self.roster.clear();
        }
        self.screen = Screen::Setup;
        info!("Started over (roster cleared: {})", clear_roster);
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
