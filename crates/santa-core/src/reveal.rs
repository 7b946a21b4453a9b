// Reveal session: shows one giver's match at a time on a shared device.
//
// The session owns the installed pairing set so that replacing the set and
// resetting the visible state happen in the same transition.

use tracing::{debug, info};

use crate::pairing::PairingSet;
use crate::roster::{Participant, ParticipantId};

/// What is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    /// No assignment is visible.
    #[default]
    Hidden,
    /// Exactly this giver's assignment is visible.
    Revealed(ParticipantId),
}

#[derive(Debug, Clone, Default)]
pub struct RevealSession {
    pairings: Option<PairingSet>,
    state: RevealState,
}

impl RevealSession {
    pub fn new() -> Self {
        RevealSession::default()
    }

    /// Install a freshly generated set. Always lands in `Hidden`.
    pub fn install(&mut self, pairings: PairingSet) -> &PairingSet {
        self.reset();
        info!("Installed pairing set with {} assignments", pairings.len());
        self.pairings.insert(pairings)
    }

    /// Reveal `giver`'s receiver.
    ///
    /// Replaces whatever was revealed before. A participant who gives nothing
    /// in the current set leaves the session `Hidden` and yields `None`.
    pub fn show(&mut self, giver: &ParticipantId) -> Option<&Participant> {
        let found = self
            .pairings
            .as_ref()
            .and_then(|set| set.receiver_for(giver))
            .is_some();

        if !found {
            debug!("show: {} has no assignment, hiding", giver);
            self.state = RevealState::Hidden;
            return None;
        }

        self.state = RevealState::Revealed(*giver);
        debug!("Revealed assignment for {}", giver);
        self.pairings.as_ref().and_then(|set| set.receiver_for(giver))
    }

    /// Reveal by giver display name. Unknown or shared names behave like an
    /// unknown giver.
    pub fn show_by_name(&mut self, giver_name: &str) -> Option<&Participant> {
        let giver_id = self
            .pairings
            .as_ref()
            .and_then(|set| set.giver_by_name(giver_name))
            .map(|p| p.id);

        match giver_id {
            Some(id) => self.show(&id),
            None => {
                self.state = RevealState::Hidden;
                None
            }
        }
    }

    pub fn hide(&mut self) {
        if self.state != RevealState::Hidden {
            debug!("Assignment hidden");
        }
        self.state = RevealState::Hidden;
    }

    pub fn reset(&mut self) {
        self.state = RevealState::Hidden;
    }

    /// Drop the pairing set and hide everything.
    pub fn clear(&mut self) {
        self.reset();
        self.pairings = None;
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state == RevealState::Hidden
    }

    pub fn pairings(&self) -> Option<&PairingSet> {
        self.pairings.as_ref()
    }

    /// The visible (giver, receiver) pair, if any.
    pub fn revealed(&self) -> Option<(&Participant, &Participant)> {
        let RevealState::Revealed(giver_id) = self.state else {
            return None;
        };
        let set = self.pairings.as_ref()?;
        set.assignments()
            .iter()
            .find(|a| a.giver.id == giver_id)
            .map(|a| (&a.giver, &a.receiver))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::PairingEngine;
    use crate::roster::{Group, Roster};

    fn alice_and_bob() -> (RevealSession, Participant, Participant) {
        let mut roster = Roster::new();
        let alice = roster.add("Alice", Group::Adult).unwrap();
        let bob = roster.add("Bob", Group::Adult).unwrap();
        let snap = roster.snapshot();
        let set = PairingEngine::seeded(1).generate(&snap.adults, &snap.kids);

        let mut session = RevealSession::new();
        session.install(set);
        (session, alice, bob)
    }

    #[test]
    fn starts_hidden_without_pairings() {
        let mut session = RevealSession::new();
        assert!(session.is_hidden());
        assert!(session.pairings().is_none());
        assert!(session.show_by_name("Alice").is_none());
        assert!(session.revealed().is_none());
    }

    #[test]
    fn show_then_hide_round_trips_to_hidden() {
        let (mut session, alice, _) = alice_and_bob();
        let initial = session.state();

        assert_eq!(session.show(&alice.id).unwrap().name, "Bob");
        assert_eq!(session.state(), RevealState::Revealed(alice.id));
        session.hide();
        assert_eq!(session.state(), initial);
    }

    #[test]
    fn alice_and_bob_scenario_by_name() {
        let (mut session, _, _) = alice_and_bob();
        assert_eq!(session.show_by_name("Alice").unwrap().name, "Bob");
        session.hide();
        assert_eq!(session.show_by_name("Bob").unwrap().name, "Alice");
    }

    #[test]
    fn second_show_replaces_first() {
        let (mut session, alice, bob) = alice_and_bob();
        session.show(&alice.id);
        session.show(&bob.id);

        assert_eq!(session.state(), RevealState::Revealed(bob.id));
        let (giver, receiver) = session.revealed().unwrap();
        assert_eq!(giver.name, "Bob");
        assert_eq!(receiver.name, "Alice");
    }

    #[test]
    fn unknown_giver_hides_previous_reveal() {
        let (mut session, alice, _) = alice_and_bob();
        session.show(&alice.id);

        assert!(session.show_by_name("Mallory").is_none());
        assert!(session.is_hidden());
        assert!(session.show(&ParticipantId::new()).is_none());
        assert!(session.is_hidden());
    }

    #[test]
    fn install_resets_to_hidden() {
        let (mut session, alice, _) = alice_and_bob();
        session.show(&alice.id);

        session.install(PairingSet::empty());
        assert!(session.is_hidden());
        assert!(session.revealed().is_none());
    }

    #[test]
    fn clear_drops_pairings() {
        let (mut session, alice, _) = alice_and_bob();
        session.show(&alice.id);
        session.clear();

        assert!(session.is_hidden());
        assert!(session.pairings().is_none());
        assert!(session.show(&alice.id).is_none());
    }
}
