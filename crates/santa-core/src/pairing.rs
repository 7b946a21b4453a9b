// Pairing generation: one shuffled gift cycle per group.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::roster::{Group, Participant, ParticipantId};

/// One giver -> receiver link. Both sides always belong to the same group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub giver: Participant,
    pub receiver: Participant,
}

impl Assignment {
    pub fn group(&self) -> Group {
        self.giver.group
    }
}

/// The result of one generation run.
///
/// Participants are copied in, so later roster edits never reach an existing
/// set. Regenerating replaces the whole set.
#[derive(Debug, Clone)]
pub struct PairingSet {
    /// Adult cycle first, then kid cycle.
    assignments: Vec<Assignment>,
    /// Members of groups too small to exchange (size 1).
    unmatched: Vec<Participant>,
    /// Everyone in the snapshot, adults then kids, in roster order.
    /// Listing in this order keeps the cycle order off the screen.
    participants: Vec<Participant>,
    generated_at: DateTime<Utc>,
}

impl PairingSet {
    /// A set with no assignments.
    pub fn empty() -> Self {
        PairingSet {
            assignments: Vec::new(),
            unmatched: Vec::new(),
            participants: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Assignments belonging to one group, in cycle order.
    pub fn for_group(&self, group: Group) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(move |a| a.group() == group)
    }

    pub fn unmatched(&self) -> &[Participant] {
        &self.unmatched
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// The receiver for a giver, if that participant gives in this set.
    pub fn receiver_for(&self, giver: &ParticipantId) -> Option<&Participant> {
        self.assignments
            .iter()
            .find(|a| a.giver.id == *giver)
            .map(|a| &a.receiver)
    }

    /// Resolve a giver by display name.
    ///
    /// Returns `None` when no giver has that name, or when two givers share
    /// it; an ambiguous name must not pick one of them silently.
    pub fn giver_by_name(&self, name: &str) -> Option<&Participant> {
        let name = name.trim();
        let mut matches = self.assignments.iter().filter(|a| a.giver.name == name);
        let first = matches.next()?;
        if matches.next().is_some() {
            warn!("Giver name '{}' is shared by several participants", name);
            return None;
        }
        Some(&first.giver)
    }

    /// Receiver lookup by giver display name. See [`PairingSet::giver_by_name`].
    pub fn receiver_for_name(&self, name: &str) -> Option<&Participant> {
        let giver = self.giver_by_name(name)?;
        self.receiver_for(&giver.id)
    }
}

/// Build the gift cycle for a single group.
///
/// Groups with fewer than two members produce no assignments. Otherwise the
/// members are shuffled uniformly (Fisher-Yates via `SliceRandom::shuffle`)
/// and each position `i` gives to position `(i + 1) % n`, so nobody draws
/// themselves and everyone gives and receives exactly once.
pub fn circular_assignments<R: Rng + ?Sized>(group: &[Participant], rng: &mut R) -> Vec<Assignment> {
    if group.len() < 2 {
        return Vec::new();
    }

    let mut shuffled = group.to_vec();
    shuffled.shuffle(rng);

    let n = shuffled.len();
    (0..n)
        .map(|i| Assignment {
            giver: shuffled[i].clone(),
            receiver: shuffled[(i + 1) % n].clone(),
        })
        .collect()
}

/// Produces pairing sets from roster snapshots.
pub struct PairingEngine {
    rng: StdRng,
}

impl PairingEngine {
    /// Engine seeded from OS entropy.
    pub fn from_entropy() -> Self {
        PairingEngine {
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed seed; the same seed and input give the same set.
    pub fn seeded(seed: u64) -> Self {
        PairingEngine {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate assignments for adults and kids independently.
    ///
    /// Callers are expected to check that at least one group has two or more
    /// members first. If neither does, the result is an empty set.
    pub fn generate(&mut self, adults: &[Participant], kids: &[Participant]) -> PairingSet {
        let mut assignments = circular_assignments(adults, &mut self.rng);
        assignments.extend(circular_assignments(kids, &mut self.rng));

        let unmatched: Vec<Participant> = [adults, kids]
            .into_iter()
            .filter(|group| group.len() == 1)
            .flat_map(|group| group.iter().cloned())
            .collect();

        if assignments.is_empty() {
            warn!(
                "Generate called with {} adults and {} kids; no group can exchange",
                adults.len(),
                kids.len()
            );
        } else {
            info!(
                "Generated {} assignments ({} adults, {} kids, {} unmatched)",
                assignments.len(),
                adults.len(),
                kids.len(),
                unmatched.len()
            );
        }

        PairingSet {
            assignments,
            unmatched,
            participants: adults.iter().chain(kids).cloned().collect(),
            generated_at: Utc::now(),
        }
    }
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self::from_entropy()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
