// Depth-first backtracking search for the best-scoring counterpoint.
//
// The solver grows one counterpoint line in place: push a candidate, evaluate
// the prefix, recurse if it is admissible, pop. A rejected prefix is never
// extended (rules.rs guarantees rejections are sticky). Every sibling at every
// level is visited, so the result is the best complete line reachable under
// pruning, not the first one found. A later line replaces the best only with a
// strictly greater score, so equal scores keep the earliest line in candidate
// order and the output is deterministic.
//
// All mutable search state lives in `Solver` and dies with it: independent
// runs share nothing and can run on separate threads.
//
// Recursion depth equals the cantus length (typically under 20 notes). Each
// node checks only the rules touching the newest note (rules.rs), and the
// candidate lists are built once per run. The tree is still exponential: a
// lower voice against a 14-note cantus visits billions of prefixes.
// `SearchConfig::max_nodes` caps the number of evaluated prefixes; the
// `generate` binary applies `DEFAULT_NODE_BUDGET` unless told otherwise.

use crate::cantus::CantusFirmus;
use crate::candidates::candidates;
use crate::pitch::Pitch;
use crate::rules::{RuleSet, RuleWeights, Verdict};
use crate::scale::Mode;
use crate::voice::VoicePosition;
use serde::{Deserialize, Serialize};

/// Node budget the command line uses when neither a flag nor the config
/// file sets one. A few seconds of search on a release build.
pub const DEFAULT_NODE_BUDGET: u64 = 20_000_000;

/// Search limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Stop after evaluating this many prefixes. `None` searches exhaustively.
    pub max_nodes: Option<u64>,
}

impl SearchConfig {
    /// Resolve the budget for an interactive run: an explicit `cap` wins over
    /// the configured budget, which wins over `DEFAULT_NODE_BUDGET`.
    /// `exhaustive` lifts every cap.
    pub fn bounded(&self, cap: Option<u64>, exhaustive: bool) -> SearchConfig {
        let max_nodes = if exhaustive {
            None
        } else {
            Some(cap.or(self.max_nodes).unwrap_or(DEFAULT_NODE_BUDGET))
        };
        SearchConfig { max_nodes }
    }
}

/// A complete counterpoint line and its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub notes: Vec<Pitch>,
    pub score: i32,
}

impl Solution {
    /// Raise a minor-key penultimate subtonic to the leading tone.
    ///
    /// The search only proposes diatonic pitches, so in minor it settles the
    /// cadence on the unaltered seventh degree; this applies the chromatic
    /// inflection to the finished line. Major keys and lines whose penultimate
    /// note is not the subtonic are returned unchanged.
    ///
    /// The raised note is not re-checked against the voice's range, so it can
    /// land a semitone outside it: in A minor a lower voice's G4 becomes Ab4,
    /// above the G4 ceiling.
    pub fn with_leading_tone(mut self, cantus: &CantusFirmus) -> Self {
        if cantus.mode != Mode::Minor || self.notes.len() < 2 {
            return self;
        }
        let scale = cantus.scale();
        let idx = self.notes.len() - 2;
        let note = self.notes[idx];
        if note.class == scale.subtonic() {
            let leading_tone = scale.leading_tone();
            // The leading tone wraps past B into the next octave.
            let octave = if leading_tone < note.class {
                note.octave + 1
            } else {
                note.octave
            };
            self.notes[idx] = Pitch::new(leading_tone, octave);
        }
        self
    }
}

/// Outcome and statistics of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Best complete line, or None if the cantus admits no counterpoint.
    pub best: Option<Solution>,
    /// Prefixes evaluated.
    pub nodes: u64,
    /// Prefixes rejected by a hard rule.
    pub pruned: u64,
    /// Admissible complete lines seen.
    pub complete: u64,
    /// True if the node budget ran out before the search finished.
    pub budget_exhausted: bool,
}

/// Backtracking solver for one (cantus, voice) pair.
pub struct Solver<'a> {
    cantus: &'a CantusFirmus,
    rules: RuleSet<'a>,
    /// Candidate pitches for each cantus position.
    choices: Vec<Vec<Pitch>>,
    config: &'a SearchConfig,
    best: Option<Solution>,
    nodes: u64,
    pruned: u64,
    complete: u64,
    budget_exhausted: bool,
}

impl<'a> Solver<'a> {
    pub fn new(
        cantus: &'a CantusFirmus,
        voice: VoicePosition,
        weights: &'a RuleWeights,
        config: &'a SearchConfig,
    ) -> Self {
        let choices = cantus
            .notes()
            .iter()
            .map(|&note| candidates(cantus.tonic, note, voice, cantus.mode))
            .collect();
        Solver {
            cantus,
            rules: RuleSet::new(cantus, voice, weights),
            choices,
            config,
            best: None,
            nodes: 0,
            pruned: 0,
            complete: 0,
            budget_exhausted: false,
        }
    }

    pub fn run(mut self) -> SearchReport {
        let mut line = Vec::with_capacity(self.cantus.len());
        self.extend(&mut line);

        match &self.best {
            Some(best) => log::info!(
                "search finished: best score {} after {} nodes ({} pruned, {} complete)",
                best.score,
                self.nodes,
                self.pruned,
                self.complete
            ),
            None => log::info!(
                "search finished without a solution after {} nodes ({} pruned)",
                self.nodes,
                self.pruned
            ),
        }
        if self.budget_exhausted {
            log::warn!("node budget of {:?} exhausted; result may not be the best", self.config.max_nodes);
        }

        SearchReport {
            best: self.best,
            nodes: self.nodes,
            pruned: self.pruned,
            complete: self.complete,
            budget_exhausted: self.budget_exhausted,
        }
    }

    fn out_of_budget(&self) -> bool {
        self.config.max_nodes.is_some_and(|max| self.nodes >= max)
    }

    /// Try every candidate for position `line.len()`.
    fn extend(&mut self, line: &mut Vec<Pitch>) {
        let step = line.len();
        if self.choices[step].is_empty() {
            log::trace!("no candidates against {} at note {}", self.cantus.notes()[step], step);
        }

        for i in 0..self.choices[step].len() {
            if self.out_of_budget() {
                self.budget_exhausted = true;
                return;
            }
            self.nodes += 1;

            line.push(self.choices[step][i]);
            match self.rules.evaluate_newest(line) {
                Verdict::Reject(violation) => {
                    self.pruned += 1;
                    log::trace!("pruned {:?}: {}", line, violation);
                }
                Verdict::Score(score) if line.len() == self.cantus.len() => {
                    self.complete += 1;
                    self.offer(line, score);
                }
                Verdict::Score(_) => self.extend(line),
            }
            line.pop();
        }
    }

    fn offer(&mut self, line: &[Pitch], score: i32) {
        if self.best.as_ref().is_some_and(|best| score <= best.score) {
            return;
        }
        log::debug!("new best (score {}): {:?}", score, line);
        self.best = Some(Solution {
            notes: line.to_vec(),
            score,
        });
    }
}

/// Exhaustive search with default weights.
pub fn solve(cantus: &CantusFirmus, voice: VoicePosition) -> Option<Solution> {
    let weights = RuleWeights::default();
    let config = SearchConfig::default();
    Solver::new(cantus, voice, &weights, &config).run().best
}
