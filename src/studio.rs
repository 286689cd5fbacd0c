//! Artwork fetch orchestration: the one writer of deck state.
//!
//! A `Studio` owns the deck, drives the draw allocator, and walks the fetch
//! sequence strictly one request at a time. A batch is atomic: the first
//! collaborator failure aborts the remainder, and hand/deck batches discard
//! their partial results.

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::cards::{self, Artwork, Card, CardId};
use crate::deck::{DeckState, Progress};
use crate::draw;
use crate::error::Result;
use crate::ImageGenerator;

/// Cards dealt by a hand batch
pub const HAND_SIZE: usize = 3;

/// Breeds sampled into portrait prompts
pub const CAT_BREEDS: [&str; 10] = [
    "Siamese",
    "Persian",
    "Maine Coon",
    "Ragdoll",
    "Bengal",
    "Sphynx",
    "British Shorthair",
    "Abyssinian",
    "Scottish Fold",
    "Birman",
];

/// The kind of batch currently running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Batch {
    Hand,
    Single,
    Deck,
}

/// Orchestrator state: idle, or one running batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Running(Batch),
}

type OnProgressHandler = Arc<dyn Fn(Progress) + Send + Sync>;

/// The deck generator. Owns the deck state and is its only writer; all
/// fetches go through the `ImageGenerator` collaborator sequentially.
pub struct Studio<G: ImageGenerator> {
    generator: G,
    deck: DeckState,
    activity: Activity,
    progress: Option<Progress>,
    last_error: Option<String>,
    on_progress: Option<OnProgressHandler>,
    rng: StdRng,
}

/// Build one portrait prompt around a randomly chosen breed. The framing
/// constraints are fixed: plain white background, no text or borders.
pub fn build_prompt(rng: &mut StdRng) -> String {
    let breed = CAT_BREEDS.choose(rng).expect("breed list is non-empty");
    format!(
        "Photorealistic, highly detailed, artistic portrait of a majestic {breed}. \
         The cat should have a regal and characterful expression. The background \
         MUST be a solid, pure white background. NO other elements, text, borders, \
         or card designs should be in the image. Just the cat."
    )
}

impl<G: ImageGenerator> Studio<G> {
    pub fn new(generator: G) -> Self {
        Self::with_rng(generator, StdRng::from_entropy())
    }

    /// Construct with an explicit RNG. Tests seed this for deterministic
    /// draws.
    pub fn with_rng(generator: G, rng: StdRng) -> Self {
        Self {
            generator,
            deck: DeckState::new(),
            activity: Activity::Idle,
            progress: None,
            last_error: None,
            on_progress: None,
            rng,
        }
    }

    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.activity, Activity::Idle)
    }

    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// The last surfaced error message, kept until the next batch starts
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Single draws only extend a bare hand (fewer than three cards) or
    /// restart from a completed 52-card deck.
    pub fn can_draw_single(&self) -> bool {
        let n = self.deck.len();
        n < HAND_SIZE || n == 52
    }

    /// Export is only offered for a complete deck
    pub fn can_export(&self) -> bool {
        self.deck.len() == 52
    }

    /// Register a callback fired after each completed deck-mode fetch
    pub fn on_progress<F>(&mut self, cb: F)
    where
        F: Fn(Progress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(cb));
    }

    pub fn clear_on_progress(&mut self) {
        self.on_progress = None;
    }

    /// Register a callback invoked with the card slice after every deck
    /// mutation (placeholder seeding included).
    pub fn on_deck_change<F>(&mut self, cb: F)
    where
        F: Fn(&[Card]) + Send + Sync + 'static,
    {
        self.deck.on_change(cb);
    }

    pub fn clear_on_deck_change(&mut self) {
        self.deck.clear_on_change();
    }

    /// Deal a fresh hand of three distinct cards and fetch a portrait for
    /// each, in draw order. On any fetch failure the whole hand is discarded.
    pub fn generate_hand(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.begin(Batch::Hand);

        let ids = draw::draw_n(&mut self.rng, HAND_SIZE, &HashSet::new());
        // Seed placeholders before any fetch so loading state is visible
        // immediately.
        self.deck.reset(ids.iter().map(|&id| Card::placeholder(id)).collect());

        for id in ids {
            let prompt = build_prompt(&mut self.rng);
            match self.generator.generate(&prompt) {
                Ok(image) => self.deck.update_artwork(id, Artwork::Portrait(image)),
                Err(err) => {
                    self.deck.clear();
                    return self.fail(err);
                }
            }
        }

        self.finish();
        Ok(())
    }

    /// Draw one more card onto a small hand. A completed 52-card deck is
    /// cleared first; hands of three or more cards reject the draw (the
    /// control is disabled in that window).
    pub fn draw_single(&mut self) -> Result<()> {
        if self.is_running() || !self.can_draw_single() {
            return Ok(());
        }
        self.begin(Batch::Single);

        if self.deck.len() == 52 {
            self.deck.clear();
        }

        let held: HashSet<CardId> = self.deck.cards().iter().map(|c| c.id).collect();
        let id = draw::draw_one(&mut self.rng, &held);
        self.deck.append(Card::placeholder(id));

        let prompt = build_prompt(&mut self.rng);
        match self.generator.generate(&prompt) {
            Ok(image) => {
                self.deck.update_artwork(id, Artwork::Portrait(image));
                self.finish();
                Ok(())
            }
            // Single mode keeps the deck; only the error message surfaces.
            Err(err) => self.fail(err),
        }
    }

    /// Build the full 52-card deck: number cards carry the pip marker and
    /// never fetch; the sixteen face cards fetch portraits sequentially with
    /// per-card progress. The first failure discards the whole deck.
    pub fn generate_full_deck(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.begin(Batch::Deck);

        let ids = cards::full_deck();
        self.deck.reset(
            ids.iter()
                .map(|&id| {
                    if id.rank.is_face() {
                        Card::placeholder(id)
                    } else {
                        Card::pips(id)
                    }
                })
                .collect(),
        );

        let to_fetch: Vec<CardId> = ids.into_iter().filter(|id| id.rank.is_face()).collect();
        let total = to_fetch.len();
        self.set_progress(Progress { current: 0, total });

        for id in to_fetch {
            let prompt = build_prompt(&mut self.rng);
            match self.generator.generate(&prompt) {
                Ok(image) => {
                    self.deck.update_artwork(id, Artwork::Portrait(image));
                    let done = self.progress.map_or(0, |p| p.current) + 1;
                    self.set_progress(Progress { current: done, total });
                }
                Err(err) => {
                    self.deck.clear();
                    self.progress = None;
                    return self.fail(err);
                }
            }
        }

        self.finish();
        Ok(())
    }

    /// Rasterize the completed deck and write it to `path`. Only valid for a
    /// 52-card deck; the deck itself is left untouched on failure.
    pub fn export_deck(&mut self, path: &std::path::Path) -> Result<()> {
        crate::render::raster::export_deck(self.deck.cards(), path)
    }

    fn begin(&mut self, batch: Batch) {
        self.activity = Activity::Running(batch);
        self.last_error = None;
        self.progress = None;
    }

    fn finish(&mut self) {
        self.activity = Activity::Idle;
        // Progress is only meaningful while a deck batch runs.
        self.progress = None;
    }

    fn fail(&mut self, err: crate::Error) -> Result<()> {
        log::warn!("batch aborted: {err}");
        self.last_error = Some(err.to_string());
        self.activity = Activity::Idle;
        Err(err)
    }

    fn set_progress(&mut self, progress: Progress) {
        self.progress = Some(progress);
        if let Some(cb) = &self.on_progress {
            cb(progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Generator that succeeds with a dummy data URL, failing on the n-th
    /// call when configured.
    struct MockGenerator {
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
    }

    impl MockGenerator {
        fn ok() -> Self {
            Self { calls: AtomicUsize::new(0), fail_on_call: None }
        }

        fn failing_at(n: usize) -> Self {
            Self { calls: AtomicUsize::new(0), fail_on_call: Some(n) }
        }
    }

    impl ImageGenerator for MockGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on_call == Some(call) {
                return Err(Error::GenerationError("quota exceeded".into()));
            }
            Ok(format!("data:image/png;base64,portrait-{call}"))
        }
    }

    fn studio(gen: MockGenerator) -> Studio<MockGenerator> {
        Studio::with_rng(gen, StdRng::seed_from_u64(99))
    }

    #[test]
    fn hand_yields_three_distinct_portraits() {
        let mut s = studio(MockGenerator::ok());
        s.generate_hand().expect("hand should succeed");

        assert_eq!(s.cards().len(), 3);
        let ids: std::collections::HashSet<CardId> = s.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(s.cards().iter().all(|c| c.artwork.is_portrait()));
        assert!(!s.is_running());
        assert!(s.last_error().is_none());
    }

    #[test]
    fn hand_seeds_placeholders_before_any_fetch() {
        let snapshots: Arc<Mutex<Vec<Vec<Card>>>> = Arc::new(Mutex::new(Vec::new()));
        let mut s = studio(MockGenerator::ok());
        let snaps = Arc::clone(&snapshots);
        s.on_deck_change(move |cards| {
            snaps.lock().unwrap().push(cards.to_vec());
        });
        s.generate_hand().expect("hand should succeed");

        let snaps = snapshots.lock().unwrap();
        // First notification is the synchronous placeholder seed.
        assert_eq!(snaps[0].len(), 3);
        assert!(snaps[0].iter().all(|c| c.artwork.is_pending()));
        // Final notification has every portrait filled in.
        let last = snaps.last().unwrap();
        assert!(last.iter().all(|c| c.artwork.is_portrait()));
    }

    #[test]
    fn hand_failure_clears_the_deck() {
        let mut s = studio(MockGenerator::failing_at(2));
        let err = s.generate_hand().unwrap_err();
        assert!(matches!(err, Error::GenerationError(_)));
        assert!(s.cards().is_empty());
        assert!(!s.is_running());
        assert!(s.last_error().unwrap().contains("quota"));
    }

    #[test]
    fn full_deck_counts_sixteen_face_fetches() {
        let ticks: Arc<Mutex<Vec<Progress>>> = Arc::new(Mutex::new(Vec::new()));
        let mut s = studio(MockGenerator::ok());
        let t = Arc::clone(&ticks);
        s.on_progress(move |p| t.lock().unwrap().push(p));
        s.generate_full_deck().expect("deck should succeed");

        assert_eq!(s.cards().len(), 52);
        let portraits = s.cards().iter().filter(|c| c.artwork.is_portrait()).count();
        let pips = s
            .cards()
            .iter()
            .filter(|c| c.artwork == Artwork::Pips)
            .count();
        assert_eq!(portraits, 16);
        assert_eq!(pips, 36);

        let ticks = ticks.lock().unwrap();
        // Initial 0/16, then one tick per completed fetch, never skipping.
        assert_eq!(ticks.first(), Some(&Progress { current: 0, total: 16 }));
        assert_eq!(ticks.last(), Some(&Progress { current: 16, total: 16 }));
        let counts: Vec<usize> = ticks.iter().map(|p| p.current).collect();
        assert_eq!(counts, (0..=16).collect::<Vec<_>>());
    }

    #[test]
    fn full_deck_failure_clears_deck_and_progress() {
        let mut s = studio(MockGenerator::failing_at(5));
        let err = s.generate_full_deck().unwrap_err();
        assert!(matches!(err, Error::GenerationError(_)));
        assert!(s.cards().is_empty());
        assert!(s.progress().is_none());
        assert!(!s.is_running());
        assert!(s.last_error().is_some());
    }

    #[test]
    fn single_draw_extends_a_small_hand() {
        let mut s = studio(MockGenerator::ok());
        s.draw_single().expect("first draw");
        s.draw_single().expect("second draw");
        assert_eq!(s.cards().len(), 2);
        assert!(s.can_draw_single());
        s.draw_single().expect("third draw");
        // At three cards the control disables until the deck is complete.
        assert!(!s.can_draw_single());
        s.draw_single().expect("gated draw is a no-op");
        assert_eq!(s.cards().len(), 3);
    }

    #[test]
    fn single_draw_restarts_from_a_full_deck() {
        let mut s = studio(MockGenerator::ok());
        s.generate_full_deck().expect("deck");
        assert!(s.can_draw_single());
        s.draw_single().expect("draw after full deck");
        assert_eq!(s.cards().len(), 1);
    }

    #[test]
    fn single_draw_failure_keeps_the_deck() {
        let mut s = studio(MockGenerator::failing_at(2));
        s.draw_single().expect("first draw succeeds");
        let err = s.draw_single().unwrap_err();
        assert!(matches!(err, Error::GenerationError(_)));
        // Unlike hand/deck batches, single mode keeps its cards.
        assert_eq!(s.cards().len(), 2);
        assert!(s.cards()[1].artwork.is_pending());
        assert!(s.last_error().is_some());
    }

    #[test]
    fn new_batch_clears_the_previous_error() {
        let mut s = studio(MockGenerator::failing_at(1));
        assert!(s.generate_hand().is_err());
        assert!(s.last_error().is_some());
        s.generate_hand().expect("mock succeeds after the failing call");
        assert!(s.last_error().is_none());
    }

    #[test]
    fn export_requires_a_complete_deck() {
        let mut s = studio(MockGenerator::ok());
        s.generate_hand().expect("hand");
        assert!(!s.can_export());
        let err = s.export_deck(std::path::Path::new("/tmp/never-written.ppm"));
        assert!(matches!(err, Err(Error::ExportError(_))));
        // The deck is untouched by the failed export.
        assert_eq!(s.cards().len(), 3);
    }

    #[test]
    fn prompt_names_a_known_breed() {
        let mut rng = StdRng::seed_from_u64(5);
        let prompt = build_prompt(&mut rng);
        assert!(CAT_BREEDS.iter().any(|b| prompt.contains(b)));
        assert!(prompt.contains("pure white background"));
    }
}
