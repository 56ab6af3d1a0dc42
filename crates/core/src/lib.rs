//! Scoring and selection core for `tries`.
//!
//! Candidates flow one way through this crate: a snapshot is scored by the
//! [`matcher`], [`recency`] and [`scoring`] modules, ordered by the
//! [`ranker`], and finally consumed by the [`selector`] state machine that
//! drives an interactive session. Nothing here touches a terminal or mutates
//! the filesystem; those concerns arrive through the collaborator traits in
//! [`selector`].

pub mod candidate;
pub mod matcher;
pub mod ranker;
pub mod recency;
pub mod scoring;
pub mod selector;

pub use crate::candidate::{Candidate, RankedList, ScoredCandidate};
pub use crate::matcher::{MatchResult, fuzzy_match};
pub use crate::ranker::{Ranker, min_score_for};
pub use crate::recency::RecencyScorer;
pub use crate::scoring::{CompositeScorer, ScoringConfig, ScoringError};
pub use crate::selector::{
	AccessRecorder, CandidateSource, DeletionHandler, InputSource, Outcome, Renderer, Selector,
	SelectorEvent, SelectorView, Session, SessionError, Transition,
};
