//! Scroll-driven behaviour: camera depth mapping, section triggers, the
//! tracks timeline and smooth scrolling.

pub mod checkpoint;
pub mod mapper;
pub mod scrub;
pub mod sections;
pub mod smooth;
pub mod tracks;
pub mod trigger;

pub use checkpoint::{Checkpoint, NavIndicators};
pub use mapper::{ScrollMapper, ScrollMetrics, ScrollUpdate};
pub use scrub::Scrub;
pub use sections::{CheckpointTriggerSet, MilestoneReveals, PageLayout, Reveal, RevealTrigger};
pub use smooth::SmoothScroll;
pub use tracks::{TracksFrame, TracksReveal};
pub use trigger::{Anchor, Position, SectionBounds, TriggerBand};
