//! Page widgets outside the 3D scene.

pub mod accordion;
pub mod countdown;
pub mod tabs;

pub use accordion::{AccessGate, Accordion, EntryState};
pub use countdown::{Countdown, CountdownDisplay, CountdownUnits};
pub use tabs::{CardPop, TabSelection, Track, TrackTabs};
