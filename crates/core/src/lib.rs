//! Core library for the product showcase site's animated sections.
//!
//! The crate models the site's timed visual behaviors as plain state
//! machines: the cyclic stage sequencer behind the architecture diagram, the
//! run-once eased counters and staggered reveals, and the packet-flight
//! geometry of the diagram itself. Nothing here touches a clock or a
//! rendering surface — callers feed `Instant`s and visibility signals in and
//! read frame state out, so every module is deterministic under test.

pub mod config;
pub mod counter;
pub mod diagram;
pub mod easing;
pub mod error;
pub mod render;
pub mod reveal;
pub mod sequencer;

pub use config::{CounterConfig, DiagramConfig, RevealConfig, ShowcaseConfig};
pub use counter::{AnimatedCounter, CounterSpec};
pub use diagram::{
    packet_state, standard_stages, DiagramLayout, PacketPath, PacketState, PacketTiming, Point,
    StageStyle, WorkerNode,
};
pub use easing::{lerp, Easing};
pub use error::{Result, ShowcaseError};
pub use render::{FrameComposer, FrameSnapshot, LegendEntry};
pub use reveal::RevealGroup;
pub use sequencer::{ScheduledStage, Sequence, Stage, StageChange, StageSequencer};
