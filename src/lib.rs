pub mod config;
pub mod geometry;
pub mod ordinal;
pub mod port;
pub mod roster;
pub mod screen;
pub mod spin;
pub mod wheel;

pub mod test_helpers;

pub use port::{
    Cue,
    HistoryEntry,
    PresentationPort,
};
pub use wheel::WheelController;
