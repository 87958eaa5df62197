//! The presentation surface the wheel controller drives.

use crate::geometry::Slice;
use chrono::{
    DateTime,
    Local,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cue {
    /// Loops for as long as the wheel is turning.
    Spin,
    /// Played once when a winner is announced.
    Winner,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub prize: u32,
    pub label: String,
    pub name: String,
    pub won_at: DateTime<Local>,
}

/// Everything the controller needs from a UI layer.
pub trait PresentationPort {
    /// Paint the wheel. An empty layout clears the surface.
    fn render_wheel(&mut self, slices: &[Slice]);
    /// Replace the contents of the editable name field.
    fn sync_input(&mut self, text: &str);
    fn set_spin_enabled(&mut self, enabled: bool);
    fn show_winner(&mut self, name: &str, label: &str);
    /// Add `entry` at the head of the visible history.
    fn prepend_history(&mut self, entry: &HistoryEntry);
    fn clear_history(&mut self);
    fn show_overlay(&mut self, entry: &HistoryEntry);
    fn hide_overlay(&mut self);
    /// Start `cue` from time zero.
    fn play_cue(&mut self, cue: Cue);
    fn stop_cue(&mut self, cue: Cue);
}
