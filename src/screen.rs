//! View model for the terminal front end. Implements the presentation port
//! by recording what should be on screen; the drawing code reads it back.

use crate::{
    geometry::Slice,
    port::{
        Cue,
        HistoryEntry,
        PresentationPort,
    },
};
use std::collections::HashSet;

#[derive(Debug)]
pub struct ScreenModel {
    slices: Vec<Slice>,
    input: String,
    spin_enabled: bool,
    winner: Option<(String, String)>,
    history: Vec<HistoryEntry>,
    overlay: Option<HistoryEntry>,
    active_cues: HashSet<Cue>,
    sound: bool,
    bell: bool,
    dirty: bool,
}

impl Default for ScreenModel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ScreenModel {
    pub fn new(sound: bool) -> Self {
        ScreenModel {
            slices: Vec::new(),
            input: String::new(),
            spin_enabled: true,
            winner: None,
            history: Vec::new(),
            overlay: None,
            active_cues: HashSet::new(),
            sound,
            bell: false,
            dirty: true,
        }
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn spin_enabled(&self) -> bool {
        self.spin_enabled
    }

    /// `(name, prize label)` of the latest winner.
    pub fn winner(&self) -> Option<(&str, &str)> {
        self.winner
            .as_ref()
            .map(|(name, label)| (name.as_str(), label.as_str()))
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn overlay(&self) -> Option<&HistoryEntry> {
        self.overlay.as_ref()
    }

    pub fn cue_active(&self, cue: Cue) -> bool {
        self.active_cues.contains(&cue)
    }

    /// Returns and clears the "needs a redraw" flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns and clears a pending terminal bell.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }
}

impl PresentationPort for ScreenModel {
    fn render_wheel(&mut self, slices: &[Slice]) {
        self.slices.clear();
        self.slices.extend_from_slice(slices);
        self.dirty = true;
    }

    fn sync_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.dirty = true;
    }

    fn set_spin_enabled(&mut self, enabled: bool) {
        self.spin_enabled = enabled;
        self.dirty = true;
    }

    fn show_winner(&mut self, name: &str, label: &str) {
        self.winner = Some((name.to_string(), label.to_string()));
        self.dirty = true;
    }

    fn prepend_history(&mut self, entry: &HistoryEntry) {
        self.history.insert(0, entry.clone());
        self.dirty = true;
    }

    fn clear_history(&mut self) {
        self.history.clear();
        self.dirty = true;
    }

    fn show_overlay(&mut self, entry: &HistoryEntry) {
        self.overlay = Some(entry.clone());
        self.dirty = true;
    }

    fn hide_overlay(&mut self) {
        self.overlay = None;
        self.dirty = true;
    }

    fn play_cue(&mut self, cue: Cue) {
        if !self.sound {
            return;
        }
        self.active_cues.insert(cue);
        if cue == Cue::Winner {
            self.bell = true;
        }
        self.dirty = true;
    }

    fn stop_cue(&mut self, cue: Cue) {
        if self.active_cues.remove(&cue) {
            self.dirty = true;
        }
    }
}
