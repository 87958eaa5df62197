use crate::{
    config::WheelSettings,
    geometry::Slice,
    port::{
        Cue,
        HistoryEntry,
        PresentationPort,
    },
    wheel::WheelController,
};
use rand::{
    SeedableRng,
    rngs::StdRng,
};
use std::time::{
    Duration,
    Instant,
};

#[derive(Clone, Debug, PartialEq)]
pub enum PortCall {
    RenderWheel(Vec<Slice>),
    SyncInput(String),
    SetSpinEnabled(bool),
    ShowWinner { name: String, label: String },
    PrependHistory(HistoryEntry),
    ClearHistory,
    ShowOverlay(HistoryEntry),
    HideOverlay,
    PlayCue(Cue),
    StopCue(Cue),
}

/// Port that records every call for later inspection.
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub calls: Vec<PortCall>,
}

impl RecordingPort {
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn last_render(&self) -> Option<&[Slice]> {
        self.calls.iter().rev().find_map(|call| match call {
            PortCall::RenderWheel(slices) => Some(slices.as_slice()),
            _ => None,
        })
    }

    pub fn render_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, PortCall::RenderWheel(_)))
            .count()
    }

    pub fn last_input(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            PortCall::SyncInput(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl PresentationPort for RecordingPort {
    fn render_wheel(&mut self, slices: &[Slice]) {
        self.calls.push(PortCall::RenderWheel(slices.to_vec()));
    }

    fn sync_input(&mut self, text: &str) {
        self.calls.push(PortCall::SyncInput(text.to_string()));
    }

    fn set_spin_enabled(&mut self, enabled: bool) {
        self.calls.push(PortCall::SetSpinEnabled(enabled));
    }

    fn show_winner(&mut self, name: &str, label: &str) {
        self.calls.push(PortCall::ShowWinner {
            name: name.to_string(),
            label: label.to_string(),
        });
    }

    fn prepend_history(&mut self, entry: &HistoryEntry) {
        self.calls.push(PortCall::PrependHistory(entry.clone()));
    }

    fn clear_history(&mut self) {
        self.calls.push(PortCall::ClearHistory);
    }

    fn show_overlay(&mut self, entry: &HistoryEntry) {
        self.calls.push(PortCall::ShowOverlay(entry.clone()));
    }

    fn hide_overlay(&mut self) {
        self.calls.push(PortCall::HideOverlay);
    }

    fn play_cue(&mut self, cue: Cue) {
        self.calls.push(PortCall::PlayCue(cue));
    }

    fn stop_cue(&mut self, cue: Cue) {
        self.calls.push(PortCall::StopCue(cue));
    }
}

pub type TestWheel = WheelController<RecordingPort, StdRng>;

/// A seeded wheel plus a fixed clock origin.
pub struct TestContext {
    pub wheel: TestWheel,
    pub start: Instant,
}

impl TestContext {
    pub fn new(names: &str) -> Self {
        Self::with_settings(names, WheelSettings::default())
    }

    pub fn with_settings(names: &str, settings: WheelSettings) -> Self {
        Self::with_seed(names, settings, 42)
    }

    pub fn with_seed(names: &str, settings: WheelSettings, seed: u64) -> Self {
        let mut wheel = WheelController::with_rng(
            RecordingPort::default(),
            settings,
            StdRng::seed_from_u64(seed),
        );
        wheel.update_names(names);
        Self {
            wheel,
            start: Instant::now(),
        }
    }

    pub fn at(&self, millis: u64) -> Instant {
        self.start + Duration::from_millis(millis)
    }

    /// Spins at `start` and ticks every `frame_ms` until the spin lands.
    pub fn spin_to_completion(&mut self, frame_ms: u64) -> Option<HistoryEntry> {
        self.spin_from(0, frame_ms)
    }

    pub fn spin_from(&mut self, begin_ms: u64, frame_ms: u64) -> Option<HistoryEntry> {
        if !self.wheel.spin(self.at(begin_ms)) {
            return None;
        }
        let mut t = begin_ms;
        loop {
            t += frame_ms.max(1);
            let result = self.wheel.tick(self.at(t));
            if !self.wheel.is_spinning() {
                return result;
            }
        }
    }

    pub fn port(&self) -> &RecordingPort {
        self.wheel.port()
    }
}
