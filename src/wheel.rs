//! The wheel controller: sole owner of participants, rotation, spin state,
//! prize counter and history.

use crate::{
    config::WheelSettings,
    geometry::{
        self,
        Slice,
    },
    ordinal::prize_label,
    port::{
        Cue,
        HistoryEntry,
        PresentationPort,
    },
    roster::{
        join_names,
        parse_names,
    },
    spin::{
        SpinSession,
        SpinState,
        random_spin_distance,
    },
};
use chrono::Local;
use rand::{
    Rng,
    SeedableRng,
    rngs::StdRng,
};
use std::time::Instant;
use tracing::{
    debug,
    info,
    warn,
};

pub struct WheelController<P, R = StdRng> {
    port: P,
    rng: R,
    settings: WheelSettings,
    names: Vec<String>,
    original_input: String,
    rotation: f64,
    spin: SpinState,
    prize_counter: u32,
    history: Vec<HistoryEntry>,
    pending_redraw: Option<Instant>,
}

impl<P: PresentationPort> WheelController<P, StdRng> {
    pub fn new(port: P, settings: WheelSettings) -> Self {
        Self::with_rng(port, settings, StdRng::from_os_rng())
    }
}

impl<P: PresentationPort, R: Rng> WheelController<P, R> {
    pub fn with_rng(port: P, settings: WheelSettings, rng: R) -> Self {
        Self {
            port,
            rng,
            settings,
            names: Vec::new(),
            original_input: String::new(),
            rotation: 0.0,
            spin: SpinState::Idle,
            prize_counter: 0,
            history: Vec::new(),
            pending_redraw: None,
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn original_input(&self) -> &str {
        &self.original_input
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_spinning()
    }

    pub fn spin_state(&self) -> &SpinState {
        &self.spin
    }

    pub fn prize_counter(&self) -> u32 {
        self.prize_counter
    }

    /// Newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn pending_redraw(&self) -> Option<Instant> {
        self.pending_redraw
    }

    /// Replaces the participants with the names parsed from `raw`.
    /// Returns `false` if a spin is in flight and nothing changed.
    pub fn update_names(&mut self, raw: &str) -> bool {
        if self.is_spinning() {
            warn!("ignoring name update while the wheel is spinning");
            return false;
        }
        self.names = parse_names(raw);
        if self.original_input.is_empty() {
            self.original_input = raw.to_string();
        }
        debug!(count = self.names.len(), "participants updated");
        self.port.sync_input(raw);
        self.render();
        true
    }

    pub fn layout(&self) -> Vec<Slice> {
        geometry::wheel_layout(&self.names, self.rotation)
    }

    pub fn render(&mut self) {
        let layout = self.layout();
        self.port.render_wheel(&layout);
    }

    /// Starts a spin at `now`. No-op when already spinning or when there is
    /// nobody on the wheel.
    pub fn spin(&mut self, now: Instant) -> bool {
        if self.is_spinning() {
            debug!("spin requested while already spinning");
            return false;
        }
        if self.names.is_empty() {
            debug!("spin requested with no participants");
            return false;
        }
        let distance = random_spin_distance(&mut self.rng, self.settings.full_turns);
        let session = SpinSession::new(
            now,
            self.rotation,
            distance,
            self.settings.spin_duration(),
        );
        info!(
            participants = self.names.len(),
            distance,
            "spinning the wheel"
        );
        self.spin = SpinState::Spinning(session);
        self.port.set_spin_enabled(false);
        if self.settings.sound {
            self.port.stop_cue(Cue::Winner);
            self.port.play_cue(Cue::Spin);
        }
        true
    }

    /// Per-frame step. Advances an in-flight spin and redraws; resolves the
    /// winner once the spin lands. While idle, performs the deferred redraw
    /// once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Option<HistoryEntry> {
        let frame = match &self.spin {
            SpinState::Spinning(session) => session.advance_to(now),
            SpinState::Idle => {
                if self.pending_redraw.is_some_and(|due| now >= due) {
                    self.pending_redraw = None;
                    self.render();
                }
                return None;
            }
        };
        self.rotation = frame.rotation;
        self.render();
        if frame.done {
            self.resolve_winner(now)
        } else {
            None
        }
    }

    fn resolve_winner(&mut self, now: Instant) -> Option<HistoryEntry> {
        self.spin = SpinState::Idle;
        self.port.set_spin_enabled(true);
        if self.settings.sound {
            self.port.stop_cue(Cue::Spin);
        }

        let Some(index) = geometry::winner_index(self.names.len(), self.rotation) else {
            warn!("spin finished with an empty wheel");
            return None;
        };
        let name = self.names[index].clone();

        self.prize_counter += 1;
        let entry = HistoryEntry {
            prize: self.prize_counter,
            label: prize_label(self.prize_counter),
            name,
            won_at: Local::now(),
        };
        info!(winner = %entry.name, prize = %entry.label, "winner announced");

        self.port.show_winner(&entry.name, &entry.label);
        if self.settings.sound {
            self.port.play_cue(Cue::Winner);
        }
        if self.settings.overlay {
            self.port.show_overlay(&entry);
        }
        self.history.insert(0, entry.clone());
        self.port.prepend_history(&entry);

        if self.settings.remove_winners {
            self.names.remove(index);
            self.port.sync_input(&join_names(&self.names));
            self.pending_redraw = Some(now + self.settings.redraw_delay());
        }
        Some(entry)
    }

    pub fn dismiss_overlay(&mut self) {
        self.port.hide_overlay();
        if self.settings.sound {
            self.port.stop_cue(Cue::Winner);
        }
    }

    /// Restores the originally entered names and forgets every result.
    pub fn reset(&mut self) -> bool {
        if self.is_spinning() {
            warn!("ignoring reset while the wheel is spinning");
            return false;
        }
        info!(prizes = self.prize_counter, "resetting the wheel");
        self.prize_counter = 0;
        self.history.clear();
        self.port.clear_history();
        let original = self.original_input.clone();
        self.update_names(&original)
    }
}
