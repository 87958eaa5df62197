use crate::ui;
use color_eyre::eyre::{
    Result,
    WrapErr,
};
use crossterm::event::EventStream;
use prize_wheel::{
    WheelController,
    config::WheelSettings,
    screen::ScreenModel,
};
use std::time::{
    Duration,
    Instant,
};
use tokio::time::{
    self,
    MissedTickBehavior,
};
use tracing::{
    info,
    warn,
};

/// Roughly one display refresh.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub initial_names: String,
    pub settings: WheelSettings,
}

type Wheel = WheelController<ScreenModel>;

pub async fn run_app(config: AppConfig) -> Result<()> {
    let AppConfig {
        initial_names,
        settings,
    } = config;
    let mut wheel = WheelController::new(ScreenModel::new(settings.sound), settings);
    let mut ui_state = ui::UiState::new(wheel.settings().confirm_reset);
    wheel.update_names(&initial_names);
    let mut input_events = EventStream::new();

    tracing::info!("Starting UI");
    ui::terminal_enter(&mut ui_state)?;
    let res = run_loop(&mut wheel, &mut ui_state, &mut input_events).await;
    ui::terminal_exit()?;
    log_session_summary(&wheel);
    res
}

async fn run_loop(
    wheel: &mut Wheel,
    ui_state: &mut ui::UiState,
    input_events: &mut EventStream,
) -> Result<()> {
    let mut frames = time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ui::draw(ui_state, wheel.port_mut()).wrap_err("initial draw failed")?;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => { break; }
            _ = frames.tick() => {
                wheel.tick(Instant::now());
            }
            raw_ev = ui::next_raw_event(input_events) => {
                let event = raw_ev?;
                let Some(ev) = ui::interpret_event(ui_state, wheel.port(), event) else {
                    continue;
                };
                match ev {
                    ui::UserEvent::Quit => break,
                    ui::UserEvent::Spin => { wheel.spin(Instant::now()); }
                    ui::UserEvent::UpdateNames(raw) => { wheel.update_names(&raw); }
                    ui::UserEvent::Reset => { wheel.reset(); }
                    ui::UserEvent::DismissOverlay => wheel.dismiss_overlay(),
                    ui::UserEvent::Redraw => wheel.port_mut().mark_dirty(),
                }
            }
        }
        if wheel.port_mut().take_dirty() {
            ui::draw(ui_state, wheel.port_mut()).wrap_err("draw failed")?;
        }
    }
    Ok(())
}

fn log_session_summary(wheel: &Wheel) {
    if wheel.history().is_empty() {
        info!("session ended without winners");
        return;
    }
    match serde_json::to_string(wheel.history()) {
        Ok(json) => info!(prizes = wheel.prize_counter(), history = %json, "session ended"),
        Err(err) => warn!(?err, "could not serialize session history"),
    }
}
