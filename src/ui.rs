use color_eyre::eyre::{Result, eyre};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use prize_wheel::geometry::{self, Slice, SliceColor};
use prize_wheel::screen::ScreenModel;
use prize_wheel::Cue;
use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};
use ratatui::widgets::*;
use std::io::{stdout, Write};
use unicode_width::UnicodeWidthChar;

const LABEL_MAX_WIDTH: usize = 14;
/// Labels sit this far out along the slice's mid-angle.
const LABEL_DISTANCE: f64 = 0.62;

pub enum UserEvent {
    Quit,
    Spin,
    UpdateNames(String),
    Reset,
    DismissOverlay,
    Redraw,
}

#[derive(Debug)]
pub struct UiState {
    mode: Mode,
    confirm_reset: bool,
    terminal: Option<Terminal<CrosstermBackend<std::io::Stdout>>>,
}

impl UiState {
    pub fn new(confirm_reset: bool) -> Self {
        UiState { mode: Mode::Normal, confirm_reset, terminal: None }
    }
}

#[derive(Clone, Debug, Default)]
enum Mode {
    #[default]
    Normal,
    EditNames(EditState),
    ResetModal,
    QuitModal,
}

#[derive(Clone, Debug, Default)]
struct EditState { buffer: String }

pub fn terminal_enter(state: &mut UiState) -> Result<()> {
    enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    // Create a single persistent Terminal to preserve buffers across draws
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    state.terminal = Some(terminal);
    Ok(())
}

pub fn terminal_exit() -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn draw(state: &mut UiState, screen: &mut ScreenModel) -> Result<()> {
    if let Some(mut term) = state.terminal.take() {
        let res = term.draw(|f| ui(f, state, screen)).map(|_| ());
        state.terminal = Some(term);
        res?;
    }
    if screen.take_bell() {
        let mut out = stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
    }
    Ok(())
}

pub async fn next_raw_event(events: &mut EventStream) -> Result<Event> {
    match events.next().await {
        Some(ev) => Ok(ev?),
        None => Err(eyre!("terminal input stream closed")),
    }
}

pub fn interpret_event(state: &mut UiState, screen: &ScreenModel, event: Event) -> Option<UserEvent> {
    match event {
        Event::Key(k) if k.kind == KeyEventKind::Press => interpret_key(state, screen, k),
        Event::Resize(..) => Some(UserEvent::Redraw),
        _ => None,
    }
}

fn interpret_key(state: &mut UiState, screen: &ScreenModel, k: KeyEvent) -> Option<UserEvent> {
    if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
        return Some(UserEvent::Quit);
    }
    match &mut state.mode {
        Mode::EditNames(es) => {
            return match k.code {
                KeyCode::Esc => { state.mode = Mode::Normal; Some(UserEvent::Redraw) }
                KeyCode::Enter => { let raw = std::mem::take(&mut es.buffer); state.mode = Mode::Normal; Some(UserEvent::UpdateNames(raw)) }
                KeyCode::Backspace => { es.buffer.pop(); Some(UserEvent::Redraw) }
                KeyCode::Char(c) => { es.buffer.push(c); Some(UserEvent::Redraw) }
                _ => None,
            };
        }
        Mode::ResetModal => {
            return match k.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => { state.mode = Mode::Normal; Some(UserEvent::Reset) }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => { state.mode = Mode::Normal; Some(UserEvent::Redraw) }
                _ => None,
            };
        }
        Mode::QuitModal => {
            return match k.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(UserEvent::Quit),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => { state.mode = Mode::Normal; Some(UserEvent::Redraw) }
                _ => None,
            };
        }
        Mode::Normal => {}
    }
    if screen.overlay().is_some() {
        return match k.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(UserEvent::DismissOverlay),
            _ => None,
        };
    }
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => { state.mode = Mode::QuitModal; Some(UserEvent::Redraw) }
        KeyCode::Char(' ') | KeyCode::Char('s') => Some(UserEvent::Spin),
        KeyCode::Char('e') if screen.spin_enabled() => {
            state.mode = Mode::EditNames(EditState { buffer: screen.input().to_string() });
            Some(UserEvent::Redraw)
        }
        KeyCode::Char('r') if screen.spin_enabled() => {
            if state.confirm_reset { state.mode = Mode::ResetModal; Some(UserEvent::Redraw) } else { Some(UserEvent::Reset) }
        }
        _ => None,
    }
}

fn ui(f: &mut Frame, state: &UiState, screen: &ScreenModel) {
    f.render_widget(Clear, f.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // status
            Constraint::Min(10),   // wheel + results
            Constraint::Length(3), // names
            Constraint::Length(3), // help
        ])
        .split(f.area());

    draw_status(f, chunks[0], screen);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);
    draw_wheel(f, middle[0], screen);
    draw_results(f, middle[1], screen);
    draw_names(f, chunks[2], screen);
    draw_help(f, chunks[3]);
    draw_modals(f, state, screen);
}

fn draw_status(f: &mut Frame, area: Rect, screen: &ScreenModel) {
    let state = if screen.spin_enabled() { "Ready" } else { "Spinning..." };
    let music = if screen.cue_active(Cue::Spin) { " | \u{266A}" } else { "" };
    let text = format!("{} | Participants: {} | Prizes awarded: {}{}", state, screen.slices().len(), screen.history().len(), music);
    let color = if screen.spin_enabled() { Color::Green } else { Color::Yellow };
    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title("Prize Wheel"));
    f.render_widget(status, area);
}

fn draw_wheel(f: &mut Frame, area: Rect, screen: &ScreenModel) {
    let block = Block::default().borders(Borders::ALL).title("Wheel");
    let inner = block.inner(area);
    f.render_widget(block, area);
    let square = square_rect(inner);
    if square.width == 0 || square.height == 0 {
        return;
    }
    let slices = screen.slices();
    let fills = rasterize(slices, square);
    let labels: Vec<(f64, f64, String, SliceColor)> = slices.iter().map(|s| label_placement(s, square)).collect();
    let size = geometry::SURFACE_SIZE;
    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, size])
        .y_bounds([0.0, size])
        .paint(move |ctx| {
            if slices.is_empty() {
                return;
            }
            for (slice, coords) in slices.iter().zip(&fills) {
                ctx.draw(&Points { coords: coords.as_slice(), color: to_color(slice.color) });
            }
            ctx.layer();
            let (cx, cy) = geometry::WHEEL_CENTER;
            ctx.draw(&Circle { x: cx, y: cy, radius: geometry::WHEEL_RADIUS - 1.0, color: Color::White });
            if slices.len() > 1 {
                for slice in slices {
                    let (x, y) = to_canvas(geometry::polar_point(slice.start_angle, geometry::WHEEL_RADIUS));
                    ctx.draw(&CanvasLine { x1: cx, y1: cy, x2: x, y2: y, color: Color::Black });
                }
            }
            for (x, y, text, color) in &labels {
                ctx.print(*x, *y, Span::styled(text.clone(), Style::default().fg(Color::Black).bg(to_color(*color)).add_modifier(Modifier::BOLD)));
            }
            let (px, py) = to_canvas(geometry::polar_point(geometry::POINTER_ANGLE, geometry::WHEEL_RADIUS));
            ctx.print(px - 8.0, py, Span::styled("\u{25C0}", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)));
        });
    f.render_widget(canvas, square);
}

// The canvas is y-up while the wheel surface is y-down.
fn to_canvas((x, y): (f64, f64)) -> (f64, f64) {
    (x, geometry::SURFACE_SIZE - y)
}

fn to_color(c: SliceColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Largest rect inside `area` that renders as a square, assuming cells are
/// twice as tall as they are wide.
fn square_rect(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect::new(area.x + (area.width - width) / 2, area.y + (area.height - height) / 2, width, height)
}

/// Braille dot coordinates covering each slice, in canvas space.
fn rasterize(slices: &[Slice], area: Rect) -> Vec<Vec<(f64, f64)>> {
    let mut fills = vec![Vec::new(); slices.len()];
    let Some(first) = slices.first() else { return fills; };
    let size = geometry::SURFACE_SIZE;
    let (cols, rows) = (area.width as usize * 2, area.height as usize * 4);
    let (dx, dy) = (size / cols as f64, size / rows as f64);
    let (cx, cy) = geometry::WHEEL_CENTER;
    let r2 = geometry::WHEEL_RADIUS * geometry::WHEEL_RADIUS;
    for row in 0..rows {
        let sy = (row as f64 + 0.5) * dy;
        for col in 0..cols {
            let sx = (col as f64 + 0.5) * dx;
            let (ox, oy) = (sx - cx, sy - cy);
            if ox * ox + oy * oy > r2 {
                continue;
            }
            let angle = oy.atan2(ox);
            if let Some(idx) = geometry::slice_at(slices.len(), first.start_angle, angle) {
                fills[idx].push(to_canvas((sx, sy)));
            }
        }
    }
    fills
}

fn label_placement(slice: &Slice, area: Rect) -> (f64, f64, String, SliceColor) {
    let text = truncate_label(&slice.label, LABEL_MAX_WIDTH);
    let width = text.chars().filter_map(|c| c.width()).sum::<usize>() as f64;
    let units_per_col = geometry::SURFACE_SIZE / area.width.max(1) as f64;
    let (x, y) = to_canvas(geometry::polar_point(slice.mid_angle(), geometry::LABEL_RADIUS * LABEL_DISTANCE));
    (x - width * units_per_col / 2.0, y, text, slice.color)
}

fn truncate_label(label: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            out.pop();
            out.push('\u{2026}');
            return out;
        }
        used += w;
        out.push(c);
    }
    out
}

fn draw_results(f: &mut Frame, area: Rect, screen: &ScreenModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let mut latest = Vec::new();
    match screen.winner() {
        Some((name, label)) => {
            latest.push(Line::styled(label.to_string(), Style::default().fg(Color::Yellow)));
            latest.push(Line::styled(name.to_string(), Style::default().add_modifier(Modifier::BOLD)));
        }
        None => latest.push(Line::styled("No winner yet", Style::default().fg(Color::DarkGray))),
    }
    let winner = Paragraph::new(latest).block(Block::default().borders(Borders::ALL).title("Winner"));
    f.render_widget(winner, chunks[0]);

    // newest first
    let items: Vec<ListItem> = if screen.history().is_empty() {
        vec![ListItem::new(Line::styled("None", Style::default().fg(Color::DarkGray)))]
    } else {
        screen.history().iter().map(|e| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", e.won_at.format("%H:%M:%S")), Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} ", e.label)),
                Span::styled(e.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]))
        }).collect()
    };
    let history = List::new(items).block(Block::default().borders(Borders::ALL).title("History"));
    f.render_widget(history, chunks[1]);
}

fn draw_names(f: &mut Frame, area: Rect, screen: &ScreenModel) {
    let text = if screen.input().trim().is_empty() { Line::styled("(empty, press e to add names)", Style::default().fg(Color::DarkGray)) } else { Line::from(screen.input().to_string()) };
    let names = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Names"));
    f.render_widget(names, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new("space/s spin | e edit names | r reset | Enter dismiss result | q/Esc quit")
        .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, area);
}

fn draw_modals(f: &mut Frame, state: &UiState, screen: &ScreenModel) {
    match &state.mode {
        Mode::EditNames(es) => {
            let area = centered_rect(70, 25, f.area());
            let block = Block::default().borders(Borders::ALL).title("Edit Names (comma separated)");
            let p = Paragraph::new(format!("{}\u{2588}\n\nEnter=update Esc=cancel", es.buffer)).wrap(Wrap { trim: false });
            f.render_widget(Clear, area);
            f.render_widget(block.clone(), area);
            f.render_widget(p, block.inner(area));
        }
        Mode::ResetModal => {
            let area = centered_rect(40, 20, f.area());
            let block = Block::default().borders(Borders::ALL).title("Confirm Reset");
            let p = Paragraph::new("Restore the original names and clear all prizes? (Y/N)").wrap(Wrap { trim: true });
            f.render_widget(Clear, area);
            f.render_widget(block.clone(), area);
            f.render_widget(p, block.inner(area));
        }
        Mode::QuitModal => {
            let area = centered_rect(40, 20, f.area());
            let block = Block::default().borders(Borders::ALL).title("Confirm Quit");
            let p = Paragraph::new("Quit the wheel? (Y/N)");
            f.render_widget(Clear, area);
            f.render_widget(block.clone(), area);
            f.render_widget(p, block.inner(area));
        }
        Mode::Normal => {
            if let Some(entry) = screen.overlay() {
                let area = centered_rect(40, 30, f.area());
                let block = Block::default().borders(Borders::ALL).title("We have a winner!").style(Style::default().fg(Color::Yellow));
                let p = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(entry.label.clone()).alignment(Alignment::Center),
                    Line::styled(entry.name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)).alignment(Alignment::Center),
                    Line::from(""),
                    Line::styled("Enter to close", Style::default().fg(Color::DarkGray)).alignment(Alignment::Center),
                ]);
                f.render_widget(Clear, area);
                f.render_widget(block.clone(), area);
                f.render_widget(p, block.inner(area));
            }
        }
    }
}

fn centered_rect(w_percent: u16, h_percent: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h_percent) / 2),
            Constraint::Percentage(h_percent),
            Constraint::Percentage((100 - h_percent) / 2),
        ])
        .split(r);

    let vertical = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w_percent) / 2),
            Constraint::Percentage(w_percent),
            Constraint::Percentage((100 - w_percent) / 2),
        ])
        .split(popup_layout[1]);

    vertical[1]
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;

    #[test]
    fn truncate_label__keeps_short_names() {
        assert_eq!(truncate_label("Alice", 14), "Alice");
    }

    #[test]
    fn truncate_label__adds_ellipsis_when_too_wide() {
        assert_eq!(truncate_label("Bartholomew the Great", 10), "Bartholom\u{2026}");
    }

    #[test]
    fn square_rect__is_twice_as_wide_as_tall() {
        let r = square_rect(Rect::new(0, 0, 100, 30));
        assert_eq!((r.width, r.height), (60, 30));
        assert_eq!(r.x, 20);
    }

    #[test]
    fn rasterize__assigns_every_dot_to_one_slice() {
        let names: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let slices = geometry::wheel_layout(&names, 0.3);
        let fills = rasterize(&slices, Rect::new(0, 0, 40, 20));
        assert!(fills.iter().all(|f| !f.is_empty()));
        let total: usize = fills.iter().map(Vec::len).sum();
        // roughly π/4 of the 80x80 dot grid
        assert!(total > 4500 && total < 5500, "{total}");
    }

    #[test]
    fn interpret_key__edit_then_commit_returns_names() {
        let mut state = UiState::new(false);
        let screen = ScreenModel::new(false);
        let key = |c| KeyEvent::new(c, KeyModifiers::NONE);
        assert!(matches!(interpret_key(&mut state, &screen, key(KeyCode::Char('e'))), Some(UserEvent::Redraw)));
        interpret_key(&mut state, &screen, key(KeyCode::Char('A')));
        interpret_key(&mut state, &screen, key(KeyCode::Char(',')));
        interpret_key(&mut state, &screen, key(KeyCode::Char('B')));
        match interpret_key(&mut state, &screen, key(KeyCode::Enter)) {
            Some(UserEvent::UpdateNames(raw)) => assert_eq!(raw, "A,B"),
            _ => panic!("expected UpdateNames"),
        }
    }

    #[test]
    fn interpret_key__reset_asks_first_when_configured() {
        let mut state = UiState::new(true);
        let screen = ScreenModel::new(false);
        let key = |c| KeyEvent::new(c, KeyModifiers::NONE);
        assert!(matches!(interpret_key(&mut state, &screen, key(KeyCode::Char('r'))), Some(UserEvent::Redraw)));
        assert!(matches!(interpret_key(&mut state, &screen, key(KeyCode::Char('y'))), Some(UserEvent::Reset)));
    }
}
