//! Ratatui-based terminal UI.
//!
//! A sidebar lists the calculators. The selected calculator's route picks the
//! theme for the chrome, its form is edited in place and the result is
//! recomputed on every change.

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::config::Settings;
use crate::domain::{CalculatorKind, CalculatorResult, Sex};
use crate::error::AppError;
use crate::site::{CalculatorEntry, SITE};
use crate::theme::{ThemeMatch, ThemeResolver};

mod form;
mod palette;

use form::Form;
use palette::Chrome;

/// Start the TUI.
pub fn run(settings: &Settings) -> Result<(), AppError> {
    // Load the theme table before touching the terminal so errors print normally.
    let resolver = crate::app::active_theme_table(None, settings)?;
    let today = chrono::Local::now().date_naive();
    let mut app = App::new(resolver, settings, today);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Sidebar,
    Form,
}

struct App {
    resolver: ThemeResolver,
    today: NaiveDate,
    /// One form per catalogue entry, kept while browsing.
    forms: Vec<Form>,
    selected: usize,
    selected_field: usize,
    focus: Focus,
    result: Result<CalculatorResult, String>,
    status: String,
}

impl App {
    fn new(resolver: ThemeResolver, settings: &Settings, today: NaiveDate) -> Self {
        let forms = SITE
            .calculators
            .iter()
            .map(|e| Form::new(e.kind, settings.units, today))
            .collect();
        let mut app = Self {
            resolver,
            today,
            forms,
            selected: 0,
            selected_field: 0,
            focus: Focus::Sidebar,
            result: Err(String::new()),
            status: String::new(),
        };
        app.recompute();
        app
    }

    fn entry(&self) -> &'static CalculatorEntry {
        &SITE.calculators[self.selected]
    }

    fn form(&self) -> &Form {
        &self.forms[self.selected]
    }

    fn recompute(&mut self) {
        self.result = self
            .form()
            .request(self.today)
            .and_then(|r| crate::app::pipeline::evaluate(&r).map_err(|e| e.to_string()));
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.focus {
            Focus::Sidebar => match code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Up => self.select(self.selected.saturating_sub(1)),
                KeyCode::Down => self.select((self.selected + 1).min(SITE.calculators.len() - 1)),
                KeyCode::Enter | KeyCode::Tab | KeyCode::Right => {
                    self.focus = Focus::Form;
                    self.status = format!("Editing {}", self.entry().title);
                }
                _ => {}
            },
            Focus::Form => {
                let field_count = self.form().fields.len();
                let changed = match code {
                    KeyCode::Esc | KeyCode::Tab => {
                        self.focus = Focus::Sidebar;
                        self.status.clear();
                        false
                    }
                    KeyCode::Up => {
                        self.selected_field = self.selected_field.saturating_sub(1);
                        false
                    }
                    KeyCode::Down => {
                        self.selected_field = (self.selected_field + 1).min(field_count.saturating_sub(1));
                        false
                    }
                    KeyCode::Left | KeyCode::Right => {
                        let forward = code == KeyCode::Right;
                        self.field_mut().map(|f| f.value.cycle(forward)).is_some()
                    }
                    KeyCode::Backspace => self.field_mut().map(|f| f.backspace()).is_some(),
                    KeyCode::Char(c) => self.field_mut().is_some_and(|f| f.push_char(c)),
                    _ => false,
                };
                if changed {
                    self.recompute();
                }
            }
        }
        false
    }

    fn field_mut(&mut self) -> Option<&mut form::Field> {
        self.forms[self.selected].fields.get_mut(self.selected_field)
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.selected = index;
            self.selected_field = 0;
            self.recompute();
        }
    }

    fn chrome(&self) -> (Chrome, ThemeMatch<'_>) {
        let (rule, theme) = self.resolver.resolve_match(self.entry().path);
        (Chrome::from_theme(theme), rule)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        let (chrome, _) = self.chrome();
        self.draw_header(frame, chunks[0], chrome);
        self.draw_body(frame, chunks[1], chrome);
        self.draw_footer(frame, chunks[2], chrome);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect, chrome: Chrome) {
        let entry = self.entry();
        let (_, rule) = self.chrome();
        let rule = match rule {
            ThemeMatch::Exact(_) => "exact",
            ThemeMatch::Prefix(_) => "prefix",
            ThemeMatch::Default => "default",
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(SITE.name, Style::default().fg(chrome.accent).add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(entry.title, Style::default().fg(chrome.highlight)),
            ]),
            Line::from(Span::styled(
                format!("{}  |  theme: {rule}", SITE.url(entry)),
                Style::default().fg(chrome.muted),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(chrome.accent)),
        );
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect, chrome: Chrome) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(area);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.form().fields.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        self.draw_sidebar(frame, columns[0], chrome);
        self.draw_form(frame, right[0], chrome);
        self.draw_result(frame, right[1], chrome);
    }

    fn draw_sidebar(&self, frame: &mut ratatui::Frame<'_>, area: Rect, chrome: Chrome) {
        let items: Vec<ListItem> = SITE
            .calculators
            .iter()
            .map(|e| ListItem::new(e.kind.display_name()))
            .collect();

        let list = List::new(items)
            .block(panel("Calculators", chrome, self.focus == Focus::Sidebar))
            .highlight_style(Style::default().fg(Color::Black).bg(chrome.highlight))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect, chrome: Chrome) {
        let width = self.form().fields.iter().map(|f| f.label.len()).max().unwrap_or(0);
        let items: Vec<ListItem> = self
            .form()
            .fields
            .iter()
            .map(|f| ListItem::new(format!("{:<width$}  {}", f.label, f.value.display())))
            .collect();

        let mut list = List::new(items).block(panel("Inputs", chrome, self.focus == Focus::Form));
        let mut state = ListState::default();
        if self.focus == Focus::Form {
            list = list
                .highlight_style(Style::default().fg(Color::Black).bg(chrome.highlight))
                .highlight_symbol("» ");
            state.select(Some(self.selected_field));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect, chrome: Chrome) {
        let block = panel("Result", chrome, false);
        let p = match &self.result {
            Ok(result) => {
                let mut text = crate::report::format_result(result);
                if let Some(gauge) = self.gauge(result) {
                    text.push('\n');
                    text.push_str(&gauge);
                }
                Paragraph::new(text)
            }
            Err(msg) => Paragraph::new(msg.as_str()).style(Style::default().fg(Color::Yellow)),
        };
        frame.render_widget(p.block(block).wrap(Wrap { trim: false }), area);
    }

    fn gauge(&self, result: &CalculatorResult) -> Option<String> {
        let sex = self.form().selected_sex().unwrap_or(Sex::Male);
        let bands = match result.calculator {
            CalculatorKind::Bmi => crate::plot::bmi_bands(),
            CalculatorKind::BodyFat => crate::plot::body_fat_bands(sex),
            CalculatorKind::WaistToHip => crate::plot::whr_bands(sex),
            _ => return None,
        };
        Some(crate::plot::render_gauge(&bands, result.value, 40))
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect, chrome: Chrome) {
        let help = match self.focus {
            Focus::Sidebar => "↑/↓ calculator  Enter edit  q quit",
            Focus::Form => "↑/↓ field  ←/→ change  type digits  Esc back",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(chrome.accent)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn panel(title: &str, chrome: Chrome, focused: bool) -> Block<'_> {
    let border = if focused { chrome.accent } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        App::new(crate::theme::builtin::resolver(), &Settings::default(), today)
    }

    #[test]
    fn starts_on_first_calculator_with_a_result() {
        let app = app();
        assert_eq!(app.entry().kind, CalculatorKind::Bmi);
        assert!(app.result.is_ok());
    }

    #[test]
    fn sidebar_navigation_is_clamped_and_q_quits() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Up));
        assert_eq!(app.selected, 0);
        for _ in 0..20 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected, SITE.calculators.len() - 1);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn editing_a_field_recomputes() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.focus, Focus::Form);

        // Clear height and type 180; weight stays 70.
        for _ in 0..5 {
            app.handle_key(KeyCode::Backspace);
        }
        for c in "180".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        let result = app.result.as_ref().unwrap();
        assert!((result.value - 21.6).abs() < 1e-9);

        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.result.as_ref().unwrap_err(), "Height: enter a number");

        // q is ignored while editing.
        assert!(!app.handle_key(KeyCode::Char('q')));
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[test]
    fn chrome_follows_selected_route() {
        let mut app = app();
        let (first, rule) = app.chrome();
        assert!(matches!(rule, ThemeMatch::Exact(_)));
        app.handle_key(KeyCode::Down);
        let (second, _) = app.chrome();
        assert_ne!(first.accent, second.accent);
    }

    #[test]
    fn renders_without_panicking() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Vitals Calculators"));
        assert!(text.contains("Calculators"));
    }
}
