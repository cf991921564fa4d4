use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

use sg_study_cost::{
    format_cny, format_sgd, Accommodation, CostEstimator, EstimatorInput, EstimatorResult, Food,
    Tier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Tuition,
    Accommodation,
    Food,
    Guardian,
    ExchangeRate,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::Tuition => Field::Accommodation,
            Field::Accommodation => Field::Food,
            Field::Food => Field::Guardian,
            Field::Guardian => Field::ExchangeRate,
            Field::ExchangeRate => Field::Tuition,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Field::Tuition => Field::ExchangeRate,
            Field::Accommodation => Field::Tuition,
            Field::Food => Field::Accommodation,
            Field::Guardian => Field::Food,
            Field::ExchangeRate => Field::Guardian,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Field::Tuition => "Tuition budget (SGD/year)",
            Field::Accommodation => "Accommodation",
            Field::Food => "Food habits",
            Field::Guardian => "Guardian required (under 18)",
            Field::ExchangeRate => "Exchange rate (SGD → CNY)",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::Tuition | Field::ExchangeRate)
    }
}

pub struct App {
    pub tuition_input: String,
    pub rate_input: String,
    pub accommodation_index: usize,
    pub food_index: usize,
    pub guardian_required: bool,
    pub focus: Field,
    pub result: Option<EstimatorResult>,
    pub error: Option<String>,
    pub show_breakdown: bool,
    estimator: CostEstimator,
}

impl App {
    pub fn new() -> Self {
        Self {
            // Defaults the form opens with
            tuition_input: "30000".to_string(),
            rate_input: "5.4".to_string(),
            accommodation_index: 0,
            food_index: 0,
            guardian_required: false,
            focus: Field::Tuition,
            result: None,
            error: None,
            show_breakdown: false,
            estimator: CostEstimator::default(),
        }
    }

    pub fn accommodation(&self) -> Accommodation {
        Accommodation::ALL[self.accommodation_index]
    }

    pub fn food(&self) -> Food {
        Food::ALL[self.food_index]
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Left/Right on an option field walks the catalog; on the guardian
    /// field it toggles
    pub fn cycle_option(&mut self, forward: bool) {
        match self.focus {
            Field::Accommodation => {
                let len = Accommodation::ALL.len();
                self.accommodation_index = if forward {
                    (self.accommodation_index + 1) % len
                } else {
                    (self.accommodation_index + len - 1) % len
                };
            }
            Field::Food => {
                let len = Food::ALL.len();
                self.food_index = if forward {
                    (self.food_index + 1) % len
                } else {
                    (self.food_index + len - 1) % len
                };
            }
            Field::Guardian => self.guardian_required = !self.guardian_required,
            _ => {}
        }
    }

    pub fn input_char(&mut self, c: char) {
        if !self.focus.is_numeric() {
            return;
        }

        let buffer = match self.focus {
            Field::Tuition => &mut self.tuition_input,
            Field::ExchangeRate => &mut self.rate_input,
            _ => unreachable!(),
        };

        // Digits always; one decimal point, and only on the rate field
        if c.is_ascii_digit() {
            buffer.push(c);
        } else if c == '.' && self.focus == Field::ExchangeRate && !buffer.contains('.') {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::Tuition => {
                self.tuition_input.pop();
            }
            Field::ExchangeRate => {
                self.rate_input.pop();
            }
            _ => {}
        }
    }

    pub fn toggle_breakdown(&mut self) {
        if self.result.is_some() {
            self.show_breakdown = !self.show_breakdown;
        }
    }

    pub fn clear_result(&mut self) {
        self.result = None;
        self.error = None;
        self.show_breakdown = false;
    }

    /// Compute once from the current form state
    pub fn submit(&mut self) {
        self.error = None;
        self.result = None;

        let tuition_annual_sgd = match self.tuition_input.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.error = Some(format!(
                    "Enter a tuition amount in SGD (got {:?})",
                    self.tuition_input
                ));
                return;
            }
        };

        let exchange_rate_sgd_to_cny = match self.rate_input.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.error = Some(format!(
                    "Enter an exchange rate (got {:?})",
                    self.rate_input
                ));
                return;
            }
        };

        let input = EstimatorInput {
            tuition_annual_sgd,
            accommodation: self.accommodation(),
            food: self.food(),
            guardian_required: self.guardian_required,
            exchange_rate_sgd_to_cny,
        };

        match self.estimator.estimate(&input) {
            Ok(result) => self.result = Some(result),
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.submit(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_field();
                    } else {
                        app.next_field();
                    }
                }
                KeyCode::BackTab => app.previous_field(),
                KeyCode::Down => app.next_field(),
                KeyCode::Up => app.previous_field(),
                KeyCode::Left => app.cycle_option(false),
                KeyCode::Right => app.cycle_option(true),
                KeyCode::Char(' ') => app.cycle_option(true),
                KeyCode::Char('b') => app.toggle_breakdown(),
                KeyCode::Char('c') => app.clear_result(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.backspace(),
                _ => {}
            }
        }
    }
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::SurvivalRisk => Color::Red,
        Tier::Tight => Color::Yellow,
        Tier::Comfortable => Color::Green,
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Input form
            Constraint::Percentage(45), // Results panel
        ])
        .split(chunks[1]);

    render_form(f, content_chunks[0], app);

    if app.show_breakdown {
        render_breakdown(f, content_chunks[1], app);
    } else {
        render_results(f, content_chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "🇸🇬 Singapore Study-Cost Estimator",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("v{}", sg_study_cost::VERSION),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if let Some(result) = &app.result {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            result.tier.label(),
            Style::default()
                .fg(tier_color(result.tier))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn field_line<'a>(app: &'a App, field: Field, value: Vec<Span<'a>>) -> Line<'a> {
    let focused = app.focus == field;

    let marker = if focused {
        Span::styled("→ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    };

    let title_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let mut spans = vec![
        marker,
        Span::styled(format!("{:<30}", field.title()), title_style),
    ];
    spans.extend(value);

    Line::from(spans)
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let accommodation = app.accommodation();
    let food = app.food();

    let cursor = |field: Field| -> &'static str {
        if app.focus == field {
            "▏"
        } else {
            ""
        }
    };

    let content = vec![
        Line::from(""),
        field_line(
            app,
            Field::Tuition,
            vec![Span::styled(
                format!("{}{}", app.tuition_input, cursor(Field::Tuition)),
                Style::default().fg(Color::White),
            )],
        ),
        Line::from(""),
        field_line(
            app,
            Field::Accommodation,
            vec![
                Span::styled(accommodation.label(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {}/mo", format_sgd(accommodation.monthly_cost_sgd())),
                    Style::default().fg(Color::DarkGray),
                ),
            ],
        ),
        Line::from(""),
        field_line(
            app,
            Field::Food,
            vec![
                Span::styled(food.label(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {}/mo", format_sgd(food.monthly_cost_sgd())),
                    Style::default().fg(Color::DarkGray),
                ),
            ],
        ),
        Line::from(""),
        field_line(
            app,
            Field::Guardian,
            vec![Span::styled(
                if app.guardian_required { "[x] yes" } else { "[ ] no" },
                Style::default().fg(Color::White),
            )],
        ),
        Line::from(""),
        field_line(
            app,
            Field::ExchangeRate,
            vec![Span::styled(
                format!("{}{}", app.rate_input, cursor(Field::ExchangeRate)),
                Style::default().fg(Color::White),
            )],
        ),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                "Press Enter to calculate",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
    ];

    let form = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Your Situation "),
    );

    f.render_widget(form, area);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    if let Some(error) = &app.error {
        let panel = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    "Invalid input",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![Span::raw("  "), Span::styled(error.clone(), Style::default().fg(Color::Red))]),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Results "),
        );
        f.render_widget(panel, area);
        return;
    }

    let result = match &app.result {
        Some(r) => r,
        None => {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        "Fill in the form and press Enter",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ]),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Results "),
            );
            f.render_widget(placeholder, area);
            return;
        }
    };

    let color = tier_color(result.tier);

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  First-year funds:   ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(
                format_cny(result.first_year_funds_cny),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Monthly remittance: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(
                format_cny(result.monthly_remittance_cny),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                result.tier.label().to_uppercase(),
                Style::default().fg(color).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(wrap_text(result.tier.advice(), 38), Style::default().fg(color)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Press b for the cost breakdown",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(" Results "),
    );

    f.render_widget(panel, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let result = match &app.result {
        Some(r) => r,
        None => return,
    };
    let b = &result.breakdown;

    let row = |label: &str, value: f64| -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("  {:<24}", label),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(format_sgd(value), Style::default().fg(Color::White)),
        ])
    };

    let content = vec![
        Line::from(""),
        row("Tuition incl. GST", b.tuition_with_tax),
        row("Accommodation (year)", b.accommodation_annual),
        row("Food (year)", b.food_annual),
        row("Misc & transport (year)", b.misc_transport_annual),
        row("Medical insurance", b.insurance_annual),
        row("Guardianship (year)", b.guardian_annual),
        Line::from("  ─────────────────────────────────────"),
        row("Monthly living cost", b.monthly_living_cost_sgd),
        row("Total first-year cost", b.total_annual_cost_sgd),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Press b to close",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Cost Breakdown (SGD) "),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Tab/↑↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Field | "),
        Span::styled("←/→/Space", Style::default().fg(Color::Yellow)),
        Span::raw(" Option | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Calculate | "),
    ];

    if app.result.is_some() {
        spans.push(Span::styled("b", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" Breakdown | "));
        spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" Clear | "));
    }

    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.len() + word.len() + 1 <= width {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        } else {
            if !result.is_empty() {
                result.push_str("\n  ");
            }
            result.push_str(&current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        if !result.is_empty() {
            result.push_str("\n  ");
        }
        result.push_str(&current_line);
    }

    result
}

// ============================================================================
// TESTS
// ============================================================================
