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
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

use rtfti::{
    count_statuses, execute as execute_protocol, generate, Entity, FinancialRecordSet,
    ProtocolRun, Status, DEFAULT_MONTHS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    SourceTables,
    Validation,
    TrustOutput,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::SourceTables => Page::Validation,
            Page::Validation => Page::TrustOutput,
            Page::TrustOutput => Page::SourceTables,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::SourceTables => Page::TrustOutput,
            Page::Validation => Page::SourceTables,
            Page::TrustOutput => Page::Validation,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::SourceTables => "Source Tables",
            Page::Validation => "Validation",
            Page::TrustOutput => "Trust Output",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Ledger,
    Bank,
    Gst,
    Payroll,
}

impl Source {
    pub fn title(&self) -> &str {
        match self {
            Source::Ledger => "General Ledger",
            Source::Bank => "Bank Transactions",
            Source::Gst => "GST Filings",
            Source::Payroll => "Payroll",
        }
    }
}

pub struct App {
    pub entity: Entity,
    pub seed: u64,
    pub records: FinancialRecordSet,
    pub run: Option<ProtocolRun>,
    pub current_page: Page,
    pub source: Source,
    pub table_state: TableState,
}

impl App {
    pub fn new(entity: Entity, seed: u64) -> Self {
        let records = generate(&entity, DEFAULT_MONTHS, seed);

        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            entity,
            seed,
            records,
            run: None,
            current_page: Page::SourceTables,
            source: Source::Ledger,
            table_state,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    /// Run layers 2-5 over the current dataset
    pub fn execute(&mut self) {
        self.run = Some(execute_protocol(&self.entity, &self.records));
        self.current_page = Page::TrustOutput;
    }

    /// Regenerate the dataset with a new seed; invalidates any prior run
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.records = generate(&self.entity, DEFAULT_MONTHS, seed);
        self.run = None;
        self.table_state.select(Some(0));
    }

    pub fn select_source(&mut self, source: Source) {
        self.source = source;
        self.table_state.select(Some(0));
    }

    fn active_table_len(&self) -> usize {
        match self.source {
            Source::Ledger => self.records.ledger.len(),
            Source::Bank => self.records.bank.len(),
            Source::Gst => self.records.gst.len(),
            Source::Payroll => self.records.payroll.len(),
        }
    }

    pub fn next_row(&mut self) {
        let len = self.active_table_len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.active_table_len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
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
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::Char('e') | KeyCode::Enter => app.execute(),
                KeyCode::Char('r') => {
                    // Random mode: reseed from the wall clock
                    app.reseed(chrono::Utc::now().timestamp() as u64);
                }
                KeyCode::Char('c') => {
                    // Reload the bundled case study
                    app.entity = Entity::case_study();
                    app.reseed(rtfti::CASE_STUDY_SEED);
                }
                KeyCode::Char('1') if app.current_page == Page::SourceTables => {
                    app.select_source(Source::Ledger);
                }
                KeyCode::Char('2') if app.current_page == Page::SourceTables => {
                    app.select_source(Source::Bank);
                }
                KeyCode::Char('3') if app.current_page == Page::SourceTables => {
                    app.select_source(Source::Gst);
                }
                KeyCode::Char('4') if app.current_page == Page::SourceTables => {
                    app.select_source(Source::Payroll);
                }
                KeyCode::Down | KeyCode::Char('j') => app.next_row(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::SourceTables => render_source_tables(f, chunks[1], app),
        Page::Validation => render_validation(f, chunks[1], app),
        Page::TrustOutput => render_trust_output(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::SourceTables, Page::Validation, Page::TrustOutput];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{} ({})", app.entity.name, app.entity.sector),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("seed {}", app.seed),
        Style::default().fg(Color::Cyan),
    ));

    if let Some(run) = &app.run {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("FTS {}", run.trust.fts),
            Style::default().fg(fts_color(run.trust.fts)).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" RTFTI Protocol Terminal "),
    );

    f.render_widget(header, area);
}

fn render_source_tables(f: &mut Frame, area: Rect, app: &mut App) {
    let (header_cells, rows): (Vec<&str>, Vec<Row>) = match app.source {
        Source::Ledger => (
            vec!["Month", "Revenue", "Expenses", "Net"],
            app.records
                .ledger
                .iter()
                .map(|r| {
                    Row::new(vec![
                        Cell::from(r.month.clone()),
                        Cell::from(format!("{:.2}", r.revenue)).style(Style::default().fg(Color::Green)),
                        Cell::from(format!("{:.2}", r.expenses)).style(Style::default().fg(Color::Red)),
                        Cell::from(format!("{:.2}", r.net)),
                    ])
                })
                .collect(),
        ),
        Source::Bank => (
            vec!["Month", "Inflow", "Outflow", "Net"],
            app.records
                .bank
                .iter()
                .map(|r| {
                    Row::new(vec![
                        Cell::from(r.month.clone()),
                        Cell::from(format!("{:.2}", r.inflow)).style(Style::default().fg(Color::Green)),
                        Cell::from(format!("{:.2}", r.outflow)).style(Style::default().fg(Color::Red)),
                        Cell::from(format!("{:.2}", r.net)),
                    ])
                })
                .collect(),
        ),
        Source::Gst => (
            vec!["Month", "Reported Revenue", "Filed On Time"],
            app.records
                .gst
                .iter()
                .map(|r| {
                    let (flag, color) = if r.filed_on_time { ("✓", Color::Green) } else { ("✗", Color::Red) };
                    Row::new(vec![
                        Cell::from(r.month.clone()),
                        Cell::from(format!("{:.2}", r.reported_revenue)),
                        Cell::from(flag).style(Style::default().fg(color)),
                    ])
                })
                .collect(),
        ),
        Source::Payroll => (
            vec!["Month", "Total Salary", "Statutory Compliant"],
            app.records
                .payroll
                .iter()
                .map(|r| {
                    let (flag, color) = if r.statutory_compliant { ("✓", Color::Green) } else { ("✗", Color::Red) };
                    Row::new(vec![
                        Cell::from(r.month.clone()),
                        Cell::from(format!("{:.2}", r.total_salary)),
                        Cell::from(flag).style(Style::default().fg(color)),
                    ])
                })
                .collect(),
        ),
    };

    let header = Row::new(
        header_cells
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Length(20),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" [1-4] {} — ₹ lakh ", app.source.title())),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_validation(f: &mut Frame, area: Rect, app: &App) {
    let Some(run) = &app.run else {
        let hint = Paragraph::new("Press 'e' to execute the protocol")
            .block(Block::default().borders(Borders::ALL).title(" Validation & Cross-Check "));
        f.render_widget(hint, area);
        return;
    };

    let header = Row::new(
        ["Dimension", "Weight", "Score", "Status", "Detail"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let rows = run.validations.iter().map(|v| {
        let color = status_color(v.status);
        Row::new(vec![
            Cell::from(v.dimension.clone()),
            Cell::from(format!("{:.0}%", v.weight * 100.0)),
            Cell::from(format!("{:.0}/100", v.score)).style(Style::default().fg(color)),
            Cell::from(v.status.as_str()).style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Cell::from(format!("{} ({})", v.detail, v.formula)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Min(30),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Validation & Cross-Check — 5 rules "),
    );

    f.render_widget(table, area);
}

fn render_trust_output(f: &mut Frame, area: Rect, app: &App) {
    let Some(run) = &app.run else {
        let hint = Paragraph::new("Press 'e' to execute the protocol")
            .block(Block::default().borders(Borders::ALL).title(" Trust Output "));
        f.render_widget(hint, area);
        return;
    };

    let trust = &run.trust;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Financial Trust Score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/100", trust.fts),
                Style::default().fg(fts_color(trust.fts)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   confidence {:.0}%", trust.confidence * 100.0),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
    ];

    let dims = [
        ("Revenue", trust.revenue_integrity),
        ("Cash Flow", trust.cash_flow),
        ("Tax", trust.tax_compliance),
        ("Payroll", trust.payroll),
        ("Audit", trust.audit_readiness),
    ];
    for (name, score) in dims {
        let bar = "█".repeat((score as usize) / 4);
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<10}", name)),
            Span::styled(bar, Style::default().fg(fts_color(score))),
            Span::raw(format!(" {}", score)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  MSME:      ", Style::default().fg(Color::Gray)),
        Span::raw(trust.rating().as_str()),
    ]));
    let decision = trust.lending_decision();
    lines.push(Line::from(vec![
        Span::styled("  Bank:      ", Style::default().fg(Color::Gray)),
        Span::styled(decision.as_str(), Style::default().fg(fts_color(trust.fts)).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" — {}", decision.terms())),
    ]));
    let tier = trust.risk_tier();
    lines.push(Line::from(vec![
        Span::styled("  Regulator: ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{} — {}", tier, tier.guidance())),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Ingestion: ", Style::default().fg(Color::Gray)),
        Span::raw(format!(
            "{} records, fingerprint {}…",
            run.normalization.records_in,
            &run.ingestion.fingerprint[..12],
        )),
    ]));

    let output = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Trust Output "),
    );

    f.render_widget(output, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " q quit │ Tab page │ 1-4 table │ e execute │ r reseed │ c case study ",
        Style::default().fg(Color::DarkGray),
    )];

    if let Some(run) = &app.run {
        let counts = count_statuses(&run.validations);
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("🔴 {}", counts.alerts),
            Style::default().fg(Color::Red),
        ));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("🟡 {}", counts.warnings),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Ready to execute", Style::default().fg(Color::Cyan)));
    }

    let bar = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(bar, area);
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Pass => Color::Green,
        Status::Warn => Color::Yellow,
        Status::Alert => Color::Red,
    }
}

fn fts_color(score: u8) -> Color {
    if score >= 80 {
        Color::Green
    } else if score >= 60 {
        Color::Yellow
    } else {
        Color::Red
    }
}
