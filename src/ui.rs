use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

use retirement_planner::scoring::band_fraction;
use retirement_planner::{
    calculate_epf, calculate_hlv, calculate_lump_sum, calculate_ppf, calculate_sip,
    format_axis, format_compact, format_inr, format_percent, plan_retirement, recommend,
    score_corpus, simulate_withdrawal, AssetClass, CalculatorDefaults, CalculatorKind, CorpusScoreInput,
    EpfInput, FundCatalog, FundType, GrowthRow, HlvInput, Impact, InvestorProfile, LumpSumInput,
    PpfInput, RetirementInput, RiskProfile, SipInput, WithdrawalInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Sip,
    LumpSum,
    Ppf,
    Epf,
    Retirement,
    Withdrawal,
    Hlv,
    CorpusScore,
    Recommendations,
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Sip,
        Page::LumpSum,
        Page::Ppf,
        Page::Epf,
        Page::Retirement,
        Page::Withdrawal,
        Page::Hlv,
        Page::CorpusScore,
        Page::Recommendations,
    ];

    fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }

    pub fn kind(&self) -> CalculatorKind {
        match self {
            Page::Sip => CalculatorKind::Sip,
            Page::LumpSum => CalculatorKind::LumpSum,
            Page::Ppf => CalculatorKind::Ppf,
            Page::Epf => CalculatorKind::Epf,
            Page::Retirement => CalculatorKind::Retirement,
            Page::Withdrawal => CalculatorKind::Withdrawal,
            Page::Hlv => CalculatorKind::Hlv,
            Page::CorpusScore => CalculatorKind::CorpusScore,
            Page::Recommendations => CalculatorKind::Recommendations,
        }
    }

    pub fn title(&self) -> &str {
        self.kind().title()
    }

    /// Short tab label for the header
    fn tab(&self) -> &'static str {
        match self {
            Page::Sip => "SIP",
            Page::LumpSum => "Lump Sum",
            Page::Ppf => "PPF",
            Page::Epf => "EPF",
            Page::Retirement => "Retirement",
            Page::Withdrawal => "Withdrawal",
            Page::Hlv => "HLV",
            Page::CorpusScore => "Corpus Score",
            Page::Recommendations => "Funds",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Rupees,
    Percent,
    Years,
    Score,
    Risk,
}

/// One adjustable form input
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: f64,
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl InputField {
    fn new(label: &'static str, kind: FieldKind, value: f64, step: f64, min: f64, max: f64) -> Self {
        InputField { label, kind, value, step, min, max }
    }

    fn rupees(label: &'static str, value: f64, step: f64, min: f64, max: f64) -> Self {
        Self::new(label, FieldKind::Rupees, value, step, min, max)
    }

    fn percent(label: &'static str, value: f64, step: f64, max: f64) -> Self {
        Self::new(label, FieldKind::Percent, value, step, 0.0, max)
    }

    fn years(label: &'static str, value: u32, min: f64, max: f64) -> Self {
        Self::new(label, FieldKind::Years, value as f64, 1.0, min, max)
    }

    pub fn adjust(&mut self, steps: f64) {
        let next = self.value + self.step * steps;
        // Round away float drift from repeated 0.1 steps
        self.value = ((next * 100.0).round() / 100.0).clamp(self.min, self.max);
    }

    pub fn display(&self) -> String {
        match self.kind {
            FieldKind::Rupees => format_inr(self.value),
            FieldKind::Percent => format!("{:.2}%", self.value),
            FieldKind::Years | FieldKind::Score => format!("{:.0}", self.value),
            FieldKind::Risk => format!("{:?}", risk_profile(self.value)),
        }
    }
}

fn risk_profile(value: f64) -> RiskProfile {
    match value.round() as i64 {
        i64::MIN..=0 => RiskProfile::Conservative,
        1 => RiskProfile::Moderate,
        _ => RiskProfile::Aggressive,
    }
}

fn risk_index(profile: RiskProfile) -> f64 {
    match profile {
        RiskProfile::Conservative => 0.0,
        RiskProfile::Moderate => 1.0,
        RiskProfile::Aggressive => 2.0,
    }
}

fn retirement_fields(input: &RetirementInput) -> Vec<InputField> {
    vec![
        InputField::years("Current age", input.current_age, 18.0, 80.0),
        InputField::years("Retirement age", input.retirement_age, 30.0, 90.0),
        InputField::years("Life expectancy", input.life_expectancy, 50.0, 110.0),
        InputField::rupees("Monthly expense", input.monthly_expense, 5_000.0, 5_000.0, 2_000_000.0),
        InputField::percent("Inflation", input.inflation_rate, 0.5, 20.0),
        InputField::percent("Expected return", input.expected_return, 0.5, 30.0),
    ]
}

fn fields_for(page: Page, defaults: &CalculatorDefaults) -> Vec<InputField> {
    match page {
        Page::Sip => vec![
            InputField::rupees("Monthly investment", defaults.sip.monthly_investment, 500.0, 500.0, 1_000_000.0),
            InputField::percent("Expected return", defaults.sip.annual_rate, 0.5, 30.0),
            InputField::years("Years", defaults.sip.years, 1.0, 50.0),
        ],
        Page::LumpSum => vec![
            InputField::rupees("Principal", defaults.lump_sum.principal, 10_000.0, 1_000.0, 100_000_000.0),
            InputField::percent("Expected return", defaults.lump_sum.annual_rate, 0.5, 30.0),
            InputField::years("Years", defaults.lump_sum.years, 1.0, 50.0),
        ],
        Page::Ppf => vec![
            InputField::rupees("Yearly investment", defaults.ppf.yearly_investment, 500.0, 500.0, 150_000.0),
            InputField::years("Years", defaults.ppf.years, 15.0, 50.0),
            InputField::percent("Interest rate", defaults.ppf.annual_rate, 0.1, 15.0),
        ],
        Page::Epf => vec![
            InputField::rupees("Basic salary / month", defaults.epf.basic_salary, 1_000.0, 1_000.0, 1_000_000.0),
            InputField::percent("Employee share", defaults.epf.employee_rate, 0.5, 20.0),
            InputField::percent("Employer share", defaults.epf.employer_rate, 0.5, 20.0),
            InputField::years("Current age", defaults.epf.current_age, 18.0, 60.0),
            InputField::years("Retirement age", defaults.epf.retirement_age, 40.0, 70.0),
            InputField::percent("Annual increment", defaults.epf.annual_increment, 0.5, 25.0),
            InputField::percent("Interest rate", defaults.epf.interest_rate, 0.05, 15.0),
        ],
        Page::Retirement | Page::CorpusScore => retirement_fields(&defaults.retirement),
        Page::Withdrawal => vec![
            InputField::rupees("Initial corpus", defaults.withdrawal.initial_corpus, 500_000.0, 100_000.0, 1_000_000_000.0),
            InputField::percent("Withdrawal rate", defaults.withdrawal.withdrawal_rate, 0.5, 20.0),
            InputField::percent("Expected return", defaults.withdrawal.expected_return, 0.5, 25.0),
            InputField::percent("Inflation", defaults.withdrawal.inflation_rate, 0.5, 20.0),
            InputField::years("Years", defaults.withdrawal.years, 1.0, 60.0),
        ],
        Page::Hlv => vec![
            InputField::years("Age", defaults.hlv.age, 18.0, 80.0),
            InputField::rupees("Annual income", defaults.hlv.annual_income, 50_000.0, 0.0, 100_000_000.0),
            InputField::years("Working years left", defaults.hlv.working_years_left, 0.0, 60.0),
            InputField::rupees("Annual expenses", defaults.hlv.annual_expenses, 25_000.0, 0.0, 100_000_000.0),
            InputField::rupees("Savings", defaults.hlv.savings, 50_000.0, 0.0, 1_000_000_000.0),
            InputField::rupees("Liabilities", defaults.hlv.liabilities, 50_000.0, 0.0, 1_000_000_000.0),
        ],
        Page::Recommendations => vec![
            InputField::years("Age", defaults.investor.age, 18.0, 90.0),
            InputField::new("Risk profile", FieldKind::Risk, risk_index(defaults.investor.risk_profile), 1.0, 0.0, 2.0),
            InputField::new("HLV score", FieldKind::Score, defaults.investor.hlv_score as f64, 10.0, 300.0, 900.0),
            InputField::new("Corpus score", FieldKind::Score, defaults.investor.corpus_score as f64, 10.0, 300.0, 900.0),
            InputField::rupees("Monthly investment", defaults.investor.monthly_investment, 1_000.0, 500.0, 1_000_000.0),
        ],
    }
}

fn retirement_input(v: &[f64]) -> RetirementInput {
    RetirementInput {
        current_age: v[0] as u32,
        retirement_age: v[1] as u32,
        life_expectancy: v[2] as u32,
        monthly_expense: v[3],
        inflation_rate: v[4],
        expected_return: v[5],
    }
}

/// What a page shows: headline figures, a yearly table and an optional bar chart
#[derive(Debug, Clone, Default)]
pub struct PageOutput {
    pub summary: Vec<(String, String, Color)>,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub chart: Vec<(String, f64)>,
    pub error: Option<String>,
}

impl PageOutput {
    fn line(&mut self, label: &str, value: String) {
        self.summary.push((label.to_string(), value, Color::White));
    }

    fn colored(&mut self, label: &str, value: String, color: Color) {
        self.summary.push((label.to_string(), value, color));
    }
}

fn named_color(name: &str) -> Color {
    match name {
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" | "amber" => Color::Yellow,
        "orange" => Color::LightRed,
        "red" => Color::Red,
        _ => Color::White,
    }
}

fn fund_type_label(fund_type: FundType) -> &'static str {
    match fund_type {
        FundType::MutualFund => "Mutual Fund",
        FundType::Etf => "ETF",
        FundType::IndexFund => "Index Fund",
        FundType::Debt => "Debt",
        FundType::Hybrid => "Hybrid",
    }
}

/// Every n-th point so roughly `max` bars fit, always ending on the last one
fn sample_chart(points: Vec<(String, f64)>, max: usize) -> Vec<(String, f64)> {
    let stride = points.len().div_ceil(max).max(1);
    let last = points.len().saturating_sub(1);
    points
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % stride == 0 || *i == last)
        .map(|(_, point)| point)
        .collect()
}

fn growth_output(out: &mut PageOutput, yearly: &[GrowthRow]) {
    out.headers = vec!["Year", "Invested", "Growth", "Total"];
    out.rows = yearly
        .iter()
        .map(|row| {
            vec![
                row.year.to_string(),
                format_inr(row.investment),
                format_inr(row.growth),
                format_inr(row.total),
            ]
        })
        .collect();
    out.chart = sample_chart(
        yearly.iter().map(|row| (format!("Y{}", row.year), row.total)).collect(),
        12,
    );
}

fn compute(page: Page, v: &[f64], catalog: &FundCatalog) -> Result<PageOutput> {
    let mut out = PageOutput::default();

    match page {
        Page::Sip => {
            let result = calculate_sip(&SipInput {
                monthly_investment: v[0],
                annual_rate: v[1],
                years: v[2] as u32,
            })?;
            out.line("Invested", format_inr(result.total_investment));
            out.colored("Est. returns", format_inr(result.estimated_returns), Color::Green);
            out.colored("Maturity value", format_compact(result.maturity_value), Color::Cyan);
            growth_output(&mut out, &result.yearly);
        }
        Page::LumpSum => {
            let result = calculate_lump_sum(&LumpSumInput {
                principal: v[0],
                annual_rate: v[1],
                years: v[2] as u32,
            })?;
            out.line("Invested", format_inr(result.investment));
            out.colored("Est. returns", format_inr(result.estimated_returns), Color::Green);
            out.colored("Maturity value", format_compact(result.maturity_value), Color::Cyan);
            growth_output(&mut out, &result.yearly);
        }
        Page::Ppf => {
            let result = calculate_ppf(&PpfInput {
                yearly_investment: v[0],
                years: v[1] as u32,
                annual_rate: v[2],
            })?;
            out.line("Invested", format_inr(result.total_investment));
            out.colored("Interest", format_inr(result.total_interest), Color::Green);
            out.colored("Maturity amount", format_compact(result.maturity_amount), Color::Cyan);
            out.headers = vec!["Year", "Deposit", "Interest", "Balance"];
            out.rows = result
                .yearly
                .iter()
                .map(|row| {
                    vec![
                        row.year.to_string(),
                        format_inr(row.contribution),
                        format_inr(row.interest),
                        format_inr(row.balance),
                    ]
                })
                .collect();
            out.chart = sample_chart(
                result.yearly.iter().map(|row| (format!("Y{}", row.year), row.balance)).collect(),
                12,
            );
        }
        Page::Epf => {
            let result = calculate_epf(&EpfInput {
                basic_salary: v[0],
                employee_rate: v[1],
                employer_rate: v[2],
                current_age: v[3] as u32,
                retirement_age: v[4] as u32,
                annual_increment: v[5],
                interest_rate: v[6],
            })?;
            out.line("Your share", format_inr(result.total_employee_contribution));
            out.line("Employer share", format_inr(result.total_employer_contribution));
            out.colored("Interest", format_inr(result.total_interest), Color::Green);
            out.colored("Maturity amount", format_compact(result.maturity_amount), Color::Cyan);
            out.headers = vec!["Year", "Age", "Salary", "Contribution", "Interest", "Balance"];
            out.rows = result
                .yearly
                .iter()
                .map(|row| {
                    vec![
                        row.year.to_string(),
                        row.age.to_string(),
                        format_inr(row.salary),
                        format_inr(row.contribution()),
                        format_inr(row.interest),
                        format_inr(row.balance),
                    ]
                })
                .collect();
            out.chart = sample_chart(
                result.yearly.iter().map(|row| (row.age.to_string(), row.balance)).collect(),
                12,
            );
        }
        Page::Retirement => {
            let plan = plan_retirement(&retirement_input(v))?;
            out.line("Years to retire", plan.years_to_retirement.to_string());
            out.line("Monthly expense then", format_inr(plan.future_monthly_expense));
            out.line("Withdrawal rate", format_percent(plan.withdrawal_rate * 100.0));
            out.colored("Required corpus", format_compact(plan.required_corpus), Color::Cyan);
            out.colored("Monthly SIP needed", format_inr(plan.monthly_investment), Color::Yellow);
            out.headers = vec!["Year", "Invested", "Value"];
            out.rows = plan
                .projection
                .iter()
                .map(|point| {
                    vec![point.year.to_string(), format_inr(point.invested), format_inr(point.value)]
                })
                .collect();
            out.chart = sample_chart(
                plan.projection.iter().skip(1).map(|p| (format!("Y{}", p.year), p.value)).collect(),
                12,
            );
        }
        Page::Withdrawal => {
            let result = simulate_withdrawal(&WithdrawalInput {
                initial_corpus: v[0],
                withdrawal_rate: v[1],
                expected_return: v[2],
                inflation_rate: v[3],
                years: v[4] as u32,
            })?;
            out.line("First withdrawal", format_inr(result.initial_annual_withdrawal));
            out.line("Final withdrawal", format_inr(result.final_annual_withdrawal));
            out.line("Final corpus", format_compact(result.final_corpus));
            out.colored("Status", result.status.label(), named_color(result.status.color()));
            if let Some(year) = result.depleted_in_year() {
                out.colored("Runs short in", format!("year {}", year), Color::Red);
            }
            out.headers = vec!["Year", "Start", "Withdrawal", "Returns", "End"];
            out.rows = result
                .yearly
                .iter()
                .map(|row| {
                    vec![
                        row.year.to_string(),
                        format_inr(row.starting_balance),
                        format_inr(row.withdrawal),
                        format_inr(row.returns),
                        format_inr(row.ending_balance),
                    ]
                })
                .collect();
            out.chart = sample_chart(
                result.yearly.iter().map(|row| (format!("Y{}", row.year), row.ending_balance)).collect(),
                12,
            );
        }
        Page::Hlv => {
            let result = calculate_hlv(&HlvInput {
                age: v[0] as u32,
                annual_income: v[1],
                working_years_left: v[2] as u32,
                annual_expenses: v[3],
                savings: v[4],
                liabilities: v[5],
            })?;
            out.colored("Human life value", format_compact(result.hlv), Color::Cyan);
            out.colored(
                "HLV score",
                format!("{} ({})", result.scores.overall, result.rating.label()),
                named_color(result.rating.color()),
            );
            out.line("Band position", format_percent(band_fraction(result.scores.overall as f64) * 100.0));
            out.headers = vec!["Component", "Score"];
            let scores = &result.scores;
            out.rows = [
                ("Age", scores.age),
                ("Income", scores.income),
                ("Working years", scores.working_years),
                ("Savings", scores.savings),
                ("Liabilities", scores.liabilities),
            ]
            .iter()
            .map(|(name, score)| vec![name.to_string(), score.to_string()])
            .collect();
        }
        Page::CorpusScore => {
            let input = retirement_input(v);
            let plan = plan_retirement(&input)?;
            let score = score_corpus(&CorpusScoreInput::from_plan(&input, &plan));
            out.colored(
                "Corpus score",
                format!("{} ({})", score.score, score.rating.label()),
                named_color(score.rating.color()),
            );
            out.line("Band position", format_percent(band_fraction(score.score as f64) * 100.0));
            for suggestion in &score.suggestions {
                out.colored("Suggestion", suggestion.clone(), Color::Yellow);
            }
            out.headers = vec!["Factor", "Points", "Impact"];
            out.rows = score
                .factors
                .iter()
                .map(|factor| {
                    let impact = match factor.impact {
                        Impact::Positive => "positive",
                        Impact::Neutral => "neutral",
                        Impact::Negative => "negative",
                    };
                    vec![factor.title.clone(), factor.points.to_string(), impact.to_string()]
                })
                .collect();
        }
        Page::Recommendations => {
            let profile = InvestorProfile {
                age: v[0] as u32,
                risk_profile: risk_profile(v[1]),
                hlv_score: v[2] as u32,
                corpus_score: v[3] as u32,
                monthly_investment: v[4],
            };
            let portfolio = recommend(&profile, catalog)?;
            out.line("Equity", format!("{}%", portfolio.mix.equity));
            out.line("Debt", format!("{}%", portfolio.mix.debt));
            out.line("Hybrid", format!("{}%", portfolio.mix.hybrid));
            out.colored("Allocated", format_inr(portfolio.total()), Color::Cyan);
            out.line("Equity funds", format_percent(portfolio.share(AssetClass::Equity)));
            out.headers = vec!["Fund", "Type", "Risk", "3Y", "Monthly"];
            out.rows = portfolio
                .recommendations
                .iter()
                .map(|rec| {
                    vec![
                        truncate(&rec.fund.name, 34),
                        fund_type_label(rec.fund.fund_type).to_string(),
                        format!("{:?}", rec.fund.risk_level),
                        format_percent(rec.fund.returns.three_year),
                        format_inr(rec.allocation),
                    ]
                })
                .collect();
        }
    }

    Ok(out)
}

pub struct App {
    pub current_page: Page,
    pub fields: Vec<Vec<InputField>>,
    pub selected_field: usize,
    pub state: TableState,
    pub output: PageOutput,
    catalog: FundCatalog,
}

impl App {
    pub fn with_catalog(defaults: &CalculatorDefaults, catalog: FundCatalog) -> Self {
        let fields = Page::ALL.iter().map(|page| fields_for(*page, defaults)).collect();

        let mut app = Self {
            current_page: Page::Sip,
            fields,
            selected_field: 0,
            state: TableState::default(),
            output: PageOutput::default(),
            catalog,
        };
        app.recompute();
        app
    }

    pub fn page_fields(&self) -> &[InputField] {
        &self.fields[self.current_page.index()]
    }

    pub fn recompute(&mut self) {
        let values: Vec<f64> = self.page_fields().iter().map(|f| f.value).collect();

        self.output = match compute(self.current_page, &values, &self.catalog) {
            Ok(output) => output,
            Err(e) => PageOutput {
                error: Some(e.to_string()),
                ..PageOutput::default()
            },
        };

        if self.output.rows.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    fn set_page(&mut self, page: Page) {
        self.current_page = page;
        self.selected_field = 0;
        self.recompute();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page.next());
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.current_page.previous());
    }

    pub fn next_field(&mut self) {
        let len = self.page_fields().len();
        self.selected_field = (self.selected_field + 1) % len;
    }

    pub fn previous_field(&mut self) {
        let len = self.page_fields().len();
        self.selected_field = (self.selected_field + len - 1) % len;
    }

    pub fn adjust(&mut self, steps: f64) {
        let page = self.current_page.index();
        if let Some(field) = self.fields[page].get_mut(self.selected_field) {
            field.adjust(steps);
        }
        self.recompute();
    }

    pub fn scroll_down(&mut self) {
        let len = self.output.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn scroll_up(&mut self) {
        let len = self.output.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
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
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let big = if key.modifiers.contains(KeyModifiers::SHIFT) { 10.0 } else { 1.0 };

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => app.next_page(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next_field(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_field(),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => app.adjust(big),
                KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.adjust(-big),
                KeyCode::PageDown => app.scroll_down(),
                KeyCode::PageUp => app.scroll_up(),
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

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(44), // Inputs + summary
            Constraint::Min(0),     // Chart + table
        ])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app.page_fields().len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(content[0]);

    render_inputs(f, left[0], app);
    render_summary(f, left[1], app);

    if app.output.chart.is_empty() {
        render_table(f, content[1], app);
    } else {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(12), Constraint::Min(0)])
            .split(content[1]);
        render_chart(f, right[0], app);
        render_table(f, right[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in Page::ALL.iter().enumerate() {
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

        tab_spans.push(Span::styled(page.tab(), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Retirement Planner "),
    );

    f.render_widget(header, area);
}

fn render_inputs(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .page_fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == app.selected_field;
            let marker = if selected { "→ " } else { "  " };
            let value_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::raw(format!("{:<22}", field.label)),
                Span::styled(field.display(), value_style),
            ])
        })
        .collect();

    let inputs = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", app.current_page.title())),
    );

    f.render_widget(inputs, area);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = match &app.output.error {
        Some(error) => vec![
            Line::from(Span::styled(
                "❌ Invalid input",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(error.clone()),
        ],
        None => app
            .output
            .summary
            .iter()
            .map(|(label, value, color)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
                    Span::styled(value.clone(), Style::default().fg(*color)),
                ])
            })
            .collect(),
    };

    let summary = Paragraph::new(lines)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Summary "),
        );

    f.render_widget(summary, area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .output
        .chart
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .value(value.max(0.0) as u64)
                .label(Line::from(label.clone()))
                .text_value(format_axis(*value))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Growth "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    f.render_widget(chart, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = app.output.headers.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.output.rows.iter().map(|row| {
        let cells: Vec<Cell> = row.iter().map(|value| Cell::from(value.clone())).collect();
        Row::new(cells).height(1)
    });

    let widths: Vec<Constraint> = app
        .output
        .headers
        .iter()
        .enumerate()
        .map(|(i, _)| if i == 0 { Constraint::Min(8) } else { Constraint::Length(16) })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Schedule "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.output.rows.len();

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, total),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Page | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Field | "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" Adjust (Shift ×10) | "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
        Span::raw(" Rows | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_catalog(&CalculatorDefaults::default(), FundCatalog::default())
    }

    #[test]
    fn test_page_cycle() {
        let mut page = Page::Sip;
        for _ in 0..Page::ALL.len() {
            page = page.next();
        }
        assert_eq!(page, Page::Sip);
        assert_eq!(Page::Sip.previous(), Page::Recommendations);
        assert_eq!(Page::Retirement.title(), "Retirement Planner");
    }

    #[test]
    fn test_starts_on_sip_with_schedule() {
        let app = app();

        assert_eq!(app.current_page, Page::Sip);
        assert!(app.output.error.is_none());
        assert_eq!(app.output.rows.len(), 20);
        assert_eq!(app.state.selected(), Some(0));
        assert!(!app.output.chart.is_empty());
    }

    #[test]
    fn test_adjust_recomputes() {
        let mut app = app();
        app.next_field();
        app.next_field(); // Years

        app.adjust(5.0);
        assert_eq!(app.page_fields()[2].value, 25.0);
        assert_eq!(app.output.rows.len(), 25);
    }

    #[test]
    fn test_adjust_clamps_to_range() {
        let mut field = InputField::percent("Rate", 7.1, 0.1, 15.0);
        field.adjust(1_000.0);
        assert_eq!(field.value, 15.0);
        field.adjust(-1_000.0);
        assert_eq!(field.value, 0.0);

        let mut field = InputField::percent("Rate", 7.0, 0.1, 15.0);
        field.adjust(1.0);
        assert_eq!(field.value, 7.1);
    }

    #[test]
    fn test_invalid_retirement_shows_error() {
        let mut app = app();
        while app.current_page != Page::Retirement {
            app.next_page();
        }
        assert!(app.output.error.is_none());
        assert_eq!(app.output.rows.len(), 31);

        // Retirement age down to its floor of 30, equal to current age
        app.next_field();
        app.adjust(-100.0);

        assert!(app.output.error.as_deref().unwrap().contains("retirement_age"));
        assert!(app.output.rows.is_empty());
        assert_eq!(app.state.selected(), None);
    }

    #[test]
    fn test_page_change_resets_field_selection() {
        let mut app = app();
        app.next_field();
        app.next_page();

        assert_eq!(app.current_page, Page::LumpSum);
        assert_eq!(app.selected_field, 0);

        app.previous_field();
        assert_eq!(app.selected_field, app.page_fields().len() - 1);
    }

    #[test]
    fn test_recommendations_and_scores_render() {
        let mut app = app();
        app.previous_page();
        assert_eq!(app.current_page, Page::Recommendations);
        assert!(!app.output.rows.is_empty());
        assert_eq!(app.page_fields()[1].display(), "Moderate");

        app.previous_page();
        assert_eq!(app.current_page, Page::CorpusScore);
        assert_eq!(app.output.rows.len(), 5);

        app.previous_page();
        assert_eq!(app.current_page, Page::Hlv);
        assert_eq!(app.output.rows.len(), 5);
    }

    #[test]
    fn test_scroll_wraps() {
        let mut app = app();
        app.scroll_up();
        assert_eq!(app.state.selected(), Some(19));
        app.scroll_down();
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_sample_chart_keeps_last_point() {
        let points: Vec<(String, f64)> = (1..=30).map(|y| (format!("Y{}", y), y as f64)).collect();
        let sampled = sample_chart(points, 12);

        assert_eq!(sampled.len(), 11);
        assert_eq!(sampled[1].0, "Y4");
        assert_eq!(sampled.last().unwrap().0, "Y30");
    }
}
