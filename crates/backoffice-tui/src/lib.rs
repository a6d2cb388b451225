// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use backoffice_app::validation::{format_date, parse_optional_date};
use backoffice_app::{
    AppCommand, AppEvent, AppState, CommitOutcome, DraftField, FieldErrors, FieldKind, FieldSpec,
    FilterKind, FilterState, FocusSlot, Modal, PageKind, Record, Route, Schema, SortDirection,
    Submission, Theme,
};
use backoffice_store::{PageSlice, clamp_page, paginate, total_pages};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::Date;

const SORT_MARK_ASC: &str = "▲";
const SORT_MARK_DESC: &str = "▼";
const FILTER_MARK: &str = "▽";
const FOCUS_MARK: &str = "›";
const EMPTY_TABLE_TEXT: &str = "no records found";

/// Everything the front end needs from the record layer. The binary backs
/// this with seeded in-memory stores; tests back it with the same stores.
pub trait AppRuntime {
    fn schema(&self, page: PageKind) -> Option<&'static Schema>;
    /// Drops the mounted store and seeds a fresh one for `page`. Returns
    /// the record count.
    fn mount_page(&mut self, page: PageKind) -> Result<usize>;
    /// Filtered and sorted rows of the mounted page, not paginated.
    fn query(&mut self, filter: &FilterState) -> Result<Vec<Record>>;
    fn commit(&mut self, submission: &Submission) -> Result<CommitOutcome>;
    /// Writes `rows` as the mounted page's CSV and returns the file path.
    fn export(&mut self, rows: &[Record]) -> Result<PathBuf>;
    fn dashboard_counts(&mut self) -> Result<Vec<(PageKind, usize)>>;
    /// Page size every page starts with instead of its own default.
    fn page_size_override(&self) -> Option<usize> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    base: Style,
    accent: Color,
    muted: Color,
    error: Color,
    selected_bg: Color,
    selected_fg: Color,
    status: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                accent: Color::Blue,
                muted: Color::Gray,
                error: Color::Red,
                selected_bg: Color::LightBlue,
                selected_fg: Color::Black,
                status: Color::Magenta,
            },
            Theme::Dark => Self {
                base: Style::default().fg(Color::White).bg(Color::Black),
                accent: Color::Cyan,
                muted: Color::DarkGray,
                error: Color::LightRed,
                selected_bg: Color::DarkGray,
                selected_fg: Color::White,
                status: Color::Yellow,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct LoginUiState {
    email: String,
    password: String,
    focus: LoginField,
    errors: FieldErrors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Search,
    DateRange(&'static FieldSpec),
    Contains(&'static FieldSpec),
}

impl PromptKind {
    fn label(self) -> String {
        match self {
            Self::Search => "search".to_owned(),
            Self::DateRange(field) => format!("{} from..to", field.label.to_lowercase()),
            Self::Contains(field) => format!("{} contains", field.label.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PromptUiState {
    kind: PromptKind,
    buffer: String,
}

/// The mounted record page. Rebuilt from scratch on every navigation.
#[derive(Debug, Clone, PartialEq)]
struct PageView {
    schema: &'static Schema,
    filter: FilterState,
    rows: Vec<Record>,
    selected_row: usize,
    selected_col: usize,
    modal: Modal,
    prompt: Option<PromptUiState>,
}

impl PageView {
    fn new(schema: &'static Schema, filter: FilterState, rows: Vec<Record>) -> Self {
        Self {
            schema,
            filter,
            rows,
            selected_row: 0,
            selected_col: 0,
            modal: Modal::Closed,
            prompt: None,
        }
    }

    fn columns(&self) -> Vec<&'static FieldSpec> {
        self.schema.columns().collect()
    }

    fn slice(&self) -> PageSlice<Record> {
        paginate(&self.rows, self.filter.page(), self.filter.page_size())
    }

    fn selected_record(&self) -> Option<Record> {
        self.slice().items.get(self.selected_row).cloned()
    }

    fn selected_field(&self) -> Option<&'static FieldSpec> {
        self.columns().get(self.selected_col).copied()
    }

    /// Pulls the requested page and the cursor back inside what is shown.
    fn clamp(&mut self) {
        let pages = total_pages(self.rows.len(), self.filter.page_size());
        let page = clamp_page(self.filter.page(), pages);
        if page != self.filter.page() {
            self.filter.set_page(page);
        }
        let visible = self.slice().items.len();
        self.selected_row = self.selected_row.min(visible.saturating_sub(1));
        let columns = self.columns().len();
        self.selected_col = self.selected_col.min(columns.saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableCommand {
    MoveRow(isize),
    MoveColumn(isize),
    JumpFirstRow,
    JumpLastRow,
    NextPage,
    PrevPage,
    CyclePageSize,
    Sort,
    CycleFilter,
    ClearFilters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableStatus {
    SortUnavailable(&'static str),
    SortAsc(&'static str),
    SortDesc(&'static str),
    FilterUnavailable(&'static str),
    FilterSet(&'static str, String),
    FilterCleared(&'static str),
    MultiOn(&'static str, String),
    MultiOff(&'static str, String),
    FiltersCleared,
    NoFilters,
    PageSize(usize),
    PageAt(usize, usize),
    FirstPage,
    LastPage,
}

impl TableStatus {
    fn message(self) -> String {
        match self {
            Self::SortUnavailable(label) => format!("sort unavailable on {label}"),
            Self::SortAsc(label) => format!("sort {label} asc"),
            Self::SortDesc(label) => format!("sort {label} desc"),
            Self::FilterUnavailable(label) => format!("no filter on {label}"),
            Self::FilterSet(label, value) => format!("filter {label}: {value}"),
            Self::FilterCleared(label) => format!("filter {label} cleared"),
            Self::MultiOn(label, value) => format!("filter {label} + {value}"),
            Self::MultiOff(label, value) => format!("filter {label} - {value}"),
            Self::FiltersCleared => "filters cleared".to_owned(),
            Self::NoFilters => "no filters to clear".to_owned(),
            Self::PageSize(size) => format!("{size} per page"),
            Self::PageAt(page, total) => format!("page {page} of {total}"),
            Self::FirstPage => "already on the first page".to_owned(),
            Self::LastPage => "already on the last page".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableEvent {
    CursorUpdated,
    Status(TableStatus),
    /// Filter or sort changed; rows must be recomputed.
    Requery(TableStatus),
    OpenPrompt(PromptKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    login: LoginUiState,
    page: Option<PageView>,
    dashboard_counts: Vec<(PageKind, usize)>,
    help_visible: bool,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Route::Page(page) = state.route {
        mount_page(state, runtime, &mut view_data, &internal_tx, page);
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event
            && let Event::Key(key) = event::read().context("read event")?
            && handle_key_event(state, runtime, &mut view_data, &internal_tx, key)
        {
            break;
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn arm_status_clear(view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.set_status(&message.into());
    arm_status_clear(view_data, internal_tx);
}

/// Follows up on state events: mounts pages on route changes and logs
/// session activity.
fn apply_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: Vec<AppEvent>,
) {
    for event in events {
        match event {
            AppEvent::RouteChanged(Route::Page(page)) => {
                mount_page(state, runtime, view_data, internal_tx, page);
            }
            AppEvent::RouteChanged(Route::Login) => {
                view_data.page = None;
                view_data.login = LoginUiState::default();
            }
            AppEvent::ThemeChanged(theme) => {
                tracing::info!(theme = theme.as_str(), "theme changed");
            }
            AppEvent::LoggedIn(email) => tracing::info!(%email, "logged in"),
            AppEvent::LoggedOut => tracing::info!("logged out"),
            AppEvent::StatusUpdated(_) => arm_status_clear(view_data, internal_tx),
            AppEvent::StatusCleared => {}
        }
    }
}

fn dispatch_and_apply<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    apply_events(state, runtime, view_data, internal_tx, events);
}

fn mount_page<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    page: PageKind,
) {
    view_data.page = None;
    if !page.has_records() {
        match runtime.dashboard_counts() {
            Ok(counts) => view_data.dashboard_counts = counts,
            Err(error) => emit_status(
                state,
                view_data,
                internal_tx,
                format!("dashboard load failed: {error:#}"),
            ),
        }
        return;
    }
    match load_page_view(runtime, page) {
        Ok(view) => view_data.page = Some(view),
        Err(error) => emit_status(
            state,
            view_data,
            internal_tx,
            format!("load {} failed: {error:#}", page.label()),
        ),
    }
}

fn load_page_view<R: AppRuntime>(runtime: &mut R, page: PageKind) -> Result<PageView> {
    let schema = runtime
        .schema(page)
        .with_context(|| format!("{} has no record table", page.label()))?;
    runtime.mount_page(page)?;
    let mut filter = FilterState::for_schema(schema);
    if let Some(size) = runtime.page_size_override() {
        filter.set_page_size(size);
    }
    let rows = runtime.query(&filter)?;
    tracing::debug!(page = page.slug(), rows = rows.len(), "page view ready");
    Ok(PageView::new(schema, filter, rows))
}

fn requery<R: AppRuntime>(runtime: &mut R, page: &mut PageView) -> Result<()> {
    page.rows = runtime.query(&page.filter)?;
    page.clamp();
    Ok(())
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.route == Route::Login {
        handle_login_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if let Some(page) = view_data.page.as_mut()
        && (page.modal.is_open() || page.prompt.is_some())
    {
        let result = if page.modal.is_open() {
            handle_modal_key(runtime, page, key)
        } else {
            handle_prompt_key(runtime, page, key)
        };
        match result {
            Ok(Some(message)) => emit_status(state, view_data, internal_tx, message),
            Ok(None) => {}
            Err(error) => emit_status(state, view_data, internal_tx, format!("{error:#}")),
        }
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) => {
            dispatch_and_apply(state, runtime, view_data, internal_tx, AppCommand::NextPage);
            return false;
        }
        (KeyCode::BackTab, _) => {
            dispatch_and_apply(state, runtime, view_data, internal_tx, AppCommand::PrevPage);
            return false;
        }
        (KeyCode::Char('t'), KeyModifiers::NONE) => {
            dispatch_and_apply(state, runtime, view_data, internal_tx, AppCommand::ToggleTheme);
            return false;
        }
        (KeyCode::Char('O'), _) => {
            dispatch_and_apply(state, runtime, view_data, internal_tx, AppCommand::Logout);
            return false;
        }
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            return false;
        }
        _ => {}
    }

    let Some(page) = view_data.page.as_mut() else {
        return false;
    };

    let outcome = match table_command_for_key(key) {
        Some(command) => match apply_table_command(page, command) {
            TableEvent::CursorUpdated => Ok(None),
            TableEvent::Status(status) => Ok(Some(status.message())),
            TableEvent::Requery(status) => {
                requery(runtime, page).map(|()| Some(status.message()))
            }
            TableEvent::OpenPrompt(kind) => {
                open_prompt(page, kind);
                Ok(None)
            }
        },
        None => handle_page_key(runtime, page, key),
    };
    match outcome {
        Ok(Some(message)) => emit_status(state, view_data, internal_tx, message),
        Ok(None) => {}
        Err(error) => emit_status(state, view_data, internal_tx, format!("{error:#}")),
    }
    false
}

fn handle_login_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let login = &mut view_data.login;
    let field = match login.focus {
        LoginField::Email => &mut login.email,
        LoginField::Password => &mut login.password,
    };
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            login.focus = match login.focus {
                LoginField::Email => LoginField::Password,
                LoginField::Password => LoginField::Email,
            };
        }
        KeyCode::Backspace => {
            field.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => field.push(ch),
        KeyCode::Enter => {
            let (email, password) = (login.email.clone(), login.password.clone());
            match state.login(&email, &password) {
                Ok(events) => {
                    view_data.login = LoginUiState::default();
                    apply_events(state, runtime, view_data, internal_tx, events);
                }
                Err(errors) => {
                    tracing::debug!(fields = ?errors.fields(), "login rejected");
                    login.focus = if errors.contains("email") {
                        LoginField::Email
                    } else {
                        LoginField::Password
                    };
                    login.errors = errors;
                }
            }
        }
        _ => {}
    }
}

fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(TableCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(TableCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(TableCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(TableCommand::MoveColumn(1)),
        (KeyCode::Char('g'), _) => Some(TableCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) => Some(TableCommand::JumpLastRow),
        (KeyCode::Char(']'), _) | (KeyCode::PageDown, _) => Some(TableCommand::NextPage),
        (KeyCode::Char('['), _) | (KeyCode::PageUp, _) => Some(TableCommand::PrevPage),
        (KeyCode::Char('z'), _) => Some(TableCommand::CyclePageSize),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(TableCommand::Sort),
        (KeyCode::Char('f'), KeyModifiers::NONE) => Some(TableCommand::CycleFilter),
        (KeyCode::Char('F'), _) => Some(TableCommand::ClearFilters),
        _ => None,
    }
}

fn apply_table_command(page: &mut PageView, command: TableCommand) -> TableEvent {
    let visible = page.slice().items.len();
    match command {
        TableCommand::MoveRow(delta) => {
            let last = visible.saturating_sub(1) as isize;
            page.selected_row = (page.selected_row as isize + delta).clamp(0, last) as usize;
            TableEvent::CursorUpdated
        }
        TableCommand::MoveColumn(delta) => {
            let last = page.columns().len().saturating_sub(1) as isize;
            page.selected_col = (page.selected_col as isize + delta).clamp(0, last) as usize;
            TableEvent::CursorUpdated
        }
        TableCommand::JumpFirstRow => {
            page.selected_row = 0;
            TableEvent::CursorUpdated
        }
        TableCommand::JumpLastRow => {
            page.selected_row = visible.saturating_sub(1);
            TableEvent::CursorUpdated
        }
        TableCommand::NextPage => {
            let slice = page.slice();
            if !slice.has_next() {
                return TableEvent::Status(TableStatus::LastPage);
            }
            page.filter.next_page();
            page.selected_row = 0;
            TableEvent::Status(TableStatus::PageAt(slice.page + 1, slice.total_pages))
        }
        TableCommand::PrevPage => {
            let slice = page.slice();
            if !slice.has_prev() {
                return TableEvent::Status(TableStatus::FirstPage);
            }
            page.filter.prev_page();
            page.selected_row = 0;
            TableEvent::Status(TableStatus::PageAt(slice.page - 1, slice.total_pages))
        }
        TableCommand::CyclePageSize => {
            page.filter.cycle_page_size();
            page.selected_row = 0;
            TableEvent::Status(TableStatus::PageSize(page.filter.page_size()))
        }
        TableCommand::Sort => {
            let Some(field) = page.selected_field() else {
                return TableEvent::CursorUpdated;
            };
            if !field.sortable {
                return TableEvent::Status(TableStatus::SortUnavailable(field.label));
            }
            page.filter.sort_by(field.name);
            match page.filter.sort().map(|sort| sort.direction) {
                Some(SortDirection::Desc) => TableEvent::Requery(TableStatus::SortDesc(field.label)),
                _ => TableEvent::Requery(TableStatus::SortAsc(field.label)),
            }
        }
        TableCommand::CycleFilter => cycle_column_filter(page),
        TableCommand::ClearFilters => {
            if !page.filter.has_active_filters() {
                return TableEvent::Status(TableStatus::NoFilters);
            }
            page.filter.clear_filters();
            page.selected_row = 0;
            TableEvent::Requery(TableStatus::FiltersCleared)
        }
    }
}

/// `f` on a column: steps an exact filter, toggles the selected row's value
/// in a multi-select, or opens the prompt for range and contains filters.
fn cycle_column_filter(page: &mut PageView) -> TableEvent {
    let Some(field) = page.selected_field() else {
        return TableEvent::CursorUpdated;
    };
    page.selected_row = 0;
    match field.filter {
        Some(FilterKind::Exact) => {
            page.filter.cycle_exact(field.name, field.choices());
            match page.filter.exact(field.name) {
                Some(value) => {
                    TableEvent::Requery(TableStatus::FilterSet(field.label, value.to_owned()))
                }
                None => TableEvent::Requery(TableStatus::FilterCleared(field.label)),
            }
        }
        Some(FilterKind::MultiSelect) => {
            let Some(record) = page.selected_record() else {
                page.filter.clear_multi(field.name);
                return TableEvent::Requery(TableStatus::FilterCleared(field.label));
            };
            let value = record.display(field.name);
            page.filter.toggle_multi(field.name, &value);
            let on = page
                .filter
                .selected(field.name)
                .is_some_and(|set| set.contains(&value));
            if on {
                TableEvent::Requery(TableStatus::MultiOn(field.label, value))
            } else {
                TableEvent::Requery(TableStatus::MultiOff(field.label, value))
            }
        }
        Some(FilterKind::DateRange) => TableEvent::OpenPrompt(PromptKind::DateRange(field)),
        Some(FilterKind::Contains) => TableEvent::OpenPrompt(PromptKind::Contains(field)),
        None => TableEvent::Status(TableStatus::FilterUnavailable(field.label)),
    }
}

fn handle_page_key<R: AppRuntime>(
    runtime: &mut R,
    page: &mut PageView,
    key: KeyEvent,
) -> Result<Option<String>> {
    let schema = page.schema;
    match (key.code, key.modifiers) {
        (KeyCode::Char('/'), _) => {
            open_prompt(page, PromptKind::Search);
            Ok(None)
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            match schema.filter_fields(FilterKind::DateRange).next() {
                Some(field) => {
                    open_prompt(page, PromptKind::DateRange(field));
                    Ok(None)
                }
                None => Ok(Some(format!("{} has no date filter", schema.title))),
            }
        }
        (KeyCode::Char('p'), KeyModifiers::NONE) => {
            match schema.filter_fields(FilterKind::Contains).next() {
                Some(field) => {
                    open_prompt(page, PromptKind::Contains(field));
                    Ok(None)
                }
                None => Ok(Some(format!("{} has no contains filter", schema.title))),
            }
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => {
            page.modal.open_create(schema);
            Ok(None)
        }
        (KeyCode::Enter, _) => Ok(with_selected(page, |page, record| {
            page.modal.open_view(record);
        })),
        (KeyCode::Char('e'), KeyModifiers::NONE) => Ok(with_selected(page, |page, record| {
            page.modal.open_edit(schema, record);
        })),
        (KeyCode::Char('d'), KeyModifiers::NONE) => Ok(with_selected(page, |page, record| {
            page.modal.open_delete(record);
        })),
        (KeyCode::Char('x'), KeyModifiers::NONE) => {
            let path = runtime.export(&page.rows)?;
            Ok(Some(format!(
                "exported {} rows to {}",
                page.rows.len(),
                path.display()
            )))
        }
        _ => Ok(None),
    }
}

fn with_selected(page: &mut PageView, open: impl FnOnce(&mut PageView, Record)) -> Option<String> {
    match page.selected_record() {
        Some(record) => {
            open(page, record);
            None
        }
        None => Some("no row selected".to_owned()),
    }
}

fn open_prompt(page: &mut PageView, kind: PromptKind) {
    let buffer = match kind {
        PromptKind::Search => page.filter.search().to_owned(),
        PromptKind::Contains(field) => page.filter.contains(field.name).unwrap_or("").to_owned(),
        PromptKind::DateRange(_) => page
            .filter
            .date_range()
            .map(|range| {
                format!(
                    "{}..{}",
                    format_date(range.from),
                    format_date(range.to)
                )
            })
            .unwrap_or_default(),
    };
    page.prompt = Some(PromptUiState { kind, buffer });
}

/// Search applies on every keystroke; range and contains prompts apply on
/// Enter.
fn handle_prompt_key<R: AppRuntime>(
    runtime: &mut R,
    page: &mut PageView,
    key: KeyEvent,
) -> Result<Option<String>> {
    let Some(prompt) = page.prompt.as_mut() else {
        return Ok(None);
    };
    let kind = prompt.kind;
    match key.code {
        KeyCode::Esc => {
            page.prompt = None;
            if kind == PromptKind::Search && !page.filter.search().is_empty() {
                page.filter.set_search("");
                requery(runtime, page)?;
                return Ok(Some("search cleared".to_owned()));
            }
            Ok(None)
        }
        KeyCode::Backspace => {
            prompt.buffer.pop();
            live_search(runtime, page)
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.buffer.push(ch);
            live_search(runtime, page)
        }
        KeyCode::Enter => {
            let buffer = prompt.buffer.clone();
            page.prompt = None;
            let message = match kind {
                PromptKind::Search => return Ok(None),
                PromptKind::DateRange(field) => {
                    let Some((from, to)) = parse_date_range(&buffer) else {
                        page.prompt = Some(PromptUiState { kind, buffer });
                        return Ok(Some(
                            "date range must look like 2025-06-10..2025-06-20".to_owned(),
                        ));
                    };
                    page.filter.set_date_range(field.name, from, to);
                    if from.is_none() && to.is_none() {
                        format!("filter {} cleared", field.label)
                    } else {
                        format!("filter {}: {}", field.label, buffer.trim())
                    }
                }
                PromptKind::Contains(field) => {
                    page.filter.set_contains(field.name, buffer.trim());
                    if buffer.trim().is_empty() {
                        format!("filter {} cleared", field.label)
                    } else {
                        format!("filter {} contains {}", field.label, buffer.trim())
                    }
                }
            };
            page.selected_row = 0;
            requery(runtime, page)?;
            Ok(Some(message))
        }
        _ => Ok(None),
    }
}

fn live_search<R: AppRuntime>(runtime: &mut R, page: &mut PageView) -> Result<Option<String>> {
    let Some(PromptUiState {
        kind: PromptKind::Search,
        buffer,
    }) = &page.prompt
    else {
        return Ok(None);
    };
    let text = buffer.clone();
    page.filter.set_search(text);
    page.selected_row = 0;
    requery(runtime, page)?;
    Ok(None)
}

/// `from..to` with either side optional; blank clears the range.
fn parse_date_range(input: &str) -> Option<(Option<Date>, Option<Date>)> {
    let input = input.trim();
    if input.is_empty() {
        return Some((None, None));
    }
    let (from, to) = input.split_once("..")?;
    let from = parse_optional_date(from).ok()?;
    let to = parse_optional_date(to).ok()?;
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return None;
    }
    Some((from, to))
}

fn handle_modal_key<R: AppRuntime>(
    runtime: &mut R,
    page: &mut PageView,
    key: KeyEvent,
) -> Result<Option<String>> {
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return submit_modal(runtime, page);
    }
    match key.code {
        KeyCode::Esc => {
            page.modal.escape();
            Ok(None)
        }
        KeyCode::Tab | KeyCode::Down => {
            page.modal.focus_next();
            Ok(None)
        }
        KeyCode::BackTab | KeyCode::Up => {
            page.modal.focus_prev();
            Ok(None)
        }
        KeyCode::Enter => match page.modal.focused() {
            Some(FocusSlot::Field(_)) => {
                page.modal.focus_next();
                Ok(None)
            }
            Some(FocusSlot::Confirm) => submit_modal(runtime, page),
            Some(FocusSlot::Cancel | FocusSlot::Close) => {
                page.modal.close();
                Ok(None)
            }
            None => Ok(None),
        },
        KeyCode::Left | KeyCode::Right => {
            let step = if key.code == KeyCode::Left { -1 } else { 1 };
            cycle_choice(page, step);
            Ok(None)
        }
        KeyCode::Backspace => {
            if let Some((field, _)) = focused_input(page) {
                field.value.pop();
            }
            Ok(None)
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some((field, spec)) = focused_input(page)
                && !matches!(spec.map(|spec| spec.kind), Some(FieldKind::Choice(_)))
            {
                field.value.push(ch);
            }
            Ok(None)
        }
        _ => Ok(None),
    }
}

fn focused_input(
    page: &mut PageView,
) -> Option<(&mut DraftField, Option<&'static FieldSpec>)> {
    let schema = page.schema;
    let index = page.modal.focused_field()?;
    let field = page.modal.draft_mut()?.field_mut(index)?;
    let spec = schema.field(field.name);
    Some((field, spec))
}

fn cycle_choice(page: &mut PageView, step: isize) {
    let Some((field, Some(spec))) = focused_input(page) else {
        return;
    };
    let options = spec.choices();
    if options.is_empty() {
        return;
    }
    let len = options.len() as isize;
    let next = match options.iter().position(|option| *option == field.value) {
        Some(index) => (index as isize + step).rem_euclid(len) as usize,
        None if step < 0 => options.len() - 1,
        None => 0,
    };
    field.value = options[next].to_owned();
}

fn submit_modal<R: AppRuntime>(runtime: &mut R, page: &mut PageView) -> Result<Option<String>> {
    let Some(submission) = page.modal.submission() else {
        return Ok(None);
    };
    let outcome = runtime.commit(&submission)?;
    page.modal.settle(&outcome);
    if outcome.is_applied() {
        requery(runtime, page)?;
    }
    Ok(Some(outcome.message(page.schema.singular)))
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let palette = Palette::for_theme(state.theme);
    frame.render_widget(Block::default().style(palette.base), frame.area());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    match state.route {
        Route::Login => {
            let header = Paragraph::new("sign in to continue")
                .block(Block::default().title("backoffice").borders(Borders::ALL));
            frame.render_widget(header, layout[0]);

            let area = centered_rect(60, 70, layout[1]);
            let login = Paragraph::new(render_login_text(&view_data.login)).block(
                Block::default()
                    .title("login")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent)),
            );
            frame.render_widget(login, area);
        }
        Route::Page(active) => {
            let selected = PageKind::ALL
                .iter()
                .position(|page| *page == active)
                .unwrap_or(0);
            let titles = PageKind::ALL
                .iter()
                .map(|page| page.label())
                .collect::<Vec<_>>();
            let tabs = Tabs::new(titles)
                .block(Block::default().title("backoffice").borders(Borders::ALL))
                .style(Style::default().fg(palette.muted))
                .highlight_style(
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .select(selected);
            frame.render_widget(tabs, layout[0]);

            match &view_data.page {
                Some(page) => render_table(frame, layout[1], page, &palette),
                None => {
                    let body = Paragraph::new(render_dashboard_text(state, view_data))
                        .block(Block::default().borders(Borders::ALL).title(active.label()));
                    frame.render_widget(body, layout[1]);
                }
            }
        }
    }

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(palette.status))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if let Some(page) = &view_data.page
        && page.modal.is_open()
    {
        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);
        let modal = Paragraph::new(render_modal_text(page.schema, &page.modal)).block(
            Block::default()
                .title(modal_title(page.schema, &page.modal))
                .borders(Borders::ALL)
                .style(palette.base)
                .border_style(Style::default().fg(palette.accent)),
        );
        frame.render_widget(modal, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 75, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text()).block(
            Block::default()
                .title("help")
                .borders(Borders::ALL)
                .style(palette.base),
        );
        frame.render_widget(help, area);
    }
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, page: &PageView, palette: &Palette) {
    let columns = page.columns();
    let widths = vec![Constraint::Min(8); columns.len().max(1)];
    let header = Row::new(columns.iter().enumerate().map(|(index, field)| {
        let mut style = Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD);
        if index == page.selected_col {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(header_label(page, field)).style(style)
    }));

    let slice = page.slice();
    let rows: Vec<Row> = if slice.is_empty() {
        vec![Row::new([
            Cell::from(EMPTY_TABLE_TEXT).style(Style::default().fg(palette.muted))
        ])]
    } else {
        slice
            .items
            .iter()
            .enumerate()
            .map(|(row_index, record)| {
                let selected = row_index == page.selected_row;
                let cells = columns.iter().enumerate().map(|(column_index, field)| {
                    let mut style = Style::default();
                    if selected {
                        style = style.bg(palette.selected_bg).fg(palette.selected_fg);
                    }
                    if selected && column_index == page.selected_col {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    Cell::from(field.format(record.get(field.name))).style(style)
                });
                Row::new(cells)
            })
            .collect()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(page, &slice))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn header_label(page: &PageView, field: &FieldSpec) -> String {
    let mut label = field.label.to_owned();
    if let Some(sort) = page.filter.sort()
        && sort.field == field.name
    {
        label.push(' ');
        label.push_str(match sort.direction {
            SortDirection::Asc => SORT_MARK_ASC,
            SortDirection::Desc => SORT_MARK_DESC,
        });
    }
    if field_filter_active(&page.filter, field) {
        label.push(' ');
        label.push_str(FILTER_MARK);
    }
    label
}

fn field_filter_active(filter: &FilterState, field: &FieldSpec) -> bool {
    filter.exact(field.name).is_some()
        || filter.selected(field.name).is_some()
        || filter.contains(field.name).is_some()
        || filter
            .date_range()
            .is_some_and(|range| range.field == field.name)
}

fn table_title(page: &PageView, slice: &PageSlice<Record>) -> String {
    let mut parts = vec![
        page.schema.title.to_owned(),
        slice.range_label(),
        format!("page {}/{}", slice.page, slice.total_pages.max(1)),
        format!("{}/page", page.filter.page_size()),
    ];
    parts.extend(filter_summary(page.schema, &page.filter));
    parts.join(" | ")
}

fn filter_summary(schema: &Schema, filter: &FilterState) -> Vec<String> {
    let mut parts = Vec::new();
    let search = filter.search().trim();
    if !search.is_empty() {
        parts.push(format!("search \"{search}\""));
    }
    for (field, value) in filter.exact_filters() {
        parts.push(format!("{}={value}", schema.label_for(field).to_lowercase()));
    }
    for (field, values) in filter.multi_filters() {
        let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        parts.push(format!("{} in {joined}", schema.label_for(field).to_lowercase()));
    }
    for (field, text) in filter.contains_filters() {
        parts.push(format!("{}~{text}", schema.label_for(field).to_lowercase()));
    }
    if let Some(range) = filter.date_range() {
        parts.push(format!(
            "{} {}..{}",
            schema.label_for(&range.field).to_lowercase(),
            format_date(range.from),
            format_date(range.to)
        ));
    }
    parts
}

fn render_login_text(login: &LoginUiState) -> String {
    let mut lines = vec!["Sign in to backoffice".to_owned(), String::new()];
    let fields = [
        (LoginField::Email, "email", "Email", login.email.clone()),
        (
            LoginField::Password,
            "password",
            "Password",
            "*".repeat(login.password.chars().count()),
        ),
    ];
    for (field, name, label, shown) in fields {
        let marker = if login.focus == field { FOCUS_MARK } else { " " };
        lines.push(format!("{marker} {label:<9} {shown}"));
        if let Some(message) = login.errors.get(name) {
            lines.push(format!("    ! {message}"));
        }
    }
    lines.push(String::new());
    lines.push("enter sign in | tab switch field | ctrl+q quit".to_owned());
    lines.join("\n")
}

fn render_dashboard_text(state: &AppState, view_data: &ViewData) -> String {
    let mut lines = Vec::new();
    if let Some(user) = state.session.user() {
        lines.push(format!("signed in as {}", user.email));
        lines.push(String::new());
    }
    if view_data.dashboard_counts.is_empty() {
        lines.push("nothing to show".to_owned());
    }
    for (page, count) in &view_data.dashboard_counts {
        lines.push(format!("{:<14} {count:>4}", page.label()));
    }
    lines.join("\n")
}

fn modal_title(schema: &Schema, modal: &Modal) -> String {
    let record = modal.record().map(|record| record.id.to_string());
    match (modal, record) {
        (Modal::Viewing { .. }, Some(id)) => format!("{} {id}", schema.singular),
        (Modal::Editing { .. }, Some(id)) => format!("edit {} {id}", schema.singular),
        (Modal::Deleting { .. }, Some(id)) => format!("delete {} {id}", schema.singular),
        (Modal::Creating { .. }, _) => format!("new {}", schema.singular),
        _ => String::new(),
    }
}

fn render_modal_text(schema: &Schema, modal: &Modal) -> String {
    let focused = modal.focused();
    let mut lines = Vec::new();
    match modal {
        Modal::Closed => return String::new(),
        Modal::Viewing { record, .. } => {
            for field in schema.fields {
                lines.push(format!(
                    "{:<16} {}",
                    field.label,
                    field.format(record.get(field.name))
                ));
            }
        }
        Modal::Deleting { record, .. } => {
            let name = schema
                .columns()
                .next()
                .map(|field| record.display(field.name))
                .unwrap_or_default();
            lines.push(format!(
                "Delete {} {} ({name})? This cannot be undone.",
                schema.singular, record.id
            ));
        }
        Modal::Editing { draft, .. } | Modal::Creating { draft, .. } => {
            for (index, field) in draft.fields().iter().enumerate() {
                let marker = if focused == Some(FocusSlot::Field(index)) {
                    FOCUS_MARK
                } else {
                    " "
                };
                let required = schema
                    .field(field.name)
                    .is_some_and(FieldSpec::is_required);
                let label = if required {
                    format!("{}*", field.label)
                } else {
                    field.label.to_owned()
                };
                let hint = match schema.field(field.name).map(|spec| spec.kind) {
                    Some(FieldKind::Choice(_)) => "  ←/→",
                    _ => "",
                };
                lines.push(format!("{marker} {label:<17} {}{hint}", field.value));
                if let Some(message) = draft.errors.get(field.name) {
                    lines.push(format!("    ! {message}"));
                }
            }
        }
    }
    lines.push(String::new());
    let buttons = modal
        .slots()
        .into_iter()
        .filter(|slot| !matches!(slot, FocusSlot::Field(_)))
        .map(|slot| {
            let label = button_label(modal, slot);
            if focused == Some(slot) {
                format!("[{FOCUS_MARK} {label} ]")
            } else {
                format!("[ {label} ]")
            }
        })
        .collect::<Vec<_>>();
    lines.push(buttons.join("  "));
    lines.join("\n")
}

fn button_label(modal: &Modal, slot: FocusSlot) -> &'static str {
    match (modal, slot) {
        (Modal::Deleting { .. }, FocusSlot::Confirm) => "delete",
        (Modal::Creating { .. }, FocusSlot::Confirm) => "create",
        (_, FocusSlot::Confirm) => "save",
        (_, slot) => slot.label(),
    }
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let hints = match (&state.route, &view_data.page) {
        (Route::Login, _) => "enter sign in | tab field | ctrl+q quit".to_owned(),
        (Route::Page(_), Some(page)) if page.modal.is_open() => {
            "tab/shift+tab move | ←/→ choose | enter select | ctrl+s save | esc close".to_owned()
        }
        (Route::Page(_), Some(page)) if page.prompt.is_some() => {
            let prompt = page.prompt.as_ref().map_or_else(String::new, |prompt| {
                format!("{}: {}_", prompt.kind.label(), prompt.buffer)
            });
            format!("{prompt} | enter apply | esc cancel")
        }
        (Route::Page(_), Some(_)) => {
            "j/k/h/l g/G [/] z | s sort | f/F filter | / search r range p contains | enter a e d x | tab page | t theme O logout ? help"
                .to_owned()
        }
        (Route::Page(_), None) => "tab page | t theme | O logout | ? help | ctrl+q quit".to_owned(),
    };
    match &state.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints,
    }
}

fn help_overlay_text() -> &'static str {
    "tab / shift+tab   next / previous page
j k  h l          move row / column
g G               first / last row
[ ]               previous / next page
z                 cycle page size
s                 sort by column (again to reverse)
f                 filter by column
F                 clear filters
/                 search
r                 date range filter
p                 contains filter
enter             view record
a e d             create / edit / delete
x                 export CSV
t                 toggle theme
O                 log out
ctrl+q            quit
esc / ?           close help"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, InternalEvent, LoginField, PageView, ViewData, centered_rect,
        handle_key_event, parse_date_range, render, render_login_text, render_modal_text,
        status_text,
    };
    use anyhow::{Context, Result};
    use backoffice_app::{
        AppState, CommitOutcome, FilterState, FocusSlot, Modal, ModalKind, PageKind, Record,
        Route, Schema, SortDirection, Submission, Theme,
    };
    use backoffice_store::{RecordStore, commit, dashboard_counts, run_query, schema_for, seed_store};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use std::path::PathBuf;
    use std::sync::mpsc;

    #[derive(Debug, Default)]
    struct TestRuntime {
        store: Option<RecordStore>,
        exported: Vec<usize>,
    }

    impl TestRuntime {
        fn mounted(&mut self) -> Result<(&mut RecordStore, &'static Schema)> {
            let store = self.store.as_mut().context("no page mounted")?;
            let schema = schema_for(store.page()).context("page has no schema")?;
            Ok((store, schema))
        }
    }

    impl AppRuntime for TestRuntime {
        fn schema(&self, page: PageKind) -> Option<&'static Schema> {
            schema_for(page)
        }

        fn mount_page(&mut self, page: PageKind) -> Result<usize> {
            let store = seed_store(page)?;
            let count = store.len();
            self.store = Some(store);
            Ok(count)
        }

        fn query(&mut self, filter: &FilterState) -> Result<Vec<Record>> {
            let (store, schema) = self.mounted()?;
            Ok(run_query(schema, store.records(), filter))
        }

        fn commit(&mut self, submission: &Submission) -> Result<CommitOutcome> {
            let (store, schema) = self.mounted()?;
            commit(store, schema, submission)
        }

        fn export(&mut self, rows: &[Record]) -> Result<PathBuf> {
            self.exported.push(rows.len());
            Ok(PathBuf::from("export.csv"))
        }

        fn dashboard_counts(&mut self) -> Result<Vec<(PageKind, usize)>> {
            dashboard_counts()
        }
    }

    struct Harness {
        state: AppState,
        runtime: TestRuntime,
        view_data: ViewData,
        tx: mpsc::Sender<InternalEvent>,
        _rx: mpsc::Receiver<InternalEvent>,
    }

    impl Harness {
        fn at_login(start: PageKind) -> Self {
            let (tx, rx) = mpsc::channel();
            Self {
                state: AppState::new(Theme::Light, start),
                runtime: TestRuntime::default(),
                view_data: ViewData::default(),
                tx,
                _rx: rx,
            }
        }

        fn logged_in(page: PageKind) -> Self {
            let mut harness = Self::at_login(page);
            harness.type_text("admin@example.com");
            harness.press(KeyCode::Tab);
            harness.type_text("secret");
            harness.press(KeyCode::Enter);
            assert_eq!(harness.state.route, Route::Page(page));
            harness
        }

        fn send(&mut self, key: KeyEvent) -> bool {
            handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                key,
            )
        }

        fn press(&mut self, code: KeyCode) -> bool {
            self.send(KeyEvent::new(code, KeyModifiers::NONE))
        }

        fn ctrl(&mut self, ch: char) -> bool {
            self.send(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
        }

        fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.press(KeyCode::Char(ch));
            }
        }

        fn page(&self) -> &PageView {
            self.view_data.page.as_ref().expect("record page mounted")
        }

        fn status(&self) -> &str {
            self.state.status_line.as_deref().unwrap_or("")
        }
    }

    #[test]
    fn ctrl_q_quits() {
        let mut harness = Harness::at_login(PageKind::Users);
        assert!(harness.ctrl('q'));
        let mut harness = Harness::logged_in(PageKind::Users);
        assert!(!harness.press(KeyCode::Char('q')));
        assert!(harness.ctrl('q'));
    }

    #[test]
    fn login_lands_on_requested_page() {
        let harness = Harness::logged_in(PageKind::Products);
        let page = harness.page();
        assert_eq!(page.schema.page, PageKind::Products);
        assert_eq!(page.rows.len(), 6);
        assert!(harness.view_data.login.email.is_empty());
    }

    #[test]
    fn login_errors_stay_on_login() {
        let mut harness = Harness::at_login(PageKind::Users);
        harness.press(KeyCode::Enter);
        assert_eq!(harness.state.route, Route::Login);
        let errors = &harness.view_data.login.errors;
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        let text = render_login_text(&harness.view_data.login);
        assert!(text.contains("! Email is required"), "login {text}");

        harness.type_text("not-an-email");
        harness.press(KeyCode::Tab);
        harness.type_text("pw");
        harness.press(KeyCode::Enter);
        assert_eq!(
            harness.view_data.login.errors.get("email"),
            Some("Email must be a valid email address")
        );
        assert_eq!(harness.view_data.login.focus, LoginField::Email);
        assert!(render_login_text(&harness.view_data.login).contains("**"));
    }

    #[test]
    fn dashboard_counts_load_on_mount() {
        let mut harness = Harness::logged_in(PageKind::Dashboard);
        assert!(harness.view_data.page.is_none());
        assert!(
            harness
                .view_data
                .dashboard_counts
                .contains(&(PageKind::Roles, 3))
        );
        harness.press(KeyCode::Tab);
        assert_eq!(harness.page().schema.page, PageKind::Users);
    }

    #[test]
    fn navigation_mounts_fresh_store() {
        let mut harness = Harness::logged_in(PageKind::Categories);
        harness.press(KeyCode::Char('d'));
        harness.press(KeyCode::Tab);
        harness.press(KeyCode::Enter);
        assert_eq!(harness.page().rows.len(), 2);

        harness.press(KeyCode::Tab);
        assert_eq!(harness.page().schema.page, PageKind::Inventory);
        harness.press(KeyCode::BackTab);
        assert_eq!(harness.page().rows.len(), 3);
        assert_eq!(harness.page().filter, FilterState::for_schema(harness.page().schema));
    }

    #[test]
    fn search_applies_while_typing() {
        let mut harness = Harness::logged_in(PageKind::Products);
        harness.press(KeyCode::Char('/'));
        harness.type_text("acer");
        assert_eq!(harness.page().rows.len(), 1);
        assert!(status_text(&harness.state, &harness.view_data).contains("search: acer_"));
        harness.press(KeyCode::Enter);
        assert!(harness.page().prompt.is_none());
        assert_eq!(harness.page().filter.search(), "acer");

        harness.press(KeyCode::Char('/'));
        harness.press(KeyCode::Esc);
        assert_eq!(harness.page().filter.search(), "");
        assert_eq!(harness.page().rows.len(), 6);
    }

    #[test]
    fn sort_toggles_on_selected_column() {
        let mut harness = Harness::logged_in(PageKind::Products);
        harness.press(KeyCode::Char('s'));
        let sort = harness.page().filter.sort().expect("sorted");
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(harness.status(), "sort Name desc");
        assert_eq!(harness.page().rows[0].display("name"), "Wireless Mouse");

        harness.press(KeyCode::Char('l'));
        harness.press(KeyCode::Char('s'));
        let sort = harness.page().filter.sort().expect("sorted");
        assert_eq!(sort.field, "price");
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(harness.page().rows[0].display("name"), "Tailwind Course");
    }

    #[test]
    fn sort_keeps_page_and_filters_reset_it() {
        let mut harness = Harness::logged_in(PageKind::Users);
        harness.press(KeyCode::Char(']'));
        assert_eq!(harness.page().filter.page(), 2);
        harness.press(KeyCode::Char('s'));
        assert_eq!(harness.page().filter.page(), 2);
        harness.press(KeyCode::Char('z'));
        assert_eq!(harness.page().filter.page_size(), 10);
        assert_eq!(harness.page().filter.page(), 1);
        harness.press(KeyCode::Char(']'));
        assert_eq!(harness.status(), "already on the last page");
    }

    #[test]
    fn exact_filter_cycles_through_choices() {
        let mut harness = Harness::logged_in(PageKind::Products);
        harness.press(KeyCode::Char('l'));
        harness.press(KeyCode::Char('l'));
        harness.press(KeyCode::Char('f'));
        assert_eq!(harness.page().filter.exact("category"), Some("Books"));
        assert_eq!(harness.page().rows.len(), 2);
        assert_eq!(harness.status(), "filter Category: Books");

        harness.press(KeyCode::Char('F'));
        assert_eq!(harness.page().rows.len(), 6);
        harness.press(KeyCode::Char('F'));
        assert_eq!(harness.status(), "no filters to clear");
    }

    #[test]
    fn multi_select_toggles_selected_value() {
        let mut harness = Harness::logged_in(PageKind::Tickets);
        let priority = harness
            .page()
            .columns()
            .iter()
            .position(|field| field.name == "priority")
            .expect("priority column");
        for _ in 0..priority {
            harness.press(KeyCode::Char('l'));
        }
        let value = harness.page().rows[0].display("priority");
        harness.press(KeyCode::Char('f'));
        let rows = &harness.page().rows;
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|record| record.display("priority") == value));
    }

    #[test]
    fn date_range_prompt_filters_inclusive() {
        let mut harness = Harness::logged_in(PageKind::Tickets);
        harness.press(KeyCode::Char('r'));
        harness.type_text("2025-06-16..2025-06-18");
        harness.press(KeyCode::Enter);
        assert_eq!(harness.page().rows.len(), 3);

        harness.press(KeyCode::Char('r'));
        for _ in 0..30 {
            harness.press(KeyCode::Backspace);
        }
        harness.type_text("june");
        harness.press(KeyCode::Enter);
        assert!(harness.page().prompt.is_some());
        assert!(harness.status().starts_with("date range must look like"));
    }

    #[test]
    fn contains_prompt_filters_permissions() {
        let mut harness = Harness::logged_in(PageKind::Roles);
        harness.press(KeyCode::Char('p'));
        harness.type_text("reports");
        harness.press(KeyCode::Enter);
        let rows = &harness.page().rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].display("name"), "admin");
    }

    #[test]
    fn create_modal_traps_focus_and_escape_discards() {
        let mut harness = Harness::logged_in(PageKind::Categories);
        harness.press(KeyCode::Char('a'));
        let page = harness.page();
        assert_eq!(page.modal.kind(), ModalKind::Creating);
        assert_eq!(page.modal.focused(), Some(FocusSlot::Field(0)));

        harness.press(KeyCode::BackTab);
        assert_eq!(harness.page().modal.focused(), Some(FocusSlot::Cancel));
        harness.press(KeyCode::Tab);
        assert_eq!(harness.page().modal.focused(), Some(FocusSlot::Field(0)));

        harness.type_text("Games");
        harness.press(KeyCode::Esc);
        assert_eq!(harness.page().modal, Modal::Closed);
        assert_eq!(harness.page().rows.len(), 3);
    }

    #[test]
    fn create_modal_commits_and_requeries() {
        let mut harness = Harness::logged_in(PageKind::Categories);
        harness.press(KeyCode::Char('a'));
        harness.type_text("Games");
        harness.press(KeyCode::Tab);
        harness.press(KeyCode::Right);
        assert_eq!(
            harness
                .page()
                .modal
                .draft()
                .and_then(|draft| draft.value("status")),
            Some("inactive")
        );
        harness.ctrl('s');
        assert_eq!(harness.page().modal, Modal::Closed);
        assert_eq!(harness.page().rows.len(), 4);
        assert_eq!(harness.status(), "category 4 created");
    }

    #[test]
    fn invalid_create_keeps_modal_open_with_errors() {
        let mut harness = Harness::logged_in(PageKind::Categories);
        harness.press(KeyCode::Char('a'));
        harness.type_text("Bo");
        harness.ctrl('s');
        let page = harness.page();
        assert_eq!(page.modal.kind(), ModalKind::Creating);
        assert_eq!(page.rows.len(), 3);
        let text = render_modal_text(page.schema, &page.modal);
        assert!(text.contains("! Name must be at least 3 characters"), "modal {text}");
        assert!(harness.status().starts_with("fix 1 field(s)"));
    }

    #[test]
    fn edit_modal_saves_changes() {
        let mut harness = Harness::logged_in(PageKind::Categories);
        harness.press(KeyCode::Char('e'));
        assert_eq!(harness.page().modal.kind(), ModalKind::Editing);
        for _ in 0..10 {
            harness.press(KeyCode::Backspace);
        }
        harness.type_text("Board Games");
        harness.press(KeyCode::Tab);
        harness.press(KeyCode::Tab);
        assert_eq!(harness.page().modal.focused(), Some(FocusSlot::Confirm));
        harness.press(KeyCode::Enter);
        assert_eq!(harness.page().modal, Modal::Closed);
        assert!(
            harness
                .page()
                .rows
                .iter()
                .any(|record| record.display("name") == "Board Games")
        );
    }

    #[test]
    fn delete_focus_starts_on_cancel() {
        let mut harness = Harness::logged_in(PageKind::Roles);
        harness.press(KeyCode::Char('d'));
        assert_eq!(harness.page().modal.focused(), Some(FocusSlot::Cancel));
        let text = render_modal_text(harness.page().schema, &harness.page().modal);
        assert!(text.contains("[› cancel ]"), "modal {text}");
        harness.press(KeyCode::Enter);
        assert_eq!(harness.page().rows.len(), 3);

        harness.press(KeyCode::Char('d'));
        harness.press(KeyCode::Tab);
        harness.press(KeyCode::Enter);
        assert_eq!(harness.page().rows.len(), 2);
        assert!(harness.status().ends_with("deleted"));
    }

    #[test]
    fn view_modal_lists_derived_fields() {
        let mut harness = Harness::logged_in(PageKind::Sales);
        harness.press(KeyCode::Char('/'));
        harness.type_text("Juan");
        harness.press(KeyCode::Enter);
        harness.press(KeyCode::Enter);
        let page = harness.page();
        assert_eq!(page.modal.focused(), Some(FocusSlot::Close));
        let text = render_modal_text(page.schema, &page.modal);
        assert!(text.contains("$21,800"), "modal {text}");
        harness.press(KeyCode::Esc);
        assert!(!harness.page().modal.is_open());
    }

    #[test]
    fn export_sends_filtered_rows() {
        let mut harness = Harness::logged_in(PageKind::Products);
        harness.press(KeyCode::Char('/'));
        harness.type_text("book");
        harness.press(KeyCode::Enter);
        harness.press(KeyCode::Char('x'));
        assert_eq!(harness.runtime.exported, vec![2]);
        assert_eq!(harness.status(), "exported 2 rows to export.csv");
    }

    #[test]
    fn theme_toggle_and_logout() {
        let mut harness = Harness::logged_in(PageKind::Users);
        harness.press(KeyCode::Char('t'));
        assert_eq!(harness.state.theme, Theme::Dark);
        assert_eq!(harness.status(), "dark theme");

        harness.press(KeyCode::Char('O'));
        assert_eq!(harness.state.route, Route::Login);
        assert!(harness.view_data.page.is_none());
        assert!(!harness.state.session.is_authenticated());
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut harness = Harness::logged_in(PageKind::Users);
        harness.press(KeyCode::Char('?'));
        assert!(harness.view_data.help_visible);
        harness.press(KeyCode::Char('a'));
        assert!(!harness.page().modal.is_open());
        harness.press(KeyCode::Esc);
        assert!(!harness.view_data.help_visible);
    }

    #[test]
    fn parse_date_range_shapes() {
        assert_eq!(parse_date_range(""), Some((None, None)));
        let (from, to) = parse_date_range("2025-06-10..").expect("open end");
        assert!(from.is_some());
        assert!(to.is_none());
        assert!(parse_date_range("2025-06-20..2025-06-10").is_none());
        assert!(parse_date_range("2025-06-10").is_none());
        assert!(parse_date_range("x..y").is_none());
    }

    #[test]
    fn render_draws_table_and_modal() -> Result<()> {
        let mut harness = Harness::logged_in(PageKind::Products);
        harness.press(KeyCode::Char('a'));
        let mut terminal = Terminal::new(TestBackend::new(160, 40))?;
        terminal.draw(|frame| render(frame, &harness.state, &harness.view_data))?;
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Acer Laptop"));
        assert!(text.contains("new product"));
        assert!(text.contains("1-5 of 6"));
        Ok(())
    }

    #[test]
    fn empty_results_render_placeholder() -> Result<()> {
        let mut harness = Harness::logged_in(PageKind::Products);
        harness.press(KeyCode::Char('/'));
        harness.type_text("zzzz");
        let mut terminal = Terminal::new(TestBackend::new(120, 30))?;
        terminal.draw(|frame| render(frame, &harness.state, &harness.view_data))?;
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("no records found"));
        Ok(())
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, area);
        assert!(inner.x >= area.x && inner.right() <= area.right());
        assert!(inner.y >= area.y && inner.bottom() <= area.bottom());
        assert_eq!(inner.width, 60);
    }
}
