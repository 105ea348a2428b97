use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use drugbot_core::catalog::{self, Example};
use drugbot_core::display::{abbreviate_embedding, has_embedding_literal, tool_header};
use drugbot_core::suggestion::suggestion_for;
use drugbot_core::{ChatMessage, PendingQuery};
use drugbot_service::{BlockingWorkflow, Outcome, REJECTED_MESSAGE};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::components::chat_log::ChatLog;

/// What the app is currently doing
#[derive(Debug, Clone)]
pub enum Mode {
    /// Typing a question
    Chat { input: String },
    /// Moving through past answers
    Browse,
    /// Example question picker
    Examples { list_state: ListState },
    /// A drafted query waiting for confirm/reject
    Review { scroll: u16 },
    /// Editing the drafted query inline
    EditQuery { input: String },
    /// Tool and query behind one answer
    Details { index: usize, scroll: u16 },
    /// Startup and connectivity checks
    Health { checks: Vec<HealthCheck> },
}

#[derive(Debug, Clone)]
pub struct HealthCheck {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
}

/// Slow work queued by a key press. The event loop draws a frame before
/// running it so the user sees that something is happening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Submit(String),
    Example(usize),
    Confirm(String),
}

/// Request to open the pending query in $EDITOR.
#[derive(Debug, Clone)]
pub struct EditorRequest {
    pub path: PathBuf,
}

pub struct App {
    workflow: BlockingWorkflow,
    mode: Mode,
    chat_log: ChatLog,
    status_message: Option<String>,
    pending_job: Option<Job>,
    /// Set by handle_key when the user wants to open $EDITOR.
    /// The event loop checks this and handles the editor subprocess.
    pub editor_request: Option<EditorRequest>,
}

impl App {
    pub fn new(workflow: BlockingWorkflow) -> Self {
        Self {
            workflow,
            mode: Mode::Chat {
                input: String::new(),
            },
            chat_log: ChatLog::new(),
            status_message: None,
            pending_job: None,
            editor_request: None,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn workflow(&self) -> &BlockingWorkflow {
        &self.workflow
    }

    pub fn pending_job(&self) -> Option<&Job> {
        self.pending_job.as_ref()
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.chat_log.selected()
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Chat { .. } | Mode::EditQuery { .. })
    }

    /// True when a queued job should run before the next key is read.
    pub fn needs_processing(&self) -> bool {
        self.pending_job.is_some()
    }

    /// Run the queued job. Called by the event loop after drawing.
    pub fn process_pending(&mut self) {
        let Some(job) = self.pending_job.take() else {
            return;
        };
        match job {
            Job::Submit(question) => match self.workflow.submit(&question) {
                Ok(generated) => {
                    self.status_message =
                        Some(format!("Drafted a {} query", generated.tool.badge()));
                    self.mode = Mode::Review { scroll: 0 };
                }
                Err(e) => {
                    tracing::warn!(error = %e, "question failed");
                    self.status_message = Some(format!("Error: {e}"));
                    self.mode = Mode::Chat {
                        input: String::new(),
                    };
                }
            },
            Job::Example(idx) => {
                let Some(example) = catalog::examples().get(idx).copied() else {
                    self.mode = Mode::Browse;
                    return;
                };
                match self.workflow.select_example(example) {
                    Ok(()) => self.mode = Mode::Review { scroll: 0 },
                    Err(e) => {
                        self.status_message = Some(format!("Error: {e}"));
                        self.mode = Mode::Browse;
                    }
                }
            }
            Job::Confirm(query) => match self.workflow.confirm(&query) {
                Ok(Outcome::Answered { .. }) => {
                    self.chat_log.select_last(self.workflow.session().transcript());
                    self.status_message = Some("Answered".into());
                    self.mode = Mode::Chat {
                        input: String::new(),
                    };
                }
                Ok(Outcome::Failed { .. }) => {
                    self.status_message =
                        Some("Query failed. Fix it and confirm again, or reject".into());
                    self.mode = Mode::Review { scroll: 0 };
                }
                Ok(Outcome::Rejected) => {
                    self.mode = Mode::Chat {
                        input: String::new(),
                    };
                }
                Err(e) => {
                    self.status_message = Some(format!("Error: {e}"));
                    self.mode = Mode::Chat {
                        input: String::new(),
                    };
                }
            },
        }
    }

    /// Called after $EDITOR exits. Confirms the edited file contents.
    pub fn editor_done(&mut self) {
        if let Some(req) = self.editor_request.take() {
            match std::fs::read_to_string(&req.path) {
                Ok(content) => {
                    let query = content.trim().to_string();
                    if query.is_empty() {
                        self.status_message = Some("Empty query, nothing confirmed".into());
                        self.mode = Mode::Review { scroll: 0 };
                    } else {
                        self.pending_job = Some(Job::Confirm(query));
                    }
                }
                Err(e) => {
                    self.status_message = Some(format!("Read error: {e}"));
                    self.mode = Mode::Review { scroll: 0 };
                }
            }
            let _ = std::fs::remove_file(&req.path);
        }
    }

    /// Report a failed $EDITOR run from the event loop.
    pub fn editor_failed(&mut self, error: &str) {
        if let Some(req) = self.editor_request.take() {
            let _ = std::fs::remove_file(&req.path);
        }
        self.status_message = Some(format!("Editor error: {error}"));
        self.mode = Mode::Review { scroll: 0 };
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.pending_job.is_some() {
            return;
        }
        self.status_message = None;

        match &self.mode.clone() {
            Mode::Chat { input } => self.handle_chat(key, input.clone()),
            Mode::Browse => self.handle_browse(key),
            Mode::Examples { list_state } => self.handle_examples(key, list_state.clone()),
            Mode::Review { scroll } => self.handle_review(key, *scroll),
            Mode::EditQuery { input } => self.handle_edit_query(key, input.clone()),
            Mode::Details { index, scroll } => self.handle_details(key, *index, *scroll),
            Mode::Health { .. } => self.handle_health(key),
        }
    }

    fn handle_chat(&mut self, key: KeyEvent, mut input: String) {
        match key.code {
            KeyCode::Enter => {
                let question = input.trim().to_string();
                if question.is_empty() {
                    return;
                }
                self.pending_job = Some(Job::Submit(question));
                self.mode = Mode::Chat {
                    input: String::new(),
                };
            }
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Tab => self.open_review(),
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::Chat { input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::Chat { input };
            }
            _ => {}
        }
    }

    fn handle_browse(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('i') | KeyCode::Char('/') => {
                self.mode = Mode::Chat {
                    input: String::new(),
                };
            }
            KeyCode::Char('x') => {
                let mut list_state = ListState::default();
                list_state.select(Some(0));
                self.mode = Mode::Examples { list_state };
            }
            KeyCode::Char('v') | KeyCode::Tab => self.open_review(),
            KeyCode::Char('H') => {
                let checks = self.run_health_checks();
                self.mode = Mode::Health { checks };
            }
            KeyCode::Enter => match self.chat_log.selected() {
                Some(index) => self.mode = Mode::Details { index, scroll: 0 },
                None => self.status_message = Some("No answer selected".into()),
            },
            _ => self
                .chat_log
                .handle_key(key, self.workflow.session().transcript()),
        }
    }

    fn open_review(&mut self) {
        if self.workflow.session().awaiting_confirmation() {
            self.mode = Mode::Review { scroll: 0 };
        } else {
            self.status_message = Some("No query awaiting confirmation".into());
        }
    }

    fn handle_examples(&mut self, key: KeyEvent, mut list_state: ListState) {
        let count = catalog::examples().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let i = list_state.selected().unwrap_or(0);
                if i + 1 < count {
                    list_state.select(Some(i + 1));
                }
                self.mode = Mode::Examples { list_state };
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let i = list_state.selected().unwrap_or(0);
                list_state.select(Some(i.saturating_sub(1)));
                self.mode = Mode::Examples { list_state };
            }
            KeyCode::Enter => {
                if let Some(idx) = list_state.selected() {
                    self.pending_job = Some(Job::Example(idx));
                }
            }
            KeyCode::Esc => self.mode = Mode::Browse,
            _ => {}
        }
    }

    fn handle_review(&mut self, key: KeyEvent, scroll: u16) {
        let Some(pending) = self.workflow.session().pending().cloned() else {
            self.mode = Mode::Chat {
                input: String::new(),
            };
            return;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Char('c') => {
                self.pending_job = Some(Job::Confirm(pending.query));
            }
            KeyCode::Char('r') => match self.workflow.reject() {
                Ok(_) => {
                    self.status_message = Some(REJECTED_MESSAGE.into());
                    self.mode = Mode::Chat {
                        input: String::new(),
                    };
                }
                Err(e) => self.status_message = Some(format!("Error: {e}")),
            },
            KeyCode::Char('e') => {
                self.mode = Mode::EditQuery {
                    input: pending.query,
                };
            }
            KeyCode::Char('E') => self.request_editor(&pending),
            KeyCode::Char('j') | KeyCode::Down => {
                self.mode = Mode::Review {
                    scroll: scroll.saturating_add(1),
                };
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.mode = Mode::Review {
                    scroll: scroll.saturating_sub(1),
                };
            }
            KeyCode::Esc => self.mode = Mode::Browse,
            _ => {}
        }
    }

    fn request_editor(&mut self, pending: &PendingQuery) {
        let path = std::env::temp_dir().join(format!("drugbot-query-{}.sql", std::process::id()));
        match std::fs::write(&path, &pending.query) {
            Ok(()) => self.editor_request = Some(EditorRequest { path }),
            Err(e) => self.status_message = Some(format!("Write error: {e}")),
        }
    }

    fn handle_edit_query(&mut self, key: KeyEvent, mut input: String) {
        // Ctrl+S confirms
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            let query = input.trim().to_string();
            if query.is_empty() {
                self.status_message = Some("Query is empty".into());
                self.mode = Mode::EditQuery { input };
            } else {
                self.pending_job = Some(Job::Confirm(query));
                self.mode = Mode::Review { scroll: 0 };
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.mode = Mode::Review { scroll: 0 },
            KeyCode::Enter => {
                input.push('\n');
                self.mode = Mode::EditQuery { input };
            }
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::EditQuery { input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::EditQuery { input };
            }
            _ => {}
        }
    }

    fn handle_details(&mut self, key: KeyEvent, index: usize, scroll: u16) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.mode = Mode::Details {
                    index,
                    scroll: scroll.saturating_add(1),
                };
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.mode = Mode::Details {
                    index,
                    scroll: scroll.saturating_sub(1),
                };
            }
            KeyCode::Esc | KeyCode::Enter => self.mode = Mode::Browse,
            _ => {}
        }
    }

    fn handle_health(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') => {
                let checks = self.run_health_checks();
                self.mode = Mode::Health { checks };
            }
            KeyCode::Esc => self.mode = Mode::Browse,
            _ => {}
        }
    }

    pub fn run_health_checks(&self) -> Vec<HealthCheck> {
        let mut checks = Vec::new();

        checks.push(match self.workflow.preflight_check() {
            Ok(()) => HealthCheck {
                name: "Model".into(),
                status: CheckStatus::Passed,
                detail: self.workflow.model_name(),
            },
            Err(e) => HealthCheck {
                name: "Model".into(),
                status: CheckStatus::Failed,
                detail: format!("{e}"),
            },
        });

        checks.push(match self.workflow.table_names() {
            Ok(tables) if tables.is_empty() => HealthCheck {
                name: "Database".into(),
                status: CheckStatus::Failed,
                detail: "No tables found".into(),
            },
            Ok(tables) => HealthCheck {
                name: "Database".into(),
                status: CheckStatus::Passed,
                detail: tables.join(", "),
            },
            Err(e) => HealthCheck {
                name: "Database".into(),
                status: CheckStatus::Failed,
                detail: format!("{e}"),
            },
        });

        checks
    }

    // ---- Rendering ----

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        self.chat_log.render(
            frame,
            layout[1],
            self.workflow.session().transcript(),
            matches!(self.mode, Mode::Browse),
        );
        match &self.mode {
            Mode::Chat { input } => self.render_input_bar(frame, " Question ", input, layout[2], true),
            _ => self.render_input_bar(frame, " Question ", "", layout[2], false),
        }
        self.render_status_bar(frame, layout[3]);

        // Overlays
        match &self.mode {
            Mode::Chat { .. } | Mode::Browse => {}
            Mode::Examples { list_state } => self.render_examples(frame, list_state, area),
            Mode::Review { scroll } => self.render_review(frame, *scroll, area),
            Mode::EditQuery { input } => self.render_query_editor(frame, input, area),
            Mode::Details { index, scroll } => self.render_details(frame, *index, *scroll, area),
            Mode::Health { checks } => self.render_health(frame, checks, area),
        }

        if let Some(job) = &self.pending_job {
            self.render_processing(frame, job, area);
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" drugbot ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(self.workflow.model_name(), Style::default().fg(Color::Yellow)),
        ];
        if self.workflow.session().awaiting_confirmation() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                "query awaiting confirmation",
                Style::default().fg(Color::Magenta),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref msg) = self.status_message {
            let line = Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(Color::Green),
            ));
            frame.render_widget(line, area);
            return;
        }

        let hints = match &self.mode {
            Mode::Chat { .. } => vec![("Enter", "ask"), ("Tab", "review"), ("Esc", "browse")],
            Mode::Browse => vec![
                ("q", "quit"),
                ("j/k", "answers"),
                ("Enter", "details"),
                ("i", "ask"),
                ("x", "examples"),
                ("v", "review"),
                ("H", "health"),
            ],
            Mode::Examples { .. } => vec![("j/k", "nav"), ("Enter", "use"), ("Esc", "back")],
            Mode::Review { .. } => vec![
                ("Enter/c", "confirm"),
                ("r", "reject"),
                ("e", "edit"),
                ("E", "$EDITOR"),
                ("j/k", "scroll"),
                ("Esc", "back"),
            ],
            Mode::EditQuery { .. } => vec![("Ctrl+S", "confirm"), ("Esc", "cancel")],
            Mode::Details { .. } => vec![("j/k", "scroll"), ("Esc", "back")],
            Mode::Health { .. } => vec![("r", "refresh"), ("Esc", "back")],
        };

        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(
                        format!(" {key}"),
                        Style::default().fg(Color::Yellow).bold(),
                    ),
                    Span::raw(format!(" {desc} ")),
                ]
            })
            .collect();

        frame.render_widget(Line::from(spans), area);
    }

    fn render_input_bar(&self, frame: &mut Frame, label: &str, input: &str, area: Rect, active: bool) {
        let color = if active { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(label);
        let paragraph = Paragraph::new(input).block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_examples(&self, frame: &mut Frame, list_state: &ListState, area: Rect) {
        let popup = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup);

        let items: Vec<ListItem> = catalog::examples()
            .into_iter()
            .map(|example: &Example| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<6}", example.tool.badge()),
                        Style::default().fg(Color::Magenta),
                    ),
                    Span::raw(example.input),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Example queries you can try ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray).bold())
            .highlight_symbol("> ");

        let mut state = list_state.clone();
        frame.render_stateful_widget(list, popup, &mut state);
    }

    fn render_review(&self, frame: &mut Frame, scroll: u16, area: Rect) {
        let Some(pending) = self.workflow.session().pending() else {
            return;
        };
        let session = self.workflow.session();

        let mut lines = vec![
            Line::from(Span::styled(tool_header(pending.tool), Style::default().bold())),
            Line::from(Span::styled(
                pending.tool.description(),
                Style::default().italic().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        if let Some(error) = session.last_error() {
            lines.push(Line::from(Span::styled(
                format!("Error in previous query: {error}"),
                Style::default().fg(Color::Red),
            )));
            lines.push(Line::from(Span::styled(
                suggestion_for(pending.tool, error),
                Style::default().fg(Color::Yellow),
            )));
            lines.push(Line::from(format!(
                "Attempt {} failed. Fix the query and confirm again, or reject to move on.",
                session.retry_count()
            )));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Review and edit the query if needed, then confirm:",
            Style::default().fg(Color::DarkGray),
        )));
        let shown = if has_embedding_literal(&pending.query) {
            abbreviate_embedding(&pending.query)
        } else {
            pending.query.clone()
        };
        for line in shown.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Cyan),
            )));
        }

        self.render_scrollable_lines(frame, " Confirm Query ", lines, scroll, area);
    }

    fn render_query_editor(&self, frame: &mut Frame, input: &str, area: Rect) {
        let popup = centered_rect(80, 60, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Edit Query (Ctrl+S confirm, Esc cancel) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new(format!("{input}_"))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup);
    }

    fn render_details(&self, frame: &mut Frame, index: usize, scroll: u16, area: Rect) {
        let transcript = self.workflow.session().transcript();
        let Some(message) = transcript.get(index) else {
            return;
        };
        let lines = detail_lines(message);
        self.render_scrollable_lines(frame, " Query Details ", lines, scroll, area);
    }

    fn render_health(&self, frame: &mut Frame, checks: &[HealthCheck], area: Rect) {
        let popup = centered_rect(55, 35, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" System Health ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut lines = vec![Line::from("")];

        for check in checks {
            let (icon, icon_style) = match check.status {
                CheckStatus::Passed => ("  OK ", Style::default().fg(Color::Green).bold()),
                CheckStatus::Failed => ("  FAIL ", Style::default().fg(Color::Red).bold()),
            };

            lines.push(Line::from(vec![
                Span::styled(icon, icon_style),
                Span::styled(format!("{:<10}", check.name), Style::default().bold()),
                Span::raw(&check.detail),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  r = refresh, Esc = back",
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
    }

    fn render_processing(&self, frame: &mut Frame, job: &Job, area: Rect) {
        let popup = centered_rect(40, 15, area);
        frame.render_widget(Clear, popup);
        let text = match job {
            Job::Submit(_) => "Processing response...",
            Job::Example(_) => "Preparing example query...",
            Job::Confirm(_) => "Processing confirmed query...",
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::Yellow).bold(),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(paragraph, popup);
    }

    fn render_scrollable_lines(
        &self,
        frame: &mut Frame,
        title: &str,
        lines: Vec<Line>,
        scroll: u16,
        area: Rect,
    ) {
        let popup = centered_rect(80, 80, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, popup);
    }
}

/// Body of the details popup for one transcript message.
pub fn detail_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let Some(tool) = message.tool() else {
        return vec![Line::from("(no query details)")];
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Tool Used: ", Style::default().bold()),
            Span::raw(tool.display_name()),
        ]),
        Line::from(vec![
            Span::styled("Description: ", Style::default().bold()),
            Span::raw(tool.description()),
        ]),
        Line::from(""),
    ];

    if let Some(query) = message.executed_query() {
        if has_embedding_literal(query) {
            lines.push(Line::from(Span::styled(
                "Truncated Query:",
                Style::default().bold().fg(Color::Yellow),
            )));
            lines.push(Line::from(Span::styled(
                "The embedding vector is shown as {...embedding...}. Run the question again to regenerate it.",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            for line in abbreviate_embedding(query).lines() {
                lines.push(Line::from(line.to_string()));
            }
        } else {
            lines.push(Line::from(Span::styled(
                "Query Used:",
                Style::default().bold(),
            )));
            for line in query.lines() {
                lines.push(Line::from(line.to_string()));
            }
        }
    }

    lines
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
