mod storage;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use schemata_config::Config;
use schemata_engine::editing::{
    Cmd, InsertionKind, RenderKind, Selection, Session, UuidKeys, classify,
};
use std::{env, io::stdout, path::PathBuf, process};

/// Which pane keystrokes go to
#[derive(PartialEq)]
enum Focus {
    Files,
    Blocks,
}

struct OpenDocument {
    path: PathBuf,
    session: Session<UuidKeys>,
    dirty: bool,
}

struct App {
    documents_path: PathBuf,
    files: Vec<PathBuf>,
    file_list_state: ListState,
    focus: Focus,
    open: Option<OpenDocument>,
    autosave: bool,
    status: String,
}

impl App {
    fn new(documents_path: PathBuf, autosave: bool) -> Result<Self> {
        let files = storage::scan_documents(&documents_path)?;

        let mut app = Self {
            documents_path,
            files,
            file_list_state: ListState::default(),
            focus: Focus::Files,
            open: None,
            autosave,
            status: String::from("Enter: open | h/m/b/i: insert schema | s: save | q: quit"),
        };

        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
        }

        Ok(app)
    }

    fn next_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
    }

    fn previous_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.files.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.file_list_state.select(Some(i));
    }

    fn open_selected_file(&mut self) {
        let Some(index) = self.file_list_state.selected() else {
            return;
        };
        let Some(path) = self.files.get(index).cloned() else {
            return;
        };

        match storage::load_document(&path) {
            Ok(document) if document.is_empty() => {
                self.status = format!("{}: document has no blocks", path.display());
            }
            Ok(document) => {
                // Caret at the end of the first block, like a fresh editor focus
                let first = &document.blocks()[0];
                let selection = Selection::caret(first.key().clone(), first.text().len());
                self.open = Some(OpenDocument {
                    path: path.clone(),
                    session: Session::new(document, selection, UuidKeys),
                    dirty: false,
                });
                self.focus = Focus::Blocks;
                self.status = format!("Opened {}", path.display());
            }
            Err(e) => {
                self.status = format!("Error opening document: {e:#}");
            }
        }
    }

    /// Index of the block holding the cursor, recomputed from the selection
    fn cursor_index(&self) -> Option<usize> {
        let open = self.open.as_ref()?;
        let key = &open.session.selection().anchor_key;
        open.session.document().position_of(key)
    }

    fn move_cursor(&mut self, delta: isize) {
        let Some(at) = self.cursor_index() else {
            return;
        };
        let Some(open) = self.open.as_mut() else {
            return;
        };

        let len = open.session.document().len() as isize;
        let next = (at as isize + delta).clamp(0, len - 1) as usize;
        let target = &open.session.document().blocks()[next];
        let selection = Selection::caret(target.key().clone(), target.text().len());
        if let Err(e) = open.session.apply(Cmd::SetSelection { selection }) {
            self.status = format!("Error moving cursor: {e}");
        }
    }

    fn apply_edit(&mut self, cmd: Cmd) {
        let Some(open) = self.open.as_mut() else {
            self.status = String::from("No document open");
            return;
        };

        match open.session.apply(cmd) {
            Ok(patch) => {
                open.dirty = true;
                self.status = format!("v{}", patch.version);
                if self.autosave {
                    self.save_open_document();
                }
            }
            Err(e) => {
                self.status = format!("Edit failed: {e}");
            }
        }
    }

    fn insert_schema(&mut self, kind: InsertionKind) {
        self.apply_edit(Cmd::InsertSchema { kind });
        if let Some(open) = &self.open
            && !self.autosave
        {
            self.status = format!(
                "Inserted {} ({} blocks)",
                kind,
                open.session.document().len()
            );
        }
    }

    fn insert_symbol(&mut self, symbol: char) {
        self.apply_edit(Cmd::InsertText {
            text: symbol.to_string(),
        });
    }

    fn save_open_document(&mut self) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        match storage::save_document(&open.path, open.session.document()) {
            Ok(()) => {
                open.dirty = false;
                self.status = format!("Saved {}", open.path.display());
            }
            Err(e) => {
                self.status = format!("Save failed: {e:#}");
            }
        }
    }
}

fn main() -> Result<()> {
    // Determine documents path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let documents_path;
    let mut autosave = false;
    let from_config;

    if args.len() == 2 {
        documents_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(config)) => {
                documents_path = config.documents_path;
                autosave = config.autosave;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No documents path provided and no config file found");
                eprintln!("Usage: {} <documents-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <documents-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [documents-folder-path]", args[0]);
        process::exit(1);
    };

    if !documents_path.is_dir() {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Documents path '{}'{} is not a directory",
            documents_path.display(),
            source
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(documents_path, autosave)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Tab => {
                    app.focus = match app.focus {
                        Focus::Files => Focus::Blocks,
                        Focus::Blocks => Focus::Files,
                    };
                }
                KeyCode::Down | KeyCode::Char('j') => match app.focus {
                    Focus::Files => app.next_file(),
                    Focus::Blocks => app.move_cursor(1),
                },
                KeyCode::Up | KeyCode::Char('k') => match app.focus {
                    Focus::Files => app.previous_file(),
                    Focus::Blocks => app.move_cursor(-1),
                },
                KeyCode::Enter => {
                    if app.focus == Focus::Files {
                        app.open_selected_file();
                    }
                }
                KeyCode::Char('s') => app.save_open_document(),
                // Schemata toolbar: the four insertion shapes
                KeyCode::Char('h') if app.focus == Focus::Blocks => {
                    app.insert_schema(InsertionKind::Half);
                }
                KeyCode::Char('m') if app.focus == Focus::Blocks => {
                    app.insert_schema(InsertionKind::Main);
                }
                KeyCode::Char('b') if app.focus == Focus::Blocks => {
                    app.insert_schema(InsertionKind::Bar);
                }
                KeyCode::Char('i') if app.focus == Focus::Blocks => {
                    app.insert_schema(InsertionKind::Inverse);
                }
                // Symbol toolbar: inserted at the caret as plain text
                KeyCode::Char(c @ ('.' | ',' | '|' | '~')) if app.focus == Focus::Blocks => {
                    app.insert_symbol(c);
                }
                _ => {}
            }
        }
    }
}

fn style_for(render_kind: RenderKind) -> Style {
    match render_kind {
        RenderKind::SchemaMain => Style::default().fg(Color::Yellow),
        RenderKind::SchemaEntry => Style::default().fg(Color::Green),
        RenderKind::SchemaExit => Style::default().fg(Color::Blue),
        RenderKind::Plain => Style::default(),
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Document list panel
    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ListItem::new(vec![Line::from(vec![Span::raw(name)])])
        })
        .collect();

    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Documents"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Block panel: one line per block, styled per the classifier
    let cursor = app.cursor_index();
    let block_lines: Vec<Line> = match &app.open {
        None => vec![Line::from("Open a document to edit it")],
        Some(open) => open
            .session
            .document()
            .blocks()
            .iter()
            .enumerate()
            .map(|(i, block)| {
                let class = classify(block);
                let mut style = style_for(class.render_kind);
                if Some(i) == cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(vec![
                    Span::styled(format!("{:14}", class.style_class), style),
                    Span::styled(block.text().to_string(), style),
                ])
            })
            .collect(),
    };

    let title = match &app.open {
        Some(open) if open.dirty => format!("Blocks [{}]*", open.path.display()),
        Some(open) => format!("Blocks [{}]", open.path.display()),
        None => String::from("Blocks"),
    };

    let blocks_panel = Paragraph::new(block_lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(blocks_panel, chunks[1]);

    // Status line
    let status = Paragraph::new(vec![Line::from(app.status.as_str())]).block(Block::default());
    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    f.render_widget(status, bottom_chunk[1]);
}
