use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use std::time::Instant;
use streamdown::reconcile::ReconcileSummary;
use streamdown::streaming::StreamingDocument;
use streamdown::theme::Theme;

struct App {
    doc: StreamingDocument,
    pending: String,
    follow_tail: bool,
    scroll: u16,
    done: bool,
    last_flush: Instant,
    last_summary: ReconcileSummary,
    flushes: u64,
}

// The producer throttles flushes; every flush is one complete reconcile.
const FLUSH_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel::<String>();
    spawn_reply(tx);

    let mut app = App {
        doc: StreamingDocument::new(Theme::default()),
        pending: String::new(),
        follow_tail: true,
        scroll: 0,
        done: false,
        last_flush: Instant::now(),
        last_summary: ReconcileSummary::default(),
        flushes: 0,
    };

    let res = run(&mut terminal, &mut app, rx);
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn spawn_reply(tx: mpsc::Sender<String>) {
    thread::spawn(move || {
        let reply = demo_reply();
        for chunk in chunk_by(&reply, 3) {
            if tx.send(chunk).is_err() {
                return;
            }
            thread::sleep(Duration::from_millis(8));
        }
    });
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<String>,
) -> io::Result<()> {
    loop {
        drain_deltas(app, &rx);
        maybe_flush(app, false);

        terminal.draw(|f| ui(f, app))?;

        if crossterm::event::poll(Duration::from_millis(33))?
            && let Event::Key(key) = crossterm::event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('f') => app.follow_tail = !app.follow_tail,
                KeyCode::Char('j') | KeyCode::Down => {
                    app.follow_tail = false;
                    app.scroll = app.scroll.saturating_add(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    app.follow_tail = false;
                    app.scroll = app.scroll.saturating_sub(1);
                }
                KeyCode::Char('g') | KeyCode::Home => {
                    app.follow_tail = false;
                    app.scroll = 0;
                }
                KeyCode::Char('G') | KeyCode::End => app.follow_tail = true,
                _ => {}
            }
        }
    }
}

fn drain_deltas(app: &mut App, rx: &mpsc::Receiver<String>) {
    loop {
        match rx.try_recv() {
            Ok(delta) => app.pending.push_str(&delta),
            Err(mpsc::TryRecvError::Empty) => break,
            Err(mpsc::TryRecvError::Disconnected) => {
                if !app.done {
                    maybe_flush(app, true);
                    app.done = true;
                }
                break;
            }
        }
    }
}

fn maybe_flush(app: &mut App, force: bool) {
    if app.pending.is_empty() {
        return;
    }
    let now = Instant::now();
    if !force && now.duration_since(app.last_flush) < FLUSH_INTERVAL {
        return;
    }
    let delta = std::mem::take(&mut app.pending);
    app.last_summary = app.doc.append(&delta);
    app.last_flush = now;
    app.flushes += 1;
}

fn ui(f: &mut ratatui::Frame<'_>, app: &mut App) {
    let area = f.area();
    let [main, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(area);

    let outer = Block::default()
        .title("assistant (streamed markdown)")
        .borders(Borders::ALL);
    let inner = outer.inner(main);
    f.render_widget(outer, main);

    let lines = app.doc.lines();
    if app.follow_tail {
        app.scroll = (lines.len() as u16).saturating_sub(inner.height);
    }
    let paragraph = Paragraph::new(Text::from(lines)).scroll((app.scroll, 0));
    f.render_widget(paragraph, inner);

    let s = app.last_summary;
    let status = format!(
        "q quit | j/k scroll | g/G top/bottom | f follow-tail={} | done={} | flushes={} | last: reused={} rebuilt={} appended={} truncated={}",
        app.follow_tail,
        app.done,
        app.flushes,
        s.reused,
        s.rebuilt,
        s.appended,
        s.truncated,
    );
    let muted = app.doc.theme().text_muted;
    f.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(status, muted)])),
        status_area,
    );
}

fn demo_reply() -> String {
    let mut s = String::new();
    s.push_str("# Why the sky is blue\n\n");
    s.push_str("Sunlight is a mix of wavelengths, and air molecules scatter the ");
    s.push_str("short **blue** wavelengths far more strongly than the long red ");
    s.push_str("ones, a phenomenon called *Rayleigh scattering*.\n\n");

    s.push_str("Key points:\n\n");
    s.push_str("1. Scattering strength goes as `1 / wavelength^4`\n");
    s.push_str("2. Blue light is scattered across the whole sky\n");
    s.push_str("3. At sunset the path is longer, so red survives\n\n");

    s.push_str("> Violet is scattered even more than blue, but our eyes are\n");
    s.push_str("> less sensitive to it and the upper atmosphere absorbs some.\n\n");

    s.push_str("A quick estimate in code:\n\n");
    s.push_str("```\n");
    s.push_str("let blue = 450.0_f64;\n");
    s.push_str("let red = 700.0_f64;\n");
    s.push_str("let ratio = (red / blue).powi(4);\n");
    s.push_str("println!(\"blue scatters {ratio:.1}x more\");\n");
    s.push_str("```\n\n");

    s.push_str("So the sky looks blue in every direction you look, except ");
    s.push_str("toward the sun itself.\n");
    s
}

fn chunk_by(s: &str, n: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    for ch in s.chars() {
        cur.push(ch);
        if cur.chars().count() >= n {
            out.push(std::mem::take(&mut cur));
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}
