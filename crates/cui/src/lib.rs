mod actions;
mod app;
mod input;
mod view;

use anyhow::{Context, Result};
use app::App;
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use runo_client::{ClientConfig, HttpGameClient};
use runo_core::{Difficulty, GameBackend};
use std::io::{self, stdout, IsTerminal};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub server: Option<String>,
    pub difficulty: Option<u8>,
}

pub fn run(options: LaunchOptions) -> Result<()> {
    // Logs go to stderr so they never tear the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = ClientConfig::default();
    if let Some(server) = options.server.clone() {
        config.base_url = server;
    }
    let client = HttpGameClient::new(config).context("build http client")?;
    let difficulty = options
        .difficulty
        .and_then(Difficulty::from_level)
        .unwrap_or_default();
    let mut app = App::new(client, difficulty);

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut server = std::env::var("RUNO_SERVER").ok();
    let mut difficulty = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--server" | "-s" => {
                if let Some(value) = args.get(idx + 1) {
                    server = Some(value.clone());
                    idx += 1;
                }
            }
            "--difficulty" | "-d" => {
                if let Some(value) = args.get(idx + 1) {
                    difficulty = value.parse::<u8>().ok();
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    LaunchOptions { server, difficulty }
}

fn run_loop<B: GameBackend>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<B>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_color_prompt_key(key) {
                    continue;
                }
                let action = input::map_key(key);
                actions::dispatch(app, action);
            }
        } else {
            app.on_tick(Instant::now());
        }
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "runo-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}

#[cfg(test)]
mod tests {
    use super::parse_options;

    #[test]
    fn parses_server_and_difficulty_flags() {
        let args = vec![
            "--server".to_string(),
            "http://10.0.0.2:8000".to_string(),
            "--difficulty".to_string(),
            "3".to_string(),
        ];
        let options = parse_options(&args);
        assert_eq!(options.server.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(options.difficulty, Some(3));
    }

    #[test]
    fn missing_flags_leave_defaults() {
        let options = parse_options(&[]);
        assert_eq!(options.difficulty, None);
    }
}
