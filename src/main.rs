#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use maze_navigator::simulation::{
    config::GridSize,
    direction::Direction,
    environment::{Environment, GridMaze},
    memory::MoveHistory,
    params::{DEFAULT_TICK_MS, EVENT_LOG_LEN},
    NavError, Navigator, NavigatorConfig, StepEvent,
};
use maze_navigator::ui::{
    field::{centered_viewport, compute_field_grid, FieldOverlay},
    render::{draw_ui, field_rows},
    report::format_report,
};

/// Explore a maze one step at a time using only move feedback.
#[derive(Parser, Debug)]
#[command(name = "maze_navigator", version, about)]
struct Args {
    /// Maze map file (`#` wall, `.`/space open, `S` start, `G` goal)
    #[arg(long, conflicts_with = "generate")]
    maze: Option<PathBuf>,

    /// Generate a random perfect maze of WIDTHxHEIGHT rooms
    #[arg(long, value_name = "WxH")]
    generate: Option<GridSize>,

    /// Seed for --generate
    #[arg(long, requires = "generate")]
    seed: Option<u64>,

    /// Navigator settings in TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Memory grid size, overriding the config
    #[arg(long, value_name = "WxH")]
    memory: Option<GridSize>,

    /// Abort after this many loop iterations
    #[arg(long)]
    step_limit: Option<u64>,

    /// Replay a direction list (e.g. "U U L D") against the maze instead of exploring
    #[arg(long, value_name = "PATH", conflicts_with = "tui")]
    replay: Option<MoveHistory>,

    /// Animate the run in the terminal
    #[arg(long)]
    tui: bool,

    /// Milliseconds between steps in the terminal UI
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; keep them quiet under the TUI unless asked for.
    let default_filter = if args.tui { "off" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let mut maze = load_maze(&args)?;

    if let Some(path) = &args.replay {
        return replay(&mut maze, path);
    }

    let config = load_config(&args, &maze)?;
    let mut nav = Navigator::new(&config).context("invalid navigator configuration")?;

    let result = if args.tui {
        run_tui(&mut nav, &mut maze, Duration::from_millis(args.tick_ms))
    } else {
        nav.run(&mut maze).map(|_| ()).map_err(anyhow::Error::from)
    };

    println!("{}", format_report(&nav, Some(maze.steps())));
    result.context("navigation aborted")
}

fn load_maze(args: &Args) -> anyhow::Result<GridMaze> {
    if let Some(path) = &args.maze {
        return GridMaze::load(path).with_context(|| format!("loading {}", path.display()));
    }
    if let Some(size) = args.generate {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        return GridMaze::generate(size.width, size.height, &mut rng)
            .context("generating maze");
    }
    Ok(GridMaze::reference())
}

fn load_config(args: &Args, maze: &GridMaze) -> anyhow::Result<NavigatorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            NavigatorConfig::from_toml(&source)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => {
            let (width, height) = maze.dimensions();
            NavigatorConfig::default().with_maze_extent(width, height)
        }
    };
    if let Some(size) = args.memory {
        config = config.with_memory(size.width, size.height);
    }
    if let Some(limit) = args.step_limit {
        config = config.with_step_limit(limit);
    }
    config.validate()?;
    Ok(config)
}

fn replay(maze: &mut GridMaze, path: &MoveHistory) -> anyhow::Result<()> {
    for (i, direction) in path.iter().enumerate() {
        let outcome = maze.attempt_move(direction);
        println!("{:>4} {direction:<5} {outcome:?}", i + 1);
        if maze.at_goal() {
            println!("goal reached after {} moves", i + 1);
            return Ok(());
        }
    }
    bail!("path ended at {:?} without reaching the goal", maze.agent())
}

fn run_tui(
    nav: &mut Navigator,
    maze: &mut GridMaze,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, nav, maze, tick_rate);

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn describe(event: StepEvent) -> String {
    match event {
        StepEvent::Moved(dir) => format!("moved {dir}"),
        StepEvent::Blocked(dir) => format!("wall {dir}"),
        StepEvent::Backtracked(dir) => format!("dead end, back {dir}"),
        StepEvent::Idle => "no candidate".to_string(),
        StepEvent::Won(dir) => format!("goal reached moving {dir}"),
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    nav: &mut Navigator,
    maze: &mut GridMaze,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut events: VecDeque<String> = VecDeque::with_capacity(EVENT_LOG_LEN);
    let mut failure: Option<NavError> = None;
    let mut last_tick = Instant::now();

    loop {
        // 1. Update
        if last_tick.elapsed() >= tick_rate {
            if !nav.is_won() && failure.is_none() {
                let line = match nav.step(maze) {
                    Ok(event) => describe(event),
                    Err(err) => {
                        let line = format!("error: {err}");
                        failure = Some(err);
                        line
                    }
                };
                if events.len() == EVENT_LOG_LEN {
                    events.pop_front();
                }
                events.push_back(line);
            }
            last_tick = Instant::now();
        }

        // 2. Render
        terminal.draw(|f| {
            let area = f.area();
            let rows = field_rows(area.height);
            let cols = area.width as usize;

            let memory = nav.memory();
            let top_left = centered_viewport(memory, nav.position(), rows, cols);
            let grid = compute_field_grid(memory, FieldOverlay::of(nav), top_left, rows, cols);

            let stats = nav.stats();
            let hud = format!(
                "Mode: {:?} | Pos: {} {} | Path: {} | Fwd: {} | Back: {} | Walls hit: {} | q quits",
                nav.mode(),
                nav.position(),
                nav.history().peek().map_or(' ', Direction::arrow),
                nav.history().len(),
                stats.forward_moves,
                stats.backtrack_moves,
                stats.blocked_attempts,
            );

            draw_ui(f, grid, &hud, events.iter().map(String::as_str));
        })?;

        // 3. Input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') {
                    break;
                }
            }
        }
    }

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
