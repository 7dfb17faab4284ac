use arboard::Clipboard;
use macroquad::prelude::*;
use ponymaze::config::{Config, VisualConfig};
use ponymaze::pathfinding::format_path;
use ponymaze::render::render_ascii;
use ponymaze::service::{LocalService, MazeService};
use ponymaze::session::{load_cheat_flag, save_cheat_flag, GameSession};
use ponymaze::{find_path, Direction, MazeError, MazeState};

const MARGIN: f32 = 20.0;
const INFO_HEIGHT: f32 = 100.0;
const WALL_THICKNESS: f32 = 2.0;
/// Completed mazes fade out by FADE_STEP every FADE_INTERVAL seconds
const FADE_STEP: f32 = 0.1;
const FADE_INTERVAL: f64 = 0.04;

const KEY_BINDINGS: [(KeyCode, Direction); 4] = [
    (KeyCode::Left, Direction::West),
    (KeyCode::Up, Direction::North),
    (KeyCode::Right, Direction::East),
    (KeyCode::Down, Direction::South),
];

/// Solve a saved state response and print it, no window interaction
fn run_solve(path: &str) -> ponymaze::Result<()> {
    let grid = MazeState::load(path)?.to_grid(None)?;

    match find_path(&grid, grid.pony(), grid.end_point()) {
        Ok(path) => {
            println!("{}", render_ascii(&grid, &path));
            println!("Path: {}", format_path(&path));
            let moves = if grid.pony() == grid.end_point() { 0 } else { path.len() + 1 };
            println!("Moves to the end-point: {}", moves);
        }
        Err(MazeError::UnreachableTarget { .. }) => {
            println!("{}", render_ascii(&grid, &[]));
            println!("No path available");
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn copy_to_clipboard(text: &str) {
    match Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                log::warn!("Failed to copy to clipboard: {}", e);
            } else {
                log::info!("Maze copied to clipboard!");
                // Keep clipboard alive for a moment so clipboard managers can capture it
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
        }
        Err(e) => log::warn!("Failed to access clipboard: {}", e),
    }
}

/// Opacity animation played once the game is over
struct Fade {
    opacity: f32,
    last_step: Option<f64>,
}

impl Fade {
    fn new() -> Self {
        Fade {
            opacity: 1.0,
            last_step: None,
        }
    }

    fn tick(&mut self, now: f64) {
        let last = *self.last_step.get_or_insert(now);
        if self.opacity > 0.0 && now - last >= FADE_INTERVAL {
            self.opacity = (self.opacity - FADE_STEP).max(0.0);
            self.last_step = Some(now);
        }
    }

    fn finished(&self) -> bool {
        self.opacity <= 0.0
    }
}

fn draw<S: MazeService>(session: &GameSession<S>, visual: &VisualConfig, fade: &Fade) {
    clear_background(Color::from_rgba(
        visual.background_r,
        visual.background_g,
        visual.background_b,
        255,
    ));

    let grid = session.grid();
    let size = visual.cell_size;
    let faded = |c: Color| Color::new(c.r, c.g, c.b, c.a * fade.opacity);

    let mut marked = vec![false; grid.len()];
    for &index in session.overlay() {
        marked[index] = true;
    }

    for (index, walls) in grid.cells().iter().enumerate() {
        let (column, row) = grid.get_coords(index);
        let x = MARGIN + column as f32 * size;
        let y = MARGIN + row as f32 * size;

        let fill = if index == grid.pony() {
            Some(GOLD)
        } else if index == grid.domokun() {
            Some(RED)
        } else if index == grid.end_point() {
            Some(GREEN)
        } else if marked[index] {
            Some(Color::from_rgba(100, 100, 200, 255))
        } else {
            None
        };
        if let Some(color) = fill {
            draw_rectangle(x + 4.0, y + 4.0, size - 8.0, size - 8.0, faded(color));
        }

        if row == 0 || walls.north {
            draw_line(x, y, x + size, y, WALL_THICKNESS, faded(WHITE));
        }
        if column == 0 || walls.west {
            draw_line(x, y, x, y + size, WALL_THICKNESS, faded(WHITE));
        }
    }

    let right = MARGIN + grid.width() as f32 * size;
    let bottom = MARGIN + grid.height() as f32 * size;
    draw_line(right, MARGIN, right, bottom, WALL_THICKNESS, faded(WHITE));
    draw_line(MARGIN, bottom, right, bottom, WALL_THICKNESS, faded(WHITE));

    let text_y = bottom + 30.0;
    match session.outcome().message() {
        Some(message) if fade.finished() => {
            draw_text(message, MARGIN, text_y, 28.0, WHITE);
        }
        Some(_) => {}
        None => {
            let cheat = if session.cheating() { "on" } else { "off" };
            let lines = [
                "Arrow keys: move the pony".to_string(),
                format!("H: toggle cheat mode ({})", cheat),
                "C: copy maze to clipboard    Esc: quit".to_string(),
            ];
            for (i, line) in lines.iter().enumerate() {
                draw_text(line, MARGIN, text_y + i as f32 * 22.0, 20.0, WHITE);
            }
        }
    }
}

/// What the command line asks for
#[derive(Debug, PartialEq, Eq)]
enum Mode {
    /// Print the solution of a saved state and exit
    Solve(String),
    /// Play, seeded from the given state file or the configured one
    Play(Option<String>),
}

fn parse_args(args: &[String]) -> Result<Mode, String> {
    match args.get(1).map(String::as_str) {
        Some("--solve") => match args.get(2) {
            Some(path) => Ok(Mode::Solve(path.clone())),
            None => Err("--solve needs a state file: ponymaze --solve <state.json>".to_string()),
        },
        Some(path) => Ok(Mode::Play(Some(path.to_string()))),
        None => Ok(Mode::Play(None)),
    }
}

fn window_conf() -> Conf {
    // Logging is not up yet; main reports the config source
    let (config, _) = Config::read();
    let size = config.visual.cell_size;
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: (config.maze.width as f32 * size + 2.0 * MARGIN) as i32,
        window_height: (config.maze.height as f32 * size + 2.0 * MARGIN + INFO_HEIGHT) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, source) = Config::read();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
        .init();
    source.report();

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    let state_file = match parse_args(&args) {
        Ok(Mode::Solve(path)) => {
            if let Err(e) = run_solve(&path) {
                log::error!("Failed to solve {}: {}", path, e);
            }
            return;
        }
        Ok(Mode::Play(path)) => path.unwrap_or_else(|| config.maze.state_file.clone()),
        Err(usage) => {
            log::error!("{}", usage);
            return;
        }
    };

    let template = match MazeState::load(&state_file) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to load maze state from {}: {}", state_file, e);
            return;
        }
    };
    let mut session = match config
        .maze
        .params()
        .and_then(|params| GameSession::start(LocalService::new(template), &params))
    {
        Ok(session) => session,
        Err(e) => {
            log::error!("Failed to start the game: {}", e);
            return;
        }
    };
    session.set_cheating(load_cheat_flag(&config.session.cheat_flag_path));

    let mut fade = Fade::new();
    loop {
        for (key, direction) in KEY_BINDINGS {
            if is_key_pressed(key) {
                if let Err(e) = session.press(direction) {
                    log::error!("Move {} failed: {}", direction.as_str(), e);
                }
            }
        }

        if is_key_pressed(KeyCode::H) {
            let enabled = !session.cheating();
            session.set_cheating(enabled);
            if let Err(e) = save_cheat_flag(&config.session.cheat_flag_path, enabled) {
                log::warn!("Could not persist cheat mode: {}", e);
            }
        }

        // Copy maze to clipboard on C key
        if is_key_pressed(KeyCode::C) {
            copy_to_clipboard(&render_ascii(session.grid(), session.overlay()));
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        if session.outcome().is_complete() {
            fade.tick(get_time());
        }

        draw(&session, &config.visual, &fade);

        next_frame().await
    }

    log::info!("{}", session.action_log().summary().replace('\n', "; "));
    if config.logging.enable_action_log {
        session.action_log().print();
        if let Err(e) = session.action_log().save_to_file(&config.logging.action_log_path) {
            log::warn!("Failed to save action log: {}", e);
        }
    }
}
