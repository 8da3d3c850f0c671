use chess_companion::{
    ClickOutcome, Difficulty, DisplayMode, GameSession, SessionConfig,
    shakmaty::{Color, Piece, Role, Square},
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const HELP: &str = "Commands: <square> (e.g. e2) to click, hint, undo, reset, mode, \
                    level <beginner|intermediate|advanced|grand master>, help, quit";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logging goes to stderr, controlled by RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // 2. Optional JSON configuration file as the only argument
    let config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };
    let mut session = GameSession::new(config)?;

    println!("{HELP}");
    render(&session);
    wait_for_bot(&mut session);

    // 3. Event loop: every input line is one user action
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim().to_ascii_lowercase();
        match input.as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "hint" => match session.suggested_move() {
                Some(mv) => println!("Suggested move: {mv}"),
                None => println!("No legal moves"),
            },
            "undo" => {
                let plies = session.undo(Instant::now());
                println!("Took back {plies} half-move(s)");
            }
            "reset" => session.reset(Instant::now()),
            "mode" => {
                session.toggle_display_mode();
            }
            cmd if cmd.starts_with("level ") => match cmd["level ".len()..].parse::<Difficulty>() {
                Ok(level) => session.set_difficulty(level),
                Err(err) => println!("{err}"),
            },
            cmd => match cmd.parse::<Square>() {
                Ok(square) => click(&mut session, square),
                Err(_) => println!("Unknown command '{cmd}'. {HELP}"),
            },
        }
        render(&session);
        wait_for_bot(&mut session);
        io::stdout().flush()?;
    }

    Ok(())
}

fn click(session: &mut GameSession, square: Square) {
    if let ClickOutcome::Moved(mv) = session.handle_square_click(square, Instant::now()) {
        println!("You played {mv}");
    }
}

/// Block until a scheduled bot reply has landed, then redraw.
fn wait_for_bot(session: &mut GameSession) {
    let Some(due) = session.next_deadline() else {
        return;
    };
    std::thread::sleep(due.saturating_duration_since(Instant::now()));
    if let Some(reply) = session.poll(due) {
        println!("Bot played {reply}");
        render(session);
    }
}

fn symbol(piece: Piece) -> char {
    match (piece.color, piece.role) {
        (Color::White, Role::King) => '♔',
        (Color::White, Role::Queen) => '♕',
        (Color::White, Role::Rook) => '♖',
        (Color::White, Role::Bishop) => '♗',
        (Color::White, Role::Knight) => '♘',
        (Color::White, Role::Pawn) => '♙',
        (Color::Black, Role::King) => '♚',
        (Color::Black, Role::Queen) => '♛',
        (Color::Black, Role::Rook) => '♜',
        (Color::Black, Role::Bishop) => '♝',
        (Color::Black, Role::Knight) => '♞',
        (Color::Black, Role::Pawn) => '♟',
    }
}

fn render(session: &GameSession) {
    let (light, dark) = match session.display_mode() {
        DisplayMode::Light => ("\x1b[48;5;252m", "\x1b[48;5;245m"),
        DisplayMode::Dark => ("\x1b[48;5;244m", "\x1b[48;5;238m"),
    };
    let selected = session.selected();
    let snapshot = session.position().snapshot();

    println!();
    for (row, cells) in snapshot.rows().iter().enumerate() {
        print!(" {} ", 8 - row);
        for (col, cell) in cells.iter().enumerate() {
            let index = row * 8 + col;
            let is_selected = selected == chess_companion::square_from_index(index);
            let bg = if is_selected {
                "\x1b[48;5;117m"
            } else if (row + col) % 2 == 0 {
                light
            } else {
                dark
            };
            let glyph = cell.map(symbol).unwrap_or(' ');
            print!("{bg}\x1b[30m {glyph} \x1b[0m");
        }
        println!();
    }
    println!("    a  b  c  d  e  f  g  h");

    let material = session.material();
    let bar_width = 30;
    let white_cells = material.white_probability() as usize * bar_width / 100;
    println!(
        "\n White {}{} Black   {}% / {}%   points {:+}",
        "█".repeat(white_cells),
        "░".repeat(bar_width - white_cells),
        material.white_probability(),
        material.black_probability(),
        material.point_difference(),
    );

    for row in session.history().rows() {
        println!(" {row}");
    }
    println!(" Level: {}", session.difficulty());
    println!(" {}", session.status());
    if let Some(err) = session.error() {
        println!(" \x1b[31m{err}\x1b[0m");
    }
}
