// Cranetty: supply-stack crane simulator with time-travel replay

use std::fs::File;
use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use cranetty::config::{self, Options};
use cranetty::driver::{self, SolveError};
use cranetty::input;
use cranetty::memory::Container;
use cranetty::ui::App;

/// Read the whole input; `-` means standard input
fn read_input(path: &str) -> Result<Container<u8>, SolveError> {
    let data = if path == "-" {
        input::read_all(&mut io::stdin().lock())?
    } else {
        let mut file = File::open(path).map_err(input::ReadError::from)?;
        input::read_all(&mut file)?
    };
    Ok(data)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "cranetty".to_string());

    let options = match Options::from_args(args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            eprintln!("{}", config::usage(&program_name));
            std::process::exit(1);
        }
    };

    let progress = |message: String| {
        if !options.quiet {
            eprintln!("{}", message);
        }
    };

    progress(format!("Reading {}...", options.path));
    let data = match read_input(&options.path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !options.tui {
        progress("Simulating both crane modes...".to_string());
        match driver::solve(&data) {
            Ok(solution) => {
                println!("{}", solution.single);
                println!("{}", solution.bulk);
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    progress("Recording replays...".to_string());
    let replays = match driver::record_replays(&data, options.snapshot_limit) {
        Ok(replays) => replays,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    for replay in &replays {
        match replay.failure() {
            None => progress(format!(
                "{} mode: {} snapshots, {} bytes",
                replay.mode(),
                replay.total_snapshots(),
                replay.memory_usage()
            )),
            Some(e) => {
                eprintln!("{} mode stopped early: {}", replay.mode(), e);
                eprintln!("Entering TUI with partial history...");
            }
        }
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(replays, options.mode);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
