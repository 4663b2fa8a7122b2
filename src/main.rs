mod app;
mod constants;
mod error;
mod logging;
mod render;
mod settings;

use std::io;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use app::{App, MazeArgs, SolveArgs};
use error::AppError;
use settings::{Settings, SettingsError};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "tmsolve")]
struct Args {
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
    #[clap(short, long, action, global = true, help = "Log debug messages")]
    verbose: bool,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and print it
    Generate {
        #[clap(flatten)]
        maze: MazeArgs,
    },
    /// Solve a generated maze with one algorithm
    Solve {
        #[clap(flatten)]
        maze: MazeArgs,
        #[clap(flatten)]
        edits: SolveArgs,
        #[clap(short, long, help = "bfs, dfs or astar")]
        algorithm: Option<String>,
    },
    /// Solve a generated maze with every algorithm and compare them
    Compare {
        #[clap(flatten)]
        maze: MazeArgs,
        #[clap(flatten)]
        edits: SolveArgs,
    },
    /// Average wall count per difficulty over many generated mazes
    Stats {
        #[clap(flatten)]
        maze: MazeArgs,
        #[clap(short = 'n', long, default_value_t = 1000, help = "Mazes per difficulty")]
        samples: usize,
    },
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    logging::init(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    })?;

    if args.reset_config {
        let path = constants::settings_path().ok_or(SettingsError::NoConfigDir)?;
        Settings::reset_config(&path)?;
        return Ok(());
    }

    if args.show_config_path {
        let path = constants::settings_path().ok_or(SettingsError::NoConfigDir)?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.debug_config {
        let path = constants::settings_path().ok_or(SettingsError::NoConfigDir)?;
        println!("{:#?}", Settings::load(&path));
        return Ok(());
    }

    let app = App::new(Settings::load_or_default());
    if !app.settings().get_colors() {
        colored::control::set_override(false);
    }

    let mut out = io::stdout().lock();
    match args.command.unwrap_or(Command::Generate {
        maze: MazeArgs::default(),
    }) {
        Command::Generate { maze } => app.generate(&maze, &mut out),
        Command::Solve {
            maze,
            edits,
            algorithm,
        } => app.solve(&maze, &edits, algorithm.as_deref(), &mut out),
        Command::Compare { maze, edits } => app.compare(&maze, &edits, &mut out),
        Command::Stats { maze, samples } => app.stats(&maze, samples, &mut out),
    }
}
