// Terminal Sokoban with undo/redo history and a stage editor.
// Stages are JSON files: see stages/stage1.json.

use clap::{Parser, Subcommand};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};
use trace_sokoban::config::GameConfig;
use trace_sokoban::console_interface::{
    cleanup_terminal, handle_editor_input, handle_input, render_editor, render_game,
    setup_terminal, ConsoleInput, EditorInput,
};
use trace_sokoban::controller::EngineHandle;
use trace_sokoban::editor::StageEditor;
use trace_sokoban::models::{EditorRenderState, GameRenderState};
use trace_sokoban::stage::{load_descriptor, save_descriptor, stage_path};

#[derive(Parser, Debug)]
#[command(name = "trace_sokoban", about = "Push every box onto a goal")]
struct Cli {
    /// Path to config.toml (defaults to the exe directory, then CWD)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a stage
    Play {
        /// Stage file to load
        #[arg(long)]
        stage: Option<PathBuf>,
        /// Load stage{n}.json from the configured stages directory
        #[arg(long, conflicts_with = "stage")]
        stage_num: Option<u32>,
    },
    /// Author a stage
    Edit {
        #[arg(long)]
        width: Option<i32>,
        #[arg(long)]
        height: Option<i32>,
        /// Start from an existing stage file
        #[arg(long)]
        from: Option<PathBuf>,
        /// Where to save the stage JSON
        #[arg(long)]
        out: PathBuf,
    },
}

fn init_logging(log_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GameConfig::load_from(path),
        None => GameConfig::load(),
    };
    init_logging(&config.log_file)?;

    let command = cli.command.unwrap_or(Command::Play { stage: None, stage_num: None });
    match command {
        Command::Play { stage, stage_num } => {
            let path = stage.unwrap_or_else(|| {
                stage_path(&config.stages_dir, stage_num.unwrap_or(config.default_stage))
            });
            // Load fully before touching the terminal so errors print normally.
            let descriptor = load_descriptor(&path)?;
            let engine = EngineHandle::load(&descriptor)?;
            info!(path = %path.display(), "starting game");

            let mut terminal = setup_terminal()?;
            let result = run_interactive(engine, &config, &mut terminal);
            cleanup_terminal()?;
            result
        }
        Command::Edit { width, height, from, out } => {
            let editor = match from {
                Some(path) => StageEditor::from_descriptor(&load_descriptor(&path)?)?,
                None => StageEditor::new(
                    width.unwrap_or(config.editor.width),
                    height.unwrap_or(config.editor.height),
                    config.editor.grid_size,
                )?,
            };
            info!(out = %out.display(), "starting editor");

            let mut terminal = setup_terminal()?;
            let result = run_editor(editor, &out, &config, &mut terminal);
            cleanup_terminal()?;
            result
        }
    }
}

fn run_interactive(
    mut engine: EngineHandle,
    config: &GameConfig,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(config.tick_rate_ms);
    let mut started = Instant::now();
    let mut last_update = None;
    let mut last_error = None;

    loop {
        let to_render = GameRenderState {
            game: engine.snapshot(),
            elapsed: started.elapsed(),
            error: last_error.clone(),
            last_update,
        };
        render_game(terminal, &engine, &to_render)?;

        match handle_input(tick)? {
            ConsoleInput::Quit => break,
            ConsoleInput::Timeout => {}
            ConsoleInput::Restart => {
                engine.restart();
                started = Instant::now();
                last_update = None;
                last_error = None;
            }
            ConsoleInput::UserAction(action) => match engine.apply_direction(action) {
                Ok(update) => {
                    last_update = Some(update);
                    last_error = None;
                }
                Err(err) => {
                    error!(%err, "could not apply action");
                    last_error = Some(err.to_string());
                }
            },
        }
    }

    info!(moves = engine.moves_made(), "game closed");
    Ok(())
}

fn run_editor(
    mut editor: StageEditor,
    out: &Path,
    config: &GameConfig,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(config.tick_rate_ms);
    let mut state = EditorRenderState {
        status: None,
        out_path: out.display().to_string(),
    };

    loop {
        render_editor(terminal, &editor, &state)?;

        match handle_editor_input(tick)? {
            EditorInput::Quit => break,
            EditorInput::Timeout | EditorInput::Unknown => {}
            EditorInput::MoveCursor(direction) => editor.move_cursor(direction),
            EditorInput::Select(tool) => {
                editor.select(tool);
                state.status = None;
            }
            EditorInput::Apply => {
                state.status = editor.apply_at_cursor().err().map(|e| e.to_string());
            }
            EditorInput::Save => {
                state.status = Some(match editor.validate() {
                    Err(err) => format!("Not saved: {}", err),
                    Ok(_) => match save_descriptor(out, &editor.to_descriptor()) {
                        Ok(()) => {
                            info!(out = %out.display(), "stage saved");
                            "Saved".to_string()
                        }
                        Err(err) => format!("Not saved: {}", err),
                    },
                });
            }
        }
    }

    Ok(())
}
