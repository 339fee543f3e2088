use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use dpp_core::assets::FileAssetLoader;
use dpp_core::catalog::CatalogFile;
use dpp_core::config::{Config, ViewerConfig};
use dpp_core::foundation::time::FrameTimer;
use dpp_core::session::{LoadState, ViewerSession};

use crate::terminal::{parse_command, Command, TerminalSink};

#[derive(Args)]
pub struct ViewArgs {
    /// Passport catalog (.toml or .ron)
    pub catalog: PathBuf,

    /// Viewer settings (.toml or .ron)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model file, overriding the catalog's model path
    #[arg(long)]
    pub asset: Option<PathBuf>,
}

pub fn run(args: &ViewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => ViewerConfig::load_from_file(path)?,
        None => ViewerConfig::default(),
    };
    let catalog = CatalogFile::load_from_file(&args.catalog)?.into_catalog()?;
    let asset = args
        .asset
        .clone()
        .unwrap_or_else(|| model_path(&args.catalog, catalog.model_path()));

    let mut sink = TerminalSink::new(std::io::stdout());
    let mut session = ViewerSession::new(catalog, config.clone(), &mut sink);
    session.begin_load(Arc::new(FileAssetLoader), asset)?;
    session.render_panels(&mut sink)?;

    let lines = spawn_stdin_reader();
    let mut timer = FrameTimer::new(Duration::from_millis(config.frame_interval_ms));
    log::info!("Viewer running; type 'enter <n>', 'leave <n>', 'panels' or 'quit'");

    'frames: loop {
        if session.update() {
            report_load(&session);
            session.render_panels(&mut sink)?;
        }

        // Input is held back until the load settles so scripted hovers apply to the model
        if !session.state().is_loading() {
            loop {
                let line = match lines.try_recv() {
                    Ok(line) => line,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => break 'frames,
                };

                match parse_command(&line, session.catalog()) {
                    Ok(Command::Hover(event)) => {
                        if session.hover(&event) {
                            session.render_panels(&mut sink)?;
                        }
                    }
                    Ok(Command::Panels) => session.render_panels(&mut sink)?,
                    Ok(Command::Resize(width, height)) => session.set_viewport(width, height),
                    Ok(Command::Quit) => break 'frames,
                    Err(e) => eprintln!("{e}"),
                }
            }
        }

        timer.wait_for_next_frame();
    }

    log::info!("Viewer stopped after {} frame(s)", timer.frame_count());
    Ok(())
}

/// Relative model paths are resolved against the catalog's directory
fn model_path(catalog_path: &Path, model_path: &str) -> PathBuf {
    let model_path = Path::new(model_path);
    match catalog_path.parent() {
        Some(dir) if model_path.is_relative() => dir.join(model_path),
        _ => model_path.to_path_buf(),
    }
}

fn report_load(session: &ViewerSession) {
    match session.state() {
        LoadState::Ready => println!(
            "Model ready: {} of {} passport(s) linked",
            session.catalog().bound_count(),
            session.catalog().len()
        ),
        LoadState::Failed(message) => println!("Error loading model: {message}"),
        LoadState::Idle | LoadState::Loading(_) => {}
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}
