//! Dashboard entry-point: loads settings and a directory, then runs the
//! interactive terminal front end.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use user_directory::{Role, UserRecord};

use dashboard::DashboardError;
use dashboard::cli::{Outcome, USAGE, execute, parse_command, render_details, render_state};
use dashboard::config::DashboardSettings;
use dashboard::query::QueryState;
use dashboard::session::DashboardSession;

/// Application bootstrap.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "dashboard failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), DashboardError> {
    let settings = DashboardSettings::load_from_iter(std::env::args_os()).map_err(|err| {
        DashboardError::Config {
            message: err.to_string(),
        }
    })?;
    let source = settings.directory_source();
    let directory = source.load()?;
    info!(records = directory.len(), source = ?source, "directory loaded");

    let session = DashboardSession::start(directory, settings.session_config());
    let renderer = Renderer {
        state: session.state(),
        role: session.role_filter(),
        selection: session.selection(),
    };
    let rendering = tokio::spawn(renderer.run());

    write_block(USAGE)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(command) => match execute(&session, command) {
                Outcome::Continue => {}
                Outcome::Print(message) => write_block(&message)?,
                Outcome::Quit => break,
            },
            Err(err) => write_block(&err.to_string())?,
        }
    }

    rendering.abort();
    Ok(())
}

struct Renderer {
    state: watch::Receiver<QueryState>,
    role: watch::Receiver<Option<Role>>,
    selection: watch::Receiver<Option<Arc<UserRecord>>>,
}

impl Renderer {
    async fn run(mut self) {
        loop {
            let block = tokio::select! {
                changed = self.state.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    render_state(&self.state.borrow_and_update(), *self.role.borrow())
                }
                changed = self.selection.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.selection
                        .borrow_and_update()
                        .as_deref()
                        .map(render_details)
                        .unwrap_or_default()
                }
            };
            if block.is_empty() {
                continue;
            }
            if let Err(err) = write_block(&block) {
                warn!(error = %err, "failed to render dashboard");
                break;
            }
        }
    }
}

fn write_block(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{text}")?;
    out.flush()
}
