use std::{fmt::Write as _, io, sync::OnceLock};

use application::{
    console::{self, Input, Outcome},
    Args, Config, Service,
};
use service::infra::Http;
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    !STDERR_LEVELS.contains(meta.level())
                        && LOG_LEVEL.get().copied().unwrap_or(log::Level::WARN)
                            >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    STDERR_LEVELS.contains(meta.level())
                        && LOG_LEVEL.get().copied().unwrap_or(log::Level::WARN)
                            >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let args = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config { api, view, log } = Config::from_args(&args).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let http = Http::new(&api.into()).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
    })?;
    log::info!("using users endpoint `{}`", http.endpoint());

    let service = Service::new(view.into(), http);
    let mut state = service.state();

    if let Err(e) = service.load(&mut state).await {
        log::error!("failed to fetch users: {e}");
    }

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut out = String::new();
    _ = writeln!(out, "{}\n", console::HELP);
    loop {
        console::render(&mut out, &state, view.ansi)
            .map_err(|e| log::error!("failed to render: {e}"))?;
        out.push_str("> ");
        stdout
            .write_all(out.as_bytes())
            .await
            .map_err(|e| log::error!("failed to write to stdout: {e}"))?;
        stdout
            .flush()
            .await
            .map_err(|e| log::error!("failed to flush stdout: {e}"))?;
        out.clear();

        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| log::error!("failed to read from stdin: {e}"))?
        else {
            break;
        };

        let input = match line.parse::<Input>() {
            Ok(input) => input,
            Err(e) => {
                _ = writeln!(out, "{e}");
                continue;
            }
        };
        let message = match console::apply(&mut state, input) {
            Outcome::Render | Outcome::Rejected => continue,
            Outcome::Disabled(reason) => reason.to_owned(),
            Outcome::Added(id) => format!("added user #{id}"),
            Outcome::Help => console::HELP.to_owned(),
            Outcome::Quit => break,
        };
        _ = writeln!(out, "{message}");
    }

    Ok(())
}
