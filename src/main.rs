use color_eyre::eyre::{
    Result,
    WrapErr,
    eyre,
};
use itertools::Itertools;
use prize_wheel::config::{
    self,
    WheelSettings,
};
use std::{
    fs,
    path::Path,
};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling,
};
use tracing_subscriber::{
    EnvFilter,
    fmt,
};

mod app;
mod ui;

const LOG_FILE_PREFIX: &str = "prize-wheel.log";

fn print_usage_and_exit() -> ! {
    println!(
        "Usage: prize-wheel [--names <list> | --names-file <path> | --demo <count>]\n\
         [--config <path>] [--keep-winners] [--no-sound] [--no-overlay]\n\
         [--confirm-reset] [--log-dir <path>]\n\
         \n\
         Flags:\n\
           --names <list>       Comma-separated participant names\n\
           --names-file <path>  Read names from a file (one per line or comma-separated)\n\
           --demo <count>       Fill the wheel with <count> generated names\n\
           --config <path>      JSON settings file\n\
           --keep-winners       Leave winners on the wheel\n\
           --no-sound           Disable audio cues\n\
           --no-overlay         Do not pop up the winner overlay\n\
           --confirm-reset      Ask before resetting the wheel\n\
           --log-dir <path>     Log directory (default ~/.prize-wheel/logs)"
    );
    std::process::exit(0);
}

enum NamesSource {
    Inline(String),
    File(String),
    Demo(usize),
}

fn set_names(names: &mut Option<NamesSource>, source: NamesSource) -> Result<()> {
    if names.is_some() {
        return Err(eyre!(
            "Multiple name sources provided; choose one of --names/--names-file/--demo"
        ));
    }
    *names = Some(source);
    Ok(())
}

struct CliArgs {
    app: app::AppConfig,
    log_dir: Option<String>,
}

fn parse_cli_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut args = args.into_iter();
    let mut names: Option<NamesSource> = None;
    let mut config_path: Option<String> = None;
    let mut log_dir: Option<String> = None;
    let mut keep_winners = false;
    let mut no_sound = false;
    let mut no_overlay = false;
    let mut confirm_reset = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--names" => {
                let list = args
                    .next()
                    .ok_or_else(|| eyre!("--names requires a comma-separated list"))?;
                set_names(&mut names, NamesSource::Inline(list))?;
            }
            "--names-file" => {
                let path = args
                    .next()
                    .ok_or_else(|| eyre!("--names-file requires a path argument"))?;
                set_names(&mut names, NamesSource::File(path))?;
            }
            "--demo" => {
                let count = args
                    .next()
                    .ok_or_else(|| eyre!("--demo requires a count"))?
                    .parse::<usize>()
                    .wrap_err("--demo count must be a positive integer")?;
                if count == 0 {
                    return Err(eyre!("--demo count must be a positive integer"));
                }
                set_names(&mut names, NamesSource::Demo(count))?;
            }
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| eyre!("--config requires a path argument"))?;
                if config_path.is_some() {
                    return Err(eyre!("--config may only be specified once"));
                }
                config_path = Some(path);
            }
            "--log-dir" => {
                let dir = args
                    .next()
                    .ok_or_else(|| eyre!("--log-dir requires a path argument"))?;
                if log_dir.is_some() {
                    return Err(eyre!("--log-dir may only be specified once"));
                }
                log_dir = Some(dir);
            }
            "--keep-winners" => keep_winners = true,
            "--no-sound" => no_sound = true,
            "--no-overlay" => no_overlay = true,
            "--confirm-reset" => confirm_reset = true,
            "--help" | "-h" => print_usage_and_exit(),
            other => return Err(eyre!("Unknown argument: {other}")),
        }
    }

    let mut settings = match config_path {
        Some(path) => config::load_settings(config::expand_path(&path))?,
        None => WheelSettings::default(),
    };
    if keep_winners {
        settings.remove_winners = false;
    }
    if no_sound {
        settings.sound = false;
    }
    if no_overlay {
        settings.overlay = false;
    }
    if confirm_reset {
        settings.confirm_reset = true;
    }

    let initial_names = match names {
        None => String::new(),
        Some(NamesSource::Inline(list)) => list,
        Some(NamesSource::File(path)) => config::read_names_file(config::expand_path(&path))?,
        Some(NamesSource::Demo(count)) => (0..count).map(|_| fakeit::name::first()).join(", "),
    };

    Ok(CliArgs {
        app: app::AppConfig {
            initial_names,
            settings,
        },
        log_dir,
    })
}

fn init_tracing(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Failed to create log directory {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE_PREFIX));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!(e))?;
    Ok(guard)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = parse_cli_args(std::env::args().skip(1))?;
    let log_dir = config::resolve_log_dir(cli.log_dir.as_deref())?;
    let _guard = init_tracing(&log_dir)?;
    tracing::info!("starting prize-wheel");
    app::run_app(cli.app).await
}
