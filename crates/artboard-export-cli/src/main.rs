use anyhow::{Context, Result};
use artboard_export_config::{Config, SnapshotKeySetting};
use artboard_export_engine::{DocumentAdapter, ExportRequest, SnapshotKey, io, run_export};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "artboard-export")]
#[command(about = "Export every artboard of a vector document to its own PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one PDF per artboard
    Export(ExportArgs),
    /// Show the document name and its artboards
    Info {
        /// JSON document description
        document: PathBuf,
    },
    /// Write a config file with the default settings
    InitConfig {
        /// Output directory to store in the config
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
struct ExportArgs {
    /// JSON document description
    document: PathBuf,
    /// Directory the PDFs are written to (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Export with the current layer visibility instead of hiding unrelated layers
    #[arg(long, overrides_with = "hide_layers")]
    keep_layers: bool,
    /// Hide layers without content on the artboard (overrides the config file)
    #[arg(long, overrides_with = "keep_layers")]
    hide_layers: bool,
    /// Skip fast web view optimization
    #[arg(long, overrides_with = "optimize")]
    no_optimize: bool,
    /// Optimize for fast web view (overrides the config file)
    #[arg(long, overrides_with = "no_optimize")]
    optimize: bool,
    /// Embed page thumbnails
    #[arg(long)]
    thumbnails: bool,
    /// Log every artboard as it is processed
    #[arg(long)]
    debug: bool,
    /// How layer visibility is remembered while an artboard is exported
    #[arg(long, value_enum)]
    snapshot_key: Option<SnapshotKeyArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SnapshotKeyArg {
    Identity,
    Name,
}

impl From<SnapshotKeyArg> for SnapshotKey {
    fn from(arg: SnapshotKeyArg) -> Self {
        match arg {
            SnapshotKeyArg::Identity => SnapshotKey::Identity,
            SnapshotKeyArg::Name => SnapshotKey::Name,
        }
    }
}

fn snapshot_key_from_config(setting: SnapshotKeySetting) -> SnapshotKey {
    match setting {
        SnapshotKeySetting::Identity => SnapshotKey::Identity,
        SnapshotKeySetting::Name => SnapshotKey::Name,
    }
}

/// `Some(true)` for the `on` flag, `Some(false)` for the `off` flag, `None` when neither is given
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Flags win over the config file; `None` when no output directory is known
fn resolve_request(args: &ExportArgs, config: &Config) -> Option<ExportRequest> {
    let output_dir = args.output.clone().or_else(|| config.output_dir.clone())?;
    Some(ExportRequest {
        hide_unrelated_layers: switch(args.hide_layers, args.keep_layers)
            .unwrap_or(config.hide_unrelated_layers),
        optimize: switch(args.optimize, args.no_optimize).unwrap_or(config.optimize),
        thumbnails: config.thumbnails || args.thumbnails,
        debug: config.debug || args.debug,
        snapshot_key: args
            .snapshot_key
            .map(SnapshotKey::from)
            .unwrap_or_else(|| snapshot_key_from_config(config.snapshot_key)),
        ..ExportRequest::new(output_dir)
    })
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Export(args) => export(&args, &config),
        Commands::Info { document } => {
            init_logging(config.debug);
            info(&document)
        }
        Commands::InitConfig { output, force } => {
            init_logging(config.debug);
            let path = Config::config_path();
            init_config(&path, output, force)?;
            println!("Config written to {}", path.display());
            Ok(())
        }
    }
}

/// Write the default settings, with `output_dir` if given, to `path`
fn init_config(path: &Path, output_dir: Option<PathBuf>, force: bool) -> Result<Config> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists; pass --force to replace it",
            path.display()
        );
    }
    let config = Config {
        output_dir,
        ..Config::default()
    };
    config
        .save_to_path(path)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    log::debug!("Wrote config {config:?} to {}", path.display());
    Ok(config)
}

fn export(args: &ExportArgs, config: &Config) -> Result<()> {
    let Some(request) = resolve_request(args, config) else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                format!(
                    "no output directory: pass --output or set output_dir in {}",
                    Config::config_path().display()
                ),
            )
            .exit();
    };
    init_logging(request.debug);
    log::debug!("Resolved export request: {request:?}");

    let mut document = io::load_document(&args.document)
        .with_context(|| format!("Failed to load document {}", args.document.display()))?;

    let report = run_export(Some(&mut document), &request).context("Export aborted")?;
    println!("{report}");

    if !report.is_complete() {
        process::exit(1);
    }
    Ok(())
}

fn info(path: &Path) -> Result<()> {
    let document = io::load_document(path)
        .with_context(|| format!("Failed to load document {}", path.display()))?;

    println!("Document: {}", document.name());
    println!("Artboards: {}", document.artboards().len());
    for artboard in document.artboards() {
        let rect = artboard.rect();
        println!(
            "  {}. {} [{}, {}, {}, {}] ({} x {})",
            artboard.index() + 1,
            artboard.display_name(),
            rect.x0,
            rect.y1,
            rect.x1,
            rect.y0,
            rect.width(),
            rect.height()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn base_args() -> ExportArgs {
        ExportArgs {
            document: PathBuf::from("poster.json"),
            ..ExportArgs::default()
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_flag_overrides_config() {
        let config = Config {
            output_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        let args = ExportArgs {
            output: Some(PathBuf::from("/from/flag")),
            ..base_args()
        };

        let request = resolve_request(&args, &config).unwrap();

        assert_eq!(request.output_dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_missing_output_dir_gives_none() {
        assert_eq!(resolve_request(&base_args(), &Config::default()), None);
    }

    #[test]
    fn test_defaults_follow_config() {
        let config = Config {
            output_dir: Some(PathBuf::from("/out")),
            ..Config::default()
        };

        let request = resolve_request(&base_args(), &config).unwrap();

        assert_eq!(request, ExportRequest::new("/out"));
    }

    #[rstest]
    #[case::keep_layers(ExportArgs { keep_layers: true, ..base_args() }, |r: &ExportRequest| !r.hide_unrelated_layers)]
    #[case::no_optimize(ExportArgs { no_optimize: true, ..base_args() }, |r: &ExportRequest| !r.optimize)]
    #[case::thumbnails(ExportArgs { thumbnails: true, ..base_args() }, |r: &ExportRequest| r.thumbnails)]
    #[case::debug(ExportArgs { debug: true, ..base_args() }, |r: &ExportRequest| r.debug)]
    #[case::name_key(
        ExportArgs { snapshot_key: Some(SnapshotKeyArg::Name), ..base_args() },
        |r: &ExportRequest| r.snapshot_key == SnapshotKey::Name
    )]
    fn test_flags_override_defaults(
        #[case] args: ExportArgs,
        #[case] check: fn(&ExportRequest) -> bool,
    ) {
        let config = Config {
            output_dir: Some(PathBuf::from("/out")),
            ..Config::default()
        };

        let request = resolve_request(&args, &config).unwrap();

        assert!(check(&request), "{request:?}");
    }

    #[test]
    fn test_config_snapshot_key_used_without_flag() {
        let config = Config {
            output_dir: Some(PathBuf::from("/out")),
            snapshot_key: SnapshotKeySetting::Name,
            hide_unrelated_layers: false,
            ..Config::default()
        };

        let request = resolve_request(&base_args(), &config).unwrap();

        assert_eq!(request.snapshot_key, SnapshotKey::Name);
        assert!(!request.hide_unrelated_layers);
    }

    #[test]
    fn test_flags_turn_on_what_config_turned_off() {
        let config = Config {
            output_dir: Some(PathBuf::from("/out")),
            optimize: false,
            hide_unrelated_layers: false,
            ..Config::default()
        };
        let args = ExportArgs {
            optimize: true,
            hide_layers: true,
            ..base_args()
        };

        let request = resolve_request(&args, &config).unwrap();

        assert!(request.optimize);
        assert!(request.hide_unrelated_layers);
        assert_eq!(
            resolve_request(&base_args(), &config).map(|r| (r.optimize, r.hide_unrelated_layers)),
            Some((false, false))
        );
    }

    #[test]
    fn test_last_of_opposing_flags_wins() {
        let cli = Cli::try_parse_from([
            "artboard-export",
            "export",
            "poster.json",
            "--no-optimize",
            "--optimize",
            "--hide-layers",
            "--keep-layers",
        ])
        .unwrap();

        let Commands::Export(args) = cli.command else {
            panic!("expected export subcommand");
        };
        assert_eq!(switch(args.optimize, args.no_optimize), Some(true));
        assert_eq!(switch(args.hide_layers, args.keep_layers), Some(false));
    }

    #[test]
    fn test_init_config_writes_defaults_with_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let written = init_config(&path, Some(PathBuf::from("/exports")), false).unwrap();

        let loaded = Config::load_from_path(&path).unwrap().unwrap();
        assert_eq!(loaded, written);
        assert_eq!(loaded.output_dir, Some(PathBuf::from("/exports")));
        assert!(loaded.hide_unrelated_layers);
    }

    #[test]
    fn test_init_config_keeps_existing_file_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "optimize = false\n").unwrap();

        let err = init_config(&path, None, false).unwrap_err();
        assert!(err.to_string().contains("--force"), "{err}");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "optimize = false\n");

        init_config(&path, None, true).unwrap();
        assert!(Config::load_from_path(&path).unwrap().unwrap().optimize);
    }

    #[test]
    fn test_parses_export_subcommand() {
        let cli = Cli::try_parse_from([
            "artboard-export",
            "export",
            "poster.json",
            "--output",
            "/out",
            "--snapshot-key",
            "name",
            "--keep-layers",
        ])
        .unwrap();

        let Commands::Export(args) = cli.command else {
            panic!("expected export subcommand");
        };
        assert_eq!(args.document, PathBuf::from("poster.json"));
        assert_eq!(args.output, Some(PathBuf::from("/out")));
        assert_eq!(args.snapshot_key, Some(SnapshotKeyArg::Name));
        assert!(args.keep_layers);
    }
}
