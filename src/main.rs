use std::path::PathBuf;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use release_bump::analyzer::{ChangeClassifier, ChangeSignal};
use release_bump::cli::{run_bump_workflow, write_outputs, BumpWorkflowArgs};
use release_bump::config::{self, Config, ConfigOverrides};
use release_bump::domain::{increment, ChangeType, Version};
use release_bump::ui;

#[derive(Parser)]
#[command(
    name = "release-bump",
    version,
    about = "Classify a change, bump the semantic version and record a changelog entry"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that a version string is valid SemVer and show its parts
    Validate { version: String },

    /// Print the change type of a title or label set
    Classify {
        #[command(flatten)]
        signal: SignalArgs,
    },

    /// Print the version that follows VERSION for a change type
    Increment {
        version: String,
        #[arg(help = "major, minor or patch")]
        change_type: String,
    },

    /// Bump the manifest version and optionally add a changelog entry
    Bump(BumpArgs),
}

#[derive(ClapArgs)]
#[command(group(ArgGroup::new("change_signal").required(true).args(["title", "label"])))]
struct SignalArgs {
    #[arg(long, help = "Commit or pull request title carrying a #tag or [tag]")]
    title: Option<String>,

    #[arg(long = "label", help = "Label attached to the pull request (repeatable)")]
    label: Vec<String>,

    #[command(flatten)]
    labels: LabelArgs,
}

#[derive(ClapArgs)]
struct LabelArgs {
    #[arg(long, env = "RELEASE_BUMP_MAJOR_LABEL")]
    major_label: Option<String>,

    #[arg(long, env = "RELEASE_BUMP_MINOR_LABEL")]
    minor_label: Option<String>,

    #[arg(long, env = "RELEASE_BUMP_PATCH_LABEL")]
    patch_label: Option<String>,
}

#[derive(ClapArgs)]
#[command(group(ArgGroup::new("change_signal").required(true).args(["title", "label", "change_type"])))]
struct BumpArgs {
    #[arg(long, help = "Commit or pull request title carrying a #tag or [tag]")]
    title: Option<String>,

    #[arg(long = "label", help = "Label attached to the pull request (repeatable)")]
    label: Vec<String>,

    #[arg(long, help = "Declared change type: major, minor or patch")]
    change_type: Option<String>,

    #[command(flatten)]
    labels: LabelArgs,

    #[arg(
        long,
        env = "RELEASE_BUMP_MANIFEST",
        help = "Manifest holding the version field"
    )]
    manifest: Option<String>,

    #[arg(long, env = "RELEASE_BUMP_CHANGELOG", help = "Changelog file to update")]
    changelog: Option<String>,

    #[arg(
        long,
        env = "RELEASE_BUMP_CHANGELOG_MESSAGE",
        help = "Message whose '*' bullets become the entry body"
    )]
    message: Option<String>,

    #[arg(
        long,
        env = "RELEASE_BUMP_ADD_CHANGELOG_ENTRY",
        value_parser = BoolishValueParser::new(),
        help = "Insert a changelog entry"
    )]
    add_changelog_entry: bool,

    #[arg(long, help = "Entry date (dd-mm-yyyy), defaults to today")]
    date: Option<String>,

    #[arg(long, help = "Compute the new version without writing any file")]
    dry_run: bool,

    #[arg(
        long,
        env = "GITHUB_OUTPUT",
        help = "File to append current_version/new_version to"
    )]
    output_file: Option<PathBuf>,
}

impl LabelArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            major_label: self.major_label.clone(),
            minor_label: self.minor_label.clone(),
            patch_label: self.patch_label.clone(),
            ..Default::default()
        }
    }
}

fn signal_from(title: Option<String>, labels: Vec<String>) -> ChangeSignal {
    match title {
        Some(title) => ChangeSignal::Text(title),
        None => ChangeSignal::Labels(labels),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Validate { version } => {
            let version = Version::parse(&version)?;
            ui::display_version(&version);
        }
        Command::Classify { signal } => {
            let config = config::load_config(args.config.as_deref())?
                .with_overrides(signal.labels.overrides());
            let classifier = ChangeClassifier::from_config(&config)?;
            let change_type = classifier.classify(&signal_from(signal.title, signal.label));
            ui::display_classification(change_type);
        }
        Command::Increment {
            version,
            change_type,
        } => {
            let change_type: ChangeType = change_type.parse()?;
            println!("{}", increment(&version, change_type)?);
        }
        Command::Bump(bump) => run_bump(args.config.as_deref(), bump)?,
    }
    Ok(())
}

fn run_bump(config_path: Option<&str>, bump: BumpArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        manifest_path: bump.manifest,
        changelog_filename: bump.changelog,
        add_changelog_entry: bump.add_changelog_entry.then_some(true),
        ..bump.labels.overrides()
    };
    let config: Config = config::load_config(config_path)?.with_overrides(overrides);

    let signal = match bump.change_type {
        Some(declared) => ChangeSignal::Declared(declared.parse()?),
        None => signal_from(bump.title, bump.label),
    };

    ui::display_status(&format!("Reading version from {}", config.manifest.path));
    let result = run_bump_workflow(
        BumpWorkflowArgs {
            signal,
            changelog_message: bump.message,
            date: bump.date,
            dry_run: bump.dry_run,
        },
        &config,
    )?;

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_version_change(
        &result.current_version,
        &result.new_version,
        result.change_type,
    );

    if bump.dry_run {
        ui::display_status("Dry run: no files were written");
    } else {
        ui::display_success(&format!(
            "Updated {} to {}",
            config.manifest.path, result.new_version
        ));
        if result.changelog_updated {
            ui::display_success(&format!("Added entry to {}", config.changelog.filename));
        }
    }

    print!("{}", result.output_lines());
    if let Some(path) = bump.output_file {
        write_outputs(&path, &result)?;
    }
    Ok(())
}
