use clap::{ArgAction, Parser, Subcommand};
use nautus::commands::{self, Lifecycle};
use nautus::core::context::ProjectContext;
use nautus::core::error::{NautusError, print_error};
use nautus::release::ReleaseType;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Project lifecycle scripts: build, run, test, release
#[derive(Parser)]
#[command(name = "nautus")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Project directory (defaults to the current directory)
  #[arg(short = 'C', long = "dir", global = true, value_name = "PATH")]
  dir: Option<PathBuf>,

  /// Diagnostic output on stderr (-v debug, -vv trace)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup & Inspection
  // ============================================================================
  /// Create nautus/scripts with the default scripts and a nautus.toml
  Init {
    /// Overwrite existing files
    #[arg(short, long)]
    force: bool,
  },

  /// List the scripts this project defines
  List {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Lifecycle
  // ============================================================================
  /// Run the Build script
  Build,

  /// Run the Test script
  Test,

  /// Run the Run script (after Prep, if defined), or the named script
  Run {
    /// Script to run instead of Run
    name: Option<String>,
  },

  /// Run the Release script
  Release {
    /// Kind of release to cut
    #[arg(value_enum, default_value_t = ReleaseType::Minor)]
    release_type: ReleaseType,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Diagnostics go to stderr so script output on stdout stays clean
fn init_tracing(verbose: u8) {
  let default = match verbose {
    0 => "warn",
    1 => "nautus=debug",
    _ => "nautus=trace",
  };
  let filter = EnvFilter::try_from_env("NAUTUS_LOG").unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let dir = match cli.dir {
    Some(dir) => dir,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => handle_error(NautusError::from(e).context("Failed to get current directory")),
    },
  };

  let release_type = match &cli.command {
    Commands::Release { release_type } => *release_type,
    _ => ReleaseType::default(),
  };

  let ctx = match ProjectContext::build(&dir, release_type) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let code = match cli.command {
    // Setup & Inspection
    Commands::Init { force } => exit_code(commands::run_init(&ctx.root, force)),
    Commands::List { json } => exit_code(commands::run_list(&ctx, json)),

    // Lifecycle
    Commands::Build => commands::run_lifecycle(&ctx, Lifecycle::Build),
    Commands::Test => commands::run_lifecycle(&ctx, Lifecycle::Test),
    Commands::Run { name: None } => commands::run_lifecycle(&ctx, Lifecycle::Run),
    Commands::Run { name: Some(name) } => commands::run_named(&ctx, &name),
    Commands::Release { .. } => commands::run_lifecycle(&ctx, Lifecycle::Release),
  };

  std::process::exit(code);
}

fn exit_code(result: Result<(), NautusError>) -> i32 {
  match result {
    Ok(()) => 0,
    Err(err) => {
      print_error(&err);
      err.exit_code().as_i32()
    }
  }
}

fn handle_error(err: NautusError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
