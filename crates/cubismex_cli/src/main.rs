#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "cubismex", about = "Unity asset graph inspection and Live2D Cubism export")]
struct Cli {
	/// Raise log verbosity (-v info, -vv debug, -vvv trace).
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Summarize files, record kinds and containers of a session dump.
	Info(cmd::info::Args),
	/// List container paths assigned to objects.
	Containers(cmd::containers::Args),
	/// Print the game-object hierarchy.
	Tree(cmd::tree::Args),
	/// Export every Live2D model found in the session.
	Live2d(cmd::live2d::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> cubismex::asset::Result<()> {
	match command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Containers(args) => cmd::containers::run(args),
		Commands::Tree(args) => cmd::tree::run(args),
		Commands::Live2d(args) => cmd::live2d::run(args),
	}
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_env("CUBISMEX_LOG").unwrap_or_else(|_| EnvFilter::new(level));

	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).try_init();
}
