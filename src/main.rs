//! Command-line front end: list, roll on, and check the tables of a catalog.

use std::{fs, io, path::PathBuf, process::ExitCode};

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use rolltable::{
	dice::roller::{FastRand as FastRandRoller, Roller},
	table::{Error as TableError, LoadError},
	Dice, Library, Session,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const INDENT: &str = "    ";
const INDENT_DEEP: &str = "      ";

#[derive(Parser)]
#[command(
	name = "rolltable",
	about = "Roll on random tables for tabletop RPGs",
	version,
	propagate_version = true
)]
struct Cli {
	/// Catalog file listing the tables
	#[arg(
		short,
		long,
		global = true,
		env = "ROLLTABLE_CATALOG",
		default_value = "tables/catalog.json"
	)]
	catalog: PathBuf,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Show every category, section and table in the catalog
	List,

	/// Roll on a table
	Roll {
		/// Table path or name (default: the first table in the catalog)
		table: Option<String>,

		/// Number of times to roll
		#[arg(short = 'n', long, default_value_t = 1)]
		times: u32,

		/// Seed for reproducible rolls
		#[arg(short, long)]
		seed: Option<u64>,
	},

	/// Report probable authoring mistakes in every table
	Check,

	/// Roll a bare dice specification such as 3d6
	Dice {
		/// Dice to roll, in NdM form
		spec: String,

		/// Seed for reproducible rolls
		#[arg(short, long)]
		seed: Option<u64>,
	},
}

fn main() -> ExitCode {
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "error".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
		.init();

	let cli = Cli::parse();
	tracing::debug!("Using catalog {}", cli.catalog.display());

	let result = match cli.command {
		Command::List => Library::open(&cli.catalog).map(|library| list(&library)),
		Command::Roll { table, times, seed } => {
			Library::open(&cli.catalog).map(|library| roll(&library, table.as_deref(), times, seed))
		}
		Command::Check => Library::open(&cli.catalog).map(|library| check(&library)),
		Command::Dice { spec, seed } => Ok(dice(&spec, seed)),
	};

	result.unwrap_or_else(|err| {
		report(&err);
		ExitCode::FAILURE
	})
}

fn roller(seed: Option<u64>) -> FastRandRoller {
	seed.map_or_else(FastRandRoller::default, FastRandRoller::with_seed)
}

fn list(library: &Library) -> ExitCode {
	for category in &library.catalog().categories {
		println!("{}", category.label.to_uppercase());

		for section in &category.sections {
			println!("{INDENT}{}", section.label);

			for table_ref in &section.tables {
				let Some(loaded) = library.get(&table_ref.path) else {
					continue;
				};
				let dice = loaded
					.table
					.dice
					.map_or_else(|| "uniform".to_owned(), |dice| dice.to_string());
				println!(
					"{INDENT_DEEP}{} [{dice}, {} {} entries] {}",
					loaded.display_name,
					loaded.table.entries.len(),
					loaded.table.entries.kind(),
					loaded.path
				);
			}
		}
	}

	ExitCode::SUCCESS
}

fn roll(library: &Library, table: Option<&str>, times: u32, seed: Option<u64>) -> ExitCode {
	let mut session = Session::new(library, roller(seed));
	if let Some(query) = table {
		if session.select(query).is_none() {
			eprintln!("error: no table with the path or name {query:?}");
			return ExitCode::FAILURE;
		}
	}

	let Some(current) = session.current() else {
		eprintln!("error: the catalog has no tables");
		return ExitCode::FAILURE;
	};
	println!("{}", current.display_name);

	for _ in 0..times {
		if session.roll().is_some() {
			let view = session.view();
			println!("{}\n{}", view.roll_info, view.output);
		}
	}

	ExitCode::SUCCESS
}

fn check(library: &Library) -> ExitCode {
	let mut failed = 0_usize;

	for loaded in library.tables() {
		let issues = loaded.table.validate();
		if issues.is_empty() {
			println!("{}: ok", loaded.path);
			continue;
		}

		failed = failed.saturating_add(1);
		println!("{}: {} issue(s)", loaded.path, issues.len());
		for issue in issues {
			println!("{INDENT}- {issue}");
		}
	}

	if failed > 0 {
		eprintln!("{failed} of {} tables have issues", library.tables().len());
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}

fn dice(spec: &str, seed: Option<u64>) -> ExitCode {
	match spec.parse::<Dice>() {
		Ok(dice) => {
			println!("{}", roller(seed).roll(&dice));
			ExitCode::SUCCESS
		}
		Err(err) => {
			eprintln!("error: {spec:?} is not a dice specification: {err}");
			ExitCode::FAILURE
		}
	}
}

/// Prints a load error, pointing at the offending spot when it's a JSON syntax or shape problem.
fn report(err: &LoadError) {
	if let LoadError::Invalid {
		path,
		source: TableError::Json(json_err),
	} = err
	{
		if let Ok(text) = fs::read_to_string(path) {
			let filename = path.display().to_string();
			let offset = char_offset(&text, json_err.line(), json_err.column());
			let span = offset..offset.saturating_add(1);

			let mut output = Vec::new();
			let written = Report::build(ReportKind::Error, (filename.as_str(), span.clone()))
				.with_message(format!("failed to load {filename}"))
				.with_label(
					Label::new((filename.as_str(), span))
						.with_message(json_err.to_string())
						.with_color(Color::Red),
				)
				.finish()
				.write((filename.as_str(), Source::from(text.as_str())), &mut output);
			if written.is_ok() {
				eprint!("{}", String::from_utf8_lossy(&output));
				return;
			}
		}
	}

	eprintln!("error: {err}");
}

/// Converts serde_json's 1-based line and column into a character offset, as ariadne expects.
fn char_offset(text: &str, line: usize, column: usize) -> usize {
	let before: usize = text
		.split_inclusive('\n')
		.take(line.saturating_sub(1))
		.map(|line| line.chars().count())
		.sum();
	before
		.saturating_add(column.saturating_sub(1))
		.min(text.chars().count().saturating_sub(1))
}
