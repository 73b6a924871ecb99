use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use serde::Serialize;

use esq_config::Config;
use esq_domain::{EntityRegistry, SearchPattern, SearchTerm};
use esq_search::{ScoreQuery, ScoreQueryBuilder};

#[derive(Debug, Parser)]
#[command(
	version = esq_cli::VERSION,
	rename_all = "kebab",
	styles = esq_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, short = 'e', value_name = "NAME")]
	pub entity: String,
	/// Root of every emitted field path. Defaults to the entity name.
	#[arg(long, short = 'p', value_name = "PATH")]
	pub prefix: Option<String>,
	/// Weighted search term, e.g. `shirt=0.5`. Without a numeric `=WEIGHT` suffix the whole
	/// argument is the text and the weight is 1.
	#[arg(long = "term", short = 't', value_name = "TEXT[=WEIGHT]", num_args = 1..)]
	pub terms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BuildOutput {
	pub entity: String,
	pub prefix: String,
	pub terms: SearchPattern,
	pub queries: Vec<ScoreQuery>,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let cfg = esq_config::load(&args.config)?;

	esq_cli::init_tracing(&cfg.service.log_level);

	tracing::debug!(
		config = %args.config.display(),
		entities = cfg.entities.len(),
		"Config loaded."
	);

	let output = build_output(&cfg, &args)?;
	let json = serde_json::to_string_pretty(&output)?;

	println!("{json}");

	Ok(())
}

pub fn build_output(cfg: &Config, args: &Args) -> color_eyre::Result<BuildOutput> {
	let registry = EntityRegistry::from_config(cfg)?;

	tracing::debug!(entities = registry.len(), "Entity registry built.");

	let prefix = args.prefix.clone().unwrap_or_else(|| args.entity.clone());
	let mut pattern = SearchPattern::new();

	for raw in &args.terms {
		pattern.add_term(parse_term(raw)?);
	}

	if pattern.is_empty() {
		tracing::warn!(entity = %args.entity, "No search terms given; nothing to score.");
	}

	let queries =
		ScoreQueryBuilder::new(&registry).build_for_entity(&pattern, &args.entity, &prefix)?;

	tracing::info!(
		entity = %args.entity,
		prefix = %prefix,
		terms = pattern.len(),
		queries = queries.len(),
		"Score queries built."
	);

	Ok(BuildOutput { entity: args.entity.clone(), prefix, terms: pattern, queries })
}

/// Parses `TEXT` or `TEXT=WEIGHT`. Only the last `=` separates the weight, and only when what
/// follows it is a number; otherwise the whole argument is the text with weight 1.
pub fn parse_term(raw: &str) -> color_eyre::Result<SearchTerm> {
	let parsed = raw
		.rsplit_once('=')
		.and_then(|(text, weight)| weight.trim().parse::<f64>().ok().map(|weight| (text, weight)));
	let term = match parsed {
		Some((text, weight)) => SearchTerm::new(text, weight),
		None => SearchTerm::new(raw, 1.0),
	};

	term.map_err(|err| eyre::eyre!("Invalid search term {raw:?}: {err}"))
}
