// crates.io
use clap::Parser;
// self
use esq::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	esq::run(args)
}
