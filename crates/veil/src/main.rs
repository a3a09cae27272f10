use clap::Parser;
use miette::IntoDiagnostic;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use veil::BrowsingLevel;
use veil::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(author, version, about = "Veil - run a content visibility scenario")]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Override the viewer's browsing level (e.g. 3, pg|pg13, sfw)
    #[arg(short, long)]
    browsing_level: Option<BrowsingLevel>,

    /// Compare levels against the highest enabled tier
    #[arg(long)]
    allow_lower_levels: bool,

    /// Reveal items hidden by id
    #[arg(long)]
    show_hidden: bool,

    /// Keep container items whose images were all filtered out
    #[arg(long)]
    show_imageless: bool,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_env("VEIL_LOG"))
        .init();

    let args = Args::parse();
    let mut scenario = Scenario::load(&args.scenario)?;

    if let Some(level) = args.browsing_level {
        scenario.viewer.browsing_level = level;
    }
    scenario.viewer.allow_lower_levels |= args.allow_lower_levels;
    scenario.options.show_hidden |= args.show_hidden;
    scenario.options.show_imageless |= args.show_imageless;

    let result = scenario.run()?;
    let out = if args.pretty {
        serde_json::to_string_pretty(&result).into_diagnostic()?
    } else {
        serde_json::to_string(&result).into_diagnostic()?
    };
    println!("{out}");

    Ok(())
}
