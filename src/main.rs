use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use glui::{
    catalog::EntityKind,
    config::{self, GluiConfig},
    executor::FixtureExecutor,
    query_chain::HopId,
    result_shaper::ShapeMode,
    session::Session,
};
use validator::Validate;

/// glui - chain entity hops into one nested GraphQL query
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file (environment variables are used otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// YAML entity catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// YAML sanitization rules, merged over the built-in rules
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Maximum number of hops in a chain
    #[arg(long, global = true)]
    max_chain_length: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the entity kinds of the catalog with their fields and filters
    Kinds,
    /// Print the GraphQL query for a chain
    Compile(ChainArgs),
    /// Compile a chain, read the response from a file, and render it
    Run {
        #[command(flatten)]
        chain: ChainArgs,

        /// GraphQL response envelope (`{"data": ...}`) to render
        #[arg(long)]
        response: PathBuf,

        /// Result shape: flat or nested
        #[arg(long)]
        mode: Option<ShapeMode>,
    },
}

#[derive(Args)]
struct ChainArgs {
    /// Entity kind of the next hop (repeat, outermost first)
    #[arg(long = "hop", required = true)]
    hops: Vec<String>,

    /// Deselect a field: `<hop>:<field>`, hop numbered from 1
    #[arg(long)]
    exclude: Vec<String>,

    /// Set a filter: `<hop>:<filter>=<value>`, hop numbered from 1
    #[arg(long)]
    filter: Vec<String>,
}

fn split_hop_ref<'a>(arg: &'a str, ids: &[HopId]) -> anyhow::Result<(HopId, &'a str)> {
    let (index, rest) = arg
        .split_once(':')
        .ok_or_else(|| anyhow!("expected `<hop>:...`, got `{}`", arg))?;
    let index: usize = index
        .parse()
        .with_context(|| format!("invalid hop number in `{}`", arg))?;
    if index == 0 || index > ids.len() {
        bail!("hop {} out of range (chain has {} hops)", index, ids.len());
    }
    Ok((ids[index - 1], rest))
}

fn build_session(session: &mut Session, args: &ChainArgs) -> anyhow::Result<()> {
    let mut ids = Vec::with_capacity(args.hops.len());
    for kind in &args.hops {
        ids.push(session.add_hop(&EntityKind::from(kind.as_str()))?);
    }

    for arg in &args.exclude {
        let (id, field) = split_hop_ref(arg, &ids)?;
        session.toggle_field(id, field)?;
    }

    for arg in &args.filter {
        let (id, assignment) = split_hop_ref(arg, &ids)?;
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("expected `<hop>:<filter>=<value>`, got `{}`", arg))?;
        session.set_filter(id, name, value)?;
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => GluiConfig::from_yaml_file(path)?,
        None => GluiConfig::from_env()?,
    };

    let mode = match &cli.command {
        Command::Run { mode: Some(mode), .. } => *mode,
        _ => config.default_mode,
    };
    let max_chain_length = cli.max_chain_length.unwrap_or(config.max_chain_length);
    config.merge(config::CliConfig {
        catalog_path: cli.catalog,
        sanitizer_rules_path: cli.rules,
        default_mode: mode,
        max_chain_length,
    });
    config.validate()?;

    let catalog = config.load_catalog()?;
    let rules = config.load_rules()?;
    let mut session = Session::new(catalog, rules, &config);

    match cli.command {
        Command::Kinds => {
            for kind in session.catalog().kinds() {
                let entity = session.catalog().entity(kind)?;
                println!(
                    "{}\n  fields:  {}\n  filters: {}",
                    kind,
                    entity.fields.join(" "),
                    entity.filters.join(" ")
                );
            }
        }
        Command::Compile(args) => {
            build_session(&mut session, &args)?;
            println!("{}", session.search()?);
        }
        Command::Run {
            chain, response, ..
        } => {
            build_session(&mut session, &chain)?;
            session.run(&FixtureExecutor::new(response))?;
            match session.render() {
                Some(tree) => print!("{}", tree),
                None => log::info!("Nothing to render"),
            }
        }
    }
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    // Initialize logger - defaults to WARN level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
