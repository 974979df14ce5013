use anyhow::Context;
use catalog_cli::{
    export_categories, icon_for, init_tracing, list_categories, load_icon_rules, render_table,
    sync_categories, ExportFormat, IconQuery,
};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

fn cli() -> Command {
    let store_arg = Arg::new("store")
        .long("store")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path to the category snapshot (JSON)");

    Command::new("catalogctl")
        .version(catalog_cli::VERSION)
        .about("Endpoint icon and agent category tooling")
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("icon")
                .about("Resolve the icon asset for an endpoint")
                .arg(Arg::new("name").long("name").help("Endpoint name"))
                .arg(
                    Arg::new("model")
                        .long("model")
                        .action(ArgAction::Append)
                        .help("Declared model (repeatable)"),
                )
                .arg(Arg::new("base-url").long("base-url").help("API base URL"))
                .arg(
                    Arg::new("icon-url")
                        .long("icon-url")
                        .help("Explicit icon path under /assets/"),
                )
                .arg(
                    Arg::new("rules")
                        .long("rules")
                        .value_parser(value_parser!(PathBuf))
                        .help("Extra keyword rules (JSON), checked before the built-ins"),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Reconcile a snapshot against the default categories")
                .arg(store_arg.clone())
                .arg(
                    Arg::new("defaults")
                        .long("defaults")
                        .value_parser(value_parser!(PathBuf))
                        .help("Defaults file (.json, .yaml, .toml)"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List categories")
                .arg(store_arg.clone())
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include inactive categories"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export all categories")
                .arg(store_arg)
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .value_parser(value_parser!(ExportFormat))
                        .help("json or csv"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Output file"),
                ),
        )
}

fn store_path(args: &ArgMatches) -> anyhow::Result<&PathBuf> {
    args.get_one::<PathBuf>("store").context("--store is required")
}

async fn run(matches: ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("icon", args)) => {
            let rules = match args.get_one::<PathBuf>("rules") {
                Some(path) => load_icon_rules(path).await?,
                None => Vec::new(),
            };
            let query = IconQuery {
                name: args.get_one::<String>("name").cloned(),
                models: args
                    .get_many::<String>("model")
                    .map(|models| models.cloned().collect())
                    .unwrap_or_default(),
                base_url: args.get_one::<String>("base-url").cloned(),
                icon_url: args.get_one::<String>("icon-url").cloned(),
                rules,
            };
            println!("{}", icon_for(query));
        }
        Some(("sync", args)) => {
            let defaults = args.get_one::<PathBuf>("defaults").map(PathBuf::as_path);
            let report = sync_categories(store_path(args)?, defaults).await?;
            println!("Created:     {}", report.created);
            println!("Updated:     {}", report.updated);
            println!("Deactivated: {}", report.deactivated);
            println!("Changed:     {}", report.changed());
        }
        Some(("list", args)) => {
            let categories = list_categories(store_path(args)?, args.get_flag("all")).await?;
            print!("{}", render_table(&categories));
        }
        Some(("export", args)) => {
            let format = *args
                .get_one::<ExportFormat>("format")
                .context("--format is required")?;
            let out = args.get_one::<PathBuf>("out").context("--out is required")?;
            let count = export_categories(store_path(args)?, format, out).await?;
            println!("Exported {count} categories to {}", out.display());
        }
        _ => unreachable!("subcommand_required"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));
    run(matches).await
}
