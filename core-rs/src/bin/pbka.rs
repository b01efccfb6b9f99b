//! PBKA - PBK model annotation validator CLI
//!
//! Exits non-zero when a validated model is invalid.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use pbka_core::{
    Category, Level, ModelSnapshot, OntologyKind, OntologyResolver, ValidationReport, Validator, ValidatorConfig,
    DEFAULT_CONFIG_FILE,
};

#[derive(Parser)]
#[command(name = "pbka")]
#[command(version)]
#[command(about = "Validate ontology annotations of PBK models", long_about = None)]
struct Cli {
    /// Validator configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a model snapshot (.json, .yaml, .yml)
    Validate {
        /// Model file
        model: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Skip the unit-consistency check
        #[arg(long)]
        no_units: bool,
    },
    /// Resolve an IRI in one ontology graph
    Resolve {
        /// IRI or shorthand (obo:, urn:miriam:, identifiers.org)
        iri: String,
        /// domain, chemical or taxonomy
        #[arg(long, short = 'g', default_value = "domain", value_parser = parse_graph)]
        graph: OntologyKind,
    },
    /// List the classes under a category anchor
    Terms {
        /// e.g. compartment, species, biochemical_parameter, mammal
        #[arg(value_parser = parse_category)]
        category: Category,
    },
}

fn parse_graph(value: &str) -> std::result::Result<OntologyKind, String> {
    serde_yaml::from_str(value).map_err(|_| format!("unknown graph '{}' (domain, chemical, taxonomy)", value))
}

fn parse_category(value: &str) -> std::result::Result<Category, String> {
    serde_yaml::from_str(value).map_err(|_| format!("unknown category '{}'", value))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ValidatorConfig::load(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    let resolver = OntologyResolver::shared(&config).context("failed to load ontologies")?;

    match cli.command {
        Commands::Validate { model, json, no_units } => {
            let document = ModelSnapshot::from_path(&model)
                .with_context(|| format!("failed to read model {}", model.display()))?;

            let mut options = config.options.clone();
            if no_units {
                options.units_consistency = false;
            }
            if json {
                options.log_records = false;
            }

            let report = Validator::new(resolver).with_options(options).validate(&document);

            if json {
                println!("{}", report.to_json()?);
            } else {
                print_report(&report);
            }

            if !report.valid {
                process::exit(1);
            }
        }

        Commands::Resolve { iri, graph } => match resolver.resolve(&iri, graph) {
            Some(class) => {
                println!("{} {}", "✓".green(), class.iri);
                if let Some(label) = &class.label {
                    println!("  Label: {}", label);
                }
                if graph == OntologyKind::Domain {
                    println!("  Parameter category: {:?}", resolver.parameter_category(&class.iri));
                    if let Some(route) = resolver.input_route(&class.iri) {
                        println!("  Input route: {:?}", route);
                    }
                }
                let ancestors = resolver.ancestors(&class.iri, graph);
                if !ancestors.is_empty() {
                    println!("  Ancestors:");
                    for ancestor in ancestors {
                        println!("    {}", ancestor.display_name());
                    }
                }
            }
            None => {
                eprintln!("{} '{}' does not resolve in {}", "✗".red(), iri, graph);
                process::exit(1);
            }
        },

        Commands::Terms { category } => {
            let members = resolver.category_members(category);
            println!(
                "{} ({}): {} classes",
                category.label().bold(),
                resolver.anchors().iri(category),
                members.len()
            );
            for class in members {
                println!("  {:<48} {}", class.iri, class.label.as_deref().unwrap_or(""));
            }
        }
    }

    Ok(())
}

fn print_report(report: &ValidationReport) {
    println!("Validation report: {}", report.model.bold());
    println!("{}", "=".repeat(60));

    for record in &report.records {
        let level = match record.level {
            Level::Ok | Level::Info => record.level.as_str().blue(),
            Level::Warning => record.level.as_str().yellow(),
            Level::Error | Level::Critical => record.level.as_str().red(),
        };
        let code = record.code.map(|c| c.as_str()).unwrap_or("");
        match &record.element {
            Some(element) => println!("[{}] {} <{}>", level, code, element),
            None => println!("[{}] {}", level, code),
        }
        println!("    {}", record.message);
    }

    println!();
    println!(
        "{} error(s), {} warning(s), {} info",
        report.counts.error + report.counts.critical,
        report.counts.warning,
        report.counts.info
    );

    if report.valid {
        println!("{}", "✓ model annotations are valid".green());
    } else {
        println!("{} (stopped at: {:?})", "✗ model annotations are invalid".red(), report.stage);
    }
}
