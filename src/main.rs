use clap::{Parser, Subcommand};
use lingua_gen::{config, generate, languages, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "lingua-gen")]
#[command(about = "Multi-language static site generator")]
#[command(long_about = "\
Multi-language static site generator

Renders every template once per configured language, substituting that
language's vocabulary, and writes each result under a language-scoped
output directory. Assets on the copy list pass through byte-for-byte.

Layout:

  site/                            # template_directory
  ├── index.html                   # Rendered once per language
  ├── css/main.css                 # copy_cleanly → copied verbatim
  ├── js/                          # excluded → a separate step minifies it
  └── subtemplates/header.tmpl     # pulled in via include(), excluded itself
  vocabs/                          # vocab_directory
  ├── english.json                 # flat key → string dictionaries
  └── mundo.json
  dist/                            # output_directory
  ├── english/...
  └── mundo/...

Vocabulary values may use inline markup: {B}bold{/B}, {P}paragraph{/P},
{URL=href}label{/URL}.

Run 'lingua-gen gen-config' to print a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Show per-file detail (excluded sources, etc.)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every language × file pair and write the output tree
    Build,
    /// Resolve languages and discover files without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.config)?;
            let report = generate::generate(&site_config)?;
            output::print_report(&report, cli.verbose);
            if report.failed() > 0 {
                std::process::exit(1);
            }
        }
        Command::Check => {
            let site_config = config::load_config(&cli.config)?;
            for warning in site_config.validate() {
                println!("warning: {warning}");
            }
            let resolved =
                languages::resolve(&site_config.vocabs, &site_config.vocab_directory)?;
            let discovery = scan::discover(&site_config)?;
            for warning in &discovery.warnings {
                println!("warning: {warning}");
            }
            output::print_check_output(&resolved, &discovery);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
