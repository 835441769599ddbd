use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use kira_seqfetch::app::{App, PrideOptions};
use kira_seqfetch::config::{ConfigLoader, ConfigOverrides};
use kira_seqfetch::domain::PrideAccession;
use kira_seqfetch::error::SeqFetchError;
use kira_seqfetch::output::{ConsoleOutput, JsonOutput, OutputMode};
use kira_seqfetch::pride::PrideHttpClient;
use kira_seqfetch::proteins::ProteinsHttpClient;

#[derive(Parser)]
#[command(name = "kira-seqfetch")]
#[command(about = "Query the EBI Proteins API and retrieve sequences as FASTA")]
#[command(version)]
struct Cli {
    #[arg(long, global = true)]
    non_interactive: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch protein sequences by species and gene names, or by accession")]
    Proteins(ProteinsArgs),
    #[command(about = "List and download raw files of a PRIDE project")]
    Pride(PrideArgs),
}

#[derive(Args)]
struct ProteinsArgs {
    #[arg(short, long, help = "File listing species in separate lines")]
    species: Option<Utf8PathBuf>,

    #[arg(long, help = "Maximum species in API request [default: 20]")]
    max_species: Option<usize>,

    #[arg(short, long, help = "File listing gene names in separate lines")]
    genes: Option<Utf8PathBuf>,

    #[arg(long, help = "Maximum genes in API request [default: 20]")]
    max_genes: Option<usize>,

    #[arg(short, long, help = "File listing protein accessions in separate lines")]
    accessions: Option<Utf8PathBuf>,

    #[arg(long, help = "Maximum accessions in API request [default: 100]")]
    max_accessions: Option<usize>,

    #[arg(short, long, help = "Output FASTA file [default: uniprot_seqs.fasta]")]
    output: Option<Utf8PathBuf>,

    #[arg(long, help = "Case-insensitive pattern; matching species/gene records are dropped")]
    exclude: Option<String>,

    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, help = "JSON config file [default: kira-seqfetch.json if present]")]
    config: Option<String>,
}

#[derive(Args)]
struct PrideArgs {
    accession: String,

    #[arg(long, default_value = ".")]
    output_dir: Utf8PathBuf,

    #[arg(long, help = "Also download blank and wash runs")]
    include_blanks: bool,

    #[arg(long, help = "List files without downloading")]
    list: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<SeqFetchError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SeqFetchError) -> u8 {
    match error {
        SeqFetchError::MissingInput | SeqFetchError::SpeciesNotFound(_) => 2,
        SeqFetchError::ProteinsHttp(_)
        | SeqFetchError::ProteinsStatus { .. }
        | SeqFetchError::PrideHttp(_)
        | SeqFetchError::PrideStatus { .. }
        | SeqFetchError::MissingDownloadLocation(_)
        | SeqFetchError::UnsafeFileName(_)
        | SeqFetchError::FastaParse(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.non_interactive {
        OutputMode::NonInteractive
    } else {
        OutputMode::Interactive
    };

    match cli.command {
        Commands::Proteins(args) => run_proteins(args, output_mode),
        Commands::Pride(args) => run_pride(args, output_mode),
    }
}

fn run_proteins(args: ProteinsArgs, output_mode: OutputMode) -> miette::Result<()> {
    let overrides = ConfigOverrides {
        species: args.species,
        genes: args.genes,
        accessions: args.accessions,
        max_species: args.max_species,
        max_genes: args.max_genes,
        max_accessions: args.max_accessions,
        output: args.output,
        exclude_pattern: args.exclude,
        base_url: args.base_url,
    };
    let config = ConfigLoader::resolve(args.config.as_deref(), overrides)?;
    let proteins = ProteinsHttpClient::with_base_url(&config.base_url)?;
    let pride = PrideHttpClient::new()?;
    let app = App::new(proteins, pride);

    match output_mode {
        OutputMode::NonInteractive => {
            let result = app.fetch(&config, &JsonOutput)?;
            JsonOutput::print_fetch(&result).into_diagnostic()?;
        }
        OutputMode::Interactive => {
            let result = app.fetch(&config, &ConsoleOutput)?;
            ConsoleOutput::print_fetch(&result);
        }
    }
    Ok(())
}

fn run_pride(args: PrideArgs, output_mode: OutputMode) -> miette::Result<()> {
    let accession: PrideAccession = args.accession.parse()?;
    let proteins = ProteinsHttpClient::new()?;
    let pride = PrideHttpClient::new()?;
    let app = App::new(proteins, pride);
    let options = PrideOptions {
        output_dir: args.output_dir,
        include_blanks: args.include_blanks,
        list_only: args.list,
    };

    match output_mode {
        OutputMode::NonInteractive => {
            let result = app.pride(&accession, &options, &JsonOutput)?;
            JsonOutput::print_pride(&result).into_diagnostic()?;
        }
        OutputMode::Interactive => {
            let result = app.pride(&accession, &options, &ConsoleOutput)?;
            ConsoleOutput::print_pride(&result);
        }
    }
    Ok(())
}
