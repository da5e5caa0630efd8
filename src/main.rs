use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};

use sat_spectra::analyze::{cheeger_bound, spectral_immersion, SpectralOptions};
use sat_spectra::component::largest_component;
use sat_spectra::dimacs;
use sat_spectra::dot::to_dot;
use sat_spectra::encode::{EncodeOptions, Encoding};
use sat_spectra::report::{AnalysisRecord, CSV_HEADER};
use sat_spectra::solver;

#[derive(Debug, Parser)]
#[command(name = "satspectra", about = "Cheeger bounds of graph encodings of SAT instances")]
struct Cli {
    /// DIMACS CNF instances to analyze.
    #[arg(required = true)]
    instances: Vec<PathBuf>,

    /// Graph encoding: neurosat, polar_var, or var_incidence.
    #[arg(long, default_value = "polar_var")]
    encoding: Encoding,

    /// neurosat only: connect each variable's two literal vertices.
    #[arg(long)]
    connect_literals: bool,

    /// Also embed the graph in the given number of dimensions.
    #[arg(long, value_name = "DIMS")]
    embed: Option<usize>,

    /// Also report SAT/UNSAT via the external solver.
    #[arg(long)]
    solve: bool,

    /// Write a Graphviz .dot file per instance into this directory.
    #[arg(long, value_name = "DIR")]
    dot: Option<PathBuf>,

    /// Print results as CSV rows instead of human-readable text.
    #[arg(long)]
    csv: bool,

    /// Eigensolver convergence tolerance.
    #[arg(long, default_value_t = 1e-10)]
    tolerance: f64,

    /// Eigensolver iteration budget per eigenpair.
    #[arg(long, default_value_t = 10_000)]
    max_iterations: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let cli = Cli::parse();
    let options = EncodeOptions { connect_literals: cli.connect_literals };
    let spectral = SpectralOptions { tolerance: cli.tolerance, max_iterations: cli.max_iterations };

    if cli.csv {
        println!("{}", CSV_HEADER);
    }

    // failures abort only the current instance, never the batch
    for path in &cli.instances {
        if let Err(e) = run_instance(path, &cli, &options, &spectral) {
            error!("{}: {}", path.display(), e);
        }
    }

    Ok(())
}

fn run_instance(
    path: &Path,
    cli: &Cli,
    options: &EncodeOptions,
    spectral: &SpectralOptions,
) -> color_eyre::Result<()> {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let cnf = dimacs::read_file(path)?;
    info!("{}: {} variables, {} clauses", name, cnf.num_vars(), cnf.num_clauses());

    let graph = cli.encoding.encode(&cnf, options);
    let reduction = largest_component(&graph);

    if let Some(dir) = &cli.dot {
        std::fs::create_dir_all(dir)?;
        let dot_file = dir.join(&name).with_extension("dot");
        std::fs::write(&dot_file, to_dot(&reduction.graph)?)?;
        info!("DOT in {:?}", dot_file);
    }

    let bound = cheeger_bound(&reduction.graph, spectral)?;
    if cli.csv {
        println!("{}", AnalysisRecord::new(name.clone(), cli.encoding, bound));
    } else {
        println!("{} [{}]: {} <= h_G <= {}", name, cli.encoding, bound.lower, bound.upper);
    }

    if let Some(dims) = cli.embed {
        let coords = spectral_immersion(&reduction.graph, dims, true, spectral)?;
        for (v, point) in coords {
            println!("  {} -> {:?}", v.index(), point);
        }
    }

    if cli.solve {
        let verdict = if solver::solve(&cnf)? { "SAT" } else { "UNSAT" };
        println!("  {}", verdict);
    }

    Ok(())
}
