use clap::Parser;

use bnet_rs::analysis::{Aggregation, AnalysisConfig, CutAnalysis};
use bnet_rs::codec::Convention;
use bnet_rs::error::OracleError;
use bnet_rs::network::{Network, NodeConfig};
use bnet_rs::oracle::{InformationOracle, OracleQuery};
use bnet_rs::state::StateConfig;
use bnet_rs::subsystem::Subsystem;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Nodes that are on in the initial state.
    #[arg(value_name = "LABEL", default_values_t = ["A".to_string()])]
    on: Vec<String>,

    /// Number of update steps to print.
    #[clap(long, value_name = "INT", default_value = "4")]
    steps: usize,

    /// Print the transition table high-order-first.
    #[clap(long)]
    high_first: bool,

    /// Use cumulative aggregation instead of per-candidate.
    #[clap(long)]
    cumulative: bool,
}

/// Stand-in oracle: a mechanism integrates as much as its weakest side,
/// counting surviving causes and effects inside the evaluated nodes.
struct FanOracle;

impl InformationOracle for FanOracle {
    fn phi(&self, query: &OracleQuery<'_>) -> Result<f64, OracleError> {
        let cm = query.cut_connectivity();
        let m = query.mechanism[0];
        let fan_in = query.nodes.iter().filter(|&&i| cm.get(i, m)).count();
        let fan_out = query.nodes.iter().filter(|&&j| cm.get(m, j)).count();
        Ok(fan_in.min(fan_out) as f64)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let net = Network::build([
        NodeConfig::new("A", "OR", ["B", "C"]),
        NodeConfig::new("B", "AND", ["A", "C"]),
        NodeConfig::new("C", "XOR", ["A", "B"]),
    ])?;
    println!("net = {:?}", net);

    let sub = Subsystem::from_config(net, &StateConfig::on(args.on.iter().map(String::as_str)))?;
    println!("state = {}", sub.state());

    let convention = if args.high_first {
        Convention::HighFirst
    } else {
        Convention::LowFirst
    };
    println!("\nTPM ({}):\n{}", convention, sub.tpm(convention));
    println!("Connectivity:\n{}", sub.connectivity_matrix());

    let mut state = sub.state().clone();
    for t in 1..=args.steps {
        state = sub.network().update(&state)?;
        println!("t = {}: {}", t, state);
    }

    println!();
    for label in sub.labels() {
        let blanket = sub.markov_blanket(label)?;
        let hood = sub.neighborhood(label)?;
        println!(
            "{}: neighborhood = {:?}, blanket = {:?}",
            label,
            hood.labels().collect::<Vec<_>>(),
            blanket.labels().collect::<Vec<_>>()
        );
    }

    let aggregation = if args.cumulative {
        Aggregation::Cumulative
    } else {
        Aggregation::PerCandidate
    };
    let config = AnalysisConfig::default().with_aggregation(aggregation);
    let analysis = CutAnalysis::with_config(&sub, FanOracle, config);

    println!();
    for (label, phi) in analysis.first_order_phis()? {
        println!("phi({}) = {}", label, phi);
    }
    for report in analysis.cut_reports()? {
        println!("cut {}: destroys {}", report.target, report.total_destroyed);
        for effect in report.affected() {
            println!(
                "  {}: uncut = {}, out = {}, in = {}",
                effect.node, effect.phi_uncut, effect.phi_out, effect.phi_in
            );
        }
    }
    match analysis.minimum_cut()? {
        Some(mip) => println!("\nminimum cut: {} ({})", mip.node, mip.total_destroyed),
        None => println!("\nminimum cut: none"),
    }

    Ok(())
}
