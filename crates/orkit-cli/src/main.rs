use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use orkit_solver::{
    FlowProblem, FlowTermination, GraphicalProblem, GraphicalSolver, LpOutcome, MaxFlowSolver,
    SearchStrategy, TransportationProblem, TransportationSolver,
};

#[derive(Parser)]
#[command(name = "orkit")]
#[command(about = "Graphical LP, maximum flow and transportation solvers", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a two-variable LP by the graphical method
    Graphical {
        /// JSON file with `objective` and `constraints`
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
        /// Print boundary and region samples as well
        #[arg(long)]
        samples: bool,
    },
    /// Compute the maximum flow of a network
    MaxFlow {
        /// JSON file with `nodes` and `edges`
        file: PathBuf,
        /// Augmenting-path search
        #[arg(short, long, value_enum, default_value_t = Strategy::FordFulkerson)]
        strategy: Strategy,
        /// Maximum number of augmentations
        #[arg(long, default_value_t = 10)]
        max_iterations: usize,
        /// Source node label
        #[arg(long, default_value = "S")]
        source: String,
        /// Sink node label
        #[arg(long, default_value = "T")]
        sink: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
    /// Allocate a transportation problem by the northwest-corner method
    Transport {
        /// JSON file with `supply`, `demand` and `costs`
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    FordFulkerson,
    EdmondsKarp,
}

impl From<Strategy> for SearchStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::FordFulkerson => SearchStrategy::FordFulkerson,
            Strategy::EdmondsKarp => SearchStrategy::EdmondsKarp,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Graphical { file, format, samples } => {
            let problem: GraphicalProblem = load(&file);
            let solution = match GraphicalSolver::new().solve(&problem) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Invalid problem: {}", e);
                    std::process::exit(1);
                }
            };

            if format == Format::Json {
                print_json(&solution);
            } else {
                let [c1, c2] = problem.objective.coefficients;
                println!("Z = {}x1 + {}x2 ({:?})", c1, c2, problem.objective.sense);
                println!("Subject to {} constraints", problem.num_constraints());
                println!();
                println!("Vertices:");
                for (i, e) in solution.evaluations.iter().enumerate() {
                    let marker = if e.optimal { " *" } else { "" };
                    println!(
                        "  V{:<3} x1 = {:10.2}  x2 = {:10.2}  Z = {:10.2}{}",
                        i + 1,
                        e.point.x,
                        e.point.y,
                        e.value,
                        marker
                    );
                }
                println!();

                if samples {
                    println!("Window: [0, {:.2}] x [0, {:.2}]", solution.max_x, solution.max_y);
                    for line in &solution.boundary_lines {
                        println!("  constraint {}: {} boundary samples", line.constraint + 1, line.points.len());
                    }
                    println!("  feasible region: {} grid samples", solution.feasible_region.len());
                    println!();
                }

                println!("Steps:");
                for step in &solution.steps {
                    println!("  {}", step);
                }
                println!();
            }

            if format == Format::Pretty {
                match solution.outcome {
                    LpOutcome::Optimal { point, value } => {
                        println!("Status: OPTIMAL");
                        println!("x1 = {:.4}, x2 = {:.4}, Z = {:.4}", point.x, point.y, value);
                    }
                    LpOutcome::Infeasible => {
                        println!("Status: INFEASIBLE");
                        println!("No point satisfies all constraints.");
                    }
                    LpOutcome::Unbounded { .. } => {
                        println!("Status: UNBOUNDED");
                        println!("The problem has no finite optimal solution.");
                    }
                }
            }
            if !solution.is_optimal() {
                std::process::exit(1);
            }
        }
        Commands::MaxFlow {
            file,
            strategy,
            max_iterations,
            source,
            sink,
            format,
        } => {
            let problem: FlowProblem = load(&file);
            let solver = MaxFlowSolver::new()
                .with_strategy(strategy.into())
                .with_max_iterations(max_iterations)
                .with_terminals(source, sink);
            let solution = match solver.solve(&problem) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Invalid network: {}", e);
                    std::process::exit(1);
                }
            };

            if format == Format::Json {
                print_json(&solution);
            } else {
                println!("Augmenting paths:");
                for (i, path) in solution.paths.iter().enumerate() {
                    println!("  {:3}. {:30} flow {}", i + 1, path.nodes.join(" -> "), path.flow);
                }
                println!();

                println!("Edge flows:");
                for e in &solution.edge_flows {
                    println!("  {:>8} -> {:<8} {:10} / {}", e.from, e.to, e.flow, e.capacity);
                }
                println!();

                if let Some(cut) = &solution.min_cut {
                    println!("Minimum cut: {{{}}} (capacity {})", cut.source_side.join(", "), cut.capacity);
                    println!();
                }

                println!("Maximum flow: {}", solution.max_flow);
            }

            if solution.termination == FlowTermination::IterationCapReached {
                eprintln!(
                    "Warning: stopped after {} augmentations; the flow may not be maximum",
                    max_iterations
                );
                std::process::exit(1);
            }
        }
        Commands::Transport { file, format } => {
            let problem: TransportationProblem = load(&file);
            let solution = match TransportationSolver::new().solve(&problem) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Invalid problem: {}", e);
                    std::process::exit(1);
                }
            };

            if format == Format::Json {
                print_json(&solution);
            } else {
                println!("Allocation:");
                print!("  {:>8}", "");
                for j in 0..problem.demand.len() {
                    print!(" {:>10}", format!("D{}", j + 1));
                }
                println!(" {:>10}", "Supply");
                for (i, row) in solution.allocation.iter().enumerate() {
                    print!("  {:>8}", format!("S{}", i + 1));
                    for quantity in row {
                        print!(" {:10.2}", quantity);
                    }
                    println!(" {:10.2}", problem.supply[i]);
                }
                print!("  {:>8}", "Demand");
                for demand in &problem.demand {
                    print!(" {:10.2}", demand);
                }
                println!();
                println!();
                println!("Total cost: {:.2}", solution.total_cost);
            }
        }
    }
}

fn load<T: DeserializeOwned>(file: &Path) -> T {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };
    debug!("read {} bytes from {}", source.len(), file.display());

    match serde_json::from_str(&source) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            std::process::exit(1);
        }
    }
}
