// src/bin/explore.rs
//
// Random-action exploration harness.
//
// Runs seeded random episodes against the graph-construction environment and
// reports per-episode scores. When a witness construction turns up, its
// decision vector and edge list are printed and the harness stops (unless
// --keep-going); halting there is this harness's decision, the environment
// itself only reports success.
//
// Run examples:
//   cargo run --bin explore -- --vertices 10 --episodes 1000 --seed 1
//   cargo run --bin explore -- --vertices 17 --episodes 100000 --quiet --jsonl steps.jsonl

use std::env;
use std::path::PathBuf;

use graphgym::{
    run_episode, EpisodeConfig, GraphEnv, JsonlSink, NoopSink, RandomPolicy, TerminationReason,
};

const DEFAULT_VERTICES: usize = 10;
const DEFAULT_EPISODES: u64 = 1000;
const DEFAULT_SEED: u64 = 1;
const DEFAULT_PRINT_EVERY: u64 = 1;

#[derive(Debug, Clone)]
struct Args {
    vertices: usize,
    episodes: u64,
    seed: u64,
    print_every: u64,
    quiet: bool,
    keep_going: bool,
    jsonl_out: Option<PathBuf>,
}

impl Args {
    fn usage() -> &'static str {
        "\
graphgym random exploration harness

USAGE:
  cargo run --bin explore -- [FLAGS]

FLAGS:
  --vertices N         Number of graph vertices (default: 10, minimum: 2)
  --episodes N         Number of episodes to run (default: 1000)
  --seed U64           Base seed (default: 1). Episode i uses seed + i.
  --print-every N      Print every N episodes (default: 1). Ignored with --quiet.
  --jsonl PATH         Write per-step JSONL records to PATH
  --keep-going         Do not stop at the first witness construction
  --quiet              Suppress per-episode lines; only print the final summary
  --help               Show this help

EXAMPLES:
  cargo run --bin explore -- --vertices 10 --episodes 5000 --seed 42
  cargo run --bin explore -- --vertices 17 --episodes 100000 --quiet --jsonl steps.jsonl
"
    }

    fn parse_or_exit() -> Self {
        match Self::parse() {
            Ok(a) => a,
            Err(e) => {
                eprintln!("{e}\n\n{}", Self::usage());
                std::process::exit(2);
            }
        }
    }

    fn parse() -> Result<Self, String> {
        let mut out = Args {
            vertices: DEFAULT_VERTICES,
            episodes: DEFAULT_EPISODES,
            seed: DEFAULT_SEED,
            print_every: DEFAULT_PRINT_EVERY,
            quiet: false,
            keep_going: false,
            jsonl_out: None,
        };

        let mut it = env::args().skip(1);

        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{}", Self::usage());
                    std::process::exit(0);
                }
                "--quiet" => out.quiet = true,
                "--keep-going" => out.keep_going = true,

                "--vertices" => {
                    let v = it
                        .next()
                        .ok_or_else(|| "Missing value for --vertices".to_string())?;
                    out.vertices = v
                        .parse::<usize>()
                        .map_err(|_| "Invalid --vertices (expected integer)".to_string())?;
                    if out.vertices < 2 {
                        return Err("--vertices must be >= 2".to_string());
                    }
                }
                "--episodes" => {
                    let v = it
                        .next()
                        .ok_or_else(|| "Missing value for --episodes".to_string())?;
                    out.episodes = v
                        .parse::<u64>()
                        .map_err(|_| "Invalid --episodes (expected integer)".to_string())?;
                    if out.episodes == 0 {
                        return Err("--episodes must be >= 1".to_string());
                    }
                }
                "--seed" => {
                    let v = it
                        .next()
                        .ok_or_else(|| "Missing value for --seed".to_string())?;
                    out.seed = v
                        .parse::<u64>()
                        .map_err(|_| "Invalid --seed (expected u64)".to_string())?;
                }
                "--print-every" => {
                    let v = it
                        .next()
                        .ok_or_else(|| "Missing value for --print-every".to_string())?;
                    out.print_every = v
                        .parse::<u64>()
                        .map_err(|_| "Invalid --print-every (expected integer)".to_string())?;
                    if out.print_every == 0 {
                        return Err("--print-every must be >= 1".to_string());
                    }
                }
                "--jsonl" => {
                    let v = it
                        .next()
                        .ok_or_else(|| "Missing value for --jsonl".to_string())?;
                    out.jsonl_out = Some(PathBuf::from(v));
                }
                other => return Err(format!("Unknown flag: {other}")),
            }
        }

        Ok(out)
    }
}

fn main() {
    let args = Args::parse_or_exit();

    let mut env = match GraphEnv::new(args.vertices) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Failed to create environment: {e}");
            std::process::exit(2);
        }
    };

    let mut jsonl: Option<JsonlSink> = match args.jsonl_out.as_ref() {
        Some(path) => match JsonlSink::create(path) {
            Ok(sink) => Some(sink),
            Err(e) => {
                eprintln!("Failed to create JSONL output {path:?}: {e}");
                std::process::exit(2);
            }
        },
        None => None,
    };

    println!(
        "explore: vertices={} decisions={} rule={} episodes={} seed={}",
        env.vertices(),
        env.decision_count(),
        env.rule_name(),
        args.episodes,
        args.seed
    );

    let mut witnesses = 0u64;
    let mut best_final_reward = f64::NEG_INFINITY;

    for episode in 0..args.episodes {
        let mut policy = RandomPolicy::seeded(args.seed.wrapping_add(episode));
        let config = EpisodeConfig::default().with_episode_id(episode);

        let summary = {
            let result = match jsonl.as_mut() {
                Some(sink) => run_episode(&mut env, &mut policy, &config, sink),
                None => run_episode(&mut env, &mut policy, &config, &mut NoopSink),
            };
            match result {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Episode {episode} failed: {e}");
                    std::process::exit(1);
                }
            }
        };

        if summary.final_reward > best_final_reward {
            best_final_reward = summary.final_reward;
        }

        if !args.quiet && episode % args.print_every == 0 {
            println!(
                "episode {:>7}  steps {:>4}  score {:>12.1}  final {:>10.1}",
                episode, summary.steps, summary.total_reward, summary.final_reward
            );
        }

        if summary.termination == Some(TerminationReason::WitnessFound) {
            witnesses += 1;
            if let Some(decisions) = summary.witness.as_ref() {
                let graph = env.graph();
                println!("witness found in episode {episode}:");
                println!("  decisions: {decisions:?}");
                println!("  edges:     {:?}", graph.edges());
                println!(
                    "  vertices={} edges={} reward={}",
                    graph.vertex_count(),
                    graph.edge_count(),
                    summary.final_reward
                );
            }
            if !args.keep_going {
                break;
            }
        }
    }

    if let Some(sink) = jsonl.as_mut() {
        if let Err(e) = sink.flush() {
            eprintln!("Failed to flush JSONL output: {e}");
        }
    }

    println!(
        "done: witnesses={} best_final_reward={:.1}",
        witnesses, best_final_reward
    );
}
