use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use physarum_core::config::SimConfig;
use physarum_core::world::World;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

const WARMUP_STEPS: usize = 10;
const BENCHMARK_STEPS: usize = 200;
const TARGET_SPS: f64 = 60.0;

#[derive(Parser)]
#[command(name = "physarum")]
#[command(about = "Slime-mold trail simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single simulation from a config file
    Run {
        /// Path to config file (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Output directory for results (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of simulation steps to run
        #[arg(long, default_value_t = 10_000)]
        steps: usize,

        /// Metrics sampling interval in steps
        #[arg(long, default_value_t = 100)]
        sample_every: usize,
    },
    /// Run the performance benchmark suite
    Benchmark,
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn run_benchmark(num_agents: usize, seed: u64) -> Result<()> {
    let config = SimConfig {
        num_agents,
        seed,
        ..SimConfig::default()
    };
    config
        .validate()
        .context("benchmark config validation error")?;

    let mut world = World::new(config).context("failed to initialize world")?;

    // Warmup
    for _ in 0..WARMUP_STEPS {
        world.step();
    }

    let mut total_sense = 0u64;
    let mut total_move = 0u64;
    let mut total_deposit = 0u64;
    let mut total_diffuse = 0u64;
    let mut total_time = 0u64;

    for _ in 0..BENCHMARK_STEPS {
        let timings = world.step();
        total_sense += timings.sense_us;
        total_move += timings.move_us;
        total_deposit += timings.deposit_us;
        total_diffuse += timings.diffuse_us;
        total_time += timings.total_us;
    }

    let avg_step_us = total_time as f64 / BENCHMARK_STEPS as f64;
    let steps_per_sec = 1_000_000.0 / avg_step_us;

    println!("--- {num_agents} agents ---");
    println!("  Avg step:      {avg_step_us:.0} us ({steps_per_sec:.1} steps/sec)");
    println!(
        "  Breakdown:     sense={:.0} us, move={:.0} us, deposit={:.0} us, diffuse={:.0} us",
        total_sense as f64 / BENCHMARK_STEPS as f64,
        total_move as f64 / BENCHMARK_STEPS as f64,
        total_deposit as f64 / BENCHMARK_STEPS as f64,
        total_diffuse as f64 / BENCHMARK_STEPS as f64,
    );

    let verdict = if steps_per_sec >= TARGET_SPS {
        "GO"
    } else {
        "NO-GO"
    };
    println!("  Verdict:       {verdict} (target: >={TARGET_SPS} steps/sec)");
    let ratios = world.stats().ratios();
    println!(
        "  Decisions:     straight={:.2} left={:.2} right={:.2} indecisive={:.2}",
        ratios.straight, ratios.left, ratios.right, ratios.indecisive
    );
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Benchmark => {
            if cfg!(debug_assertions) {
                eprintln!("WARNING: running in debug mode. Results are not representative.");
                eprintln!("         Use: cargo run -p physarum-cli --release -- benchmark");
                eprintln!();
            }
            println!("=== Slime-Mold Simulation Benchmark ===");
            println!("Warmup: {WARMUP_STEPS} steps, Benchmark: {BENCHMARK_STEPS} steps");
            println!("Target: >={TARGET_SPS} steps/sec");
            println!();

            for num_agents in [500, 2_000, 10_000, 50_000] {
                run_benchmark(num_agents, 42)?;
            }
        }
        Commands::Run {
            config,
            out,
            steps,
            sample_every,
        } => {
            let file = File::open(&config).context("failed to open config file")?;
            let reader = BufReader::new(file);
            let sim_config: SimConfig =
                serde_json::from_reader(reader).context("failed to parse config")?;

            sim_config.validate().context("config validation error")?;

            println!("Loaded config from {:?}", config);
            println!("Simulating for {} steps...", steps);

            let show_debug = sim_config.show_debug;
            let mut world = World::new(sim_config).context("failed to initialize world")?;

            let summary = world
                .try_run_experiment(steps, sample_every)
                .context("experiment failed")?;

            if show_debug {
                for sample in &summary.samples {
                    eprintln!(
                        "step {:>8}: trail mean={:.4} max={:.4} indecisive={:.2}",
                        sample.step, sample.trail_mean, sample.trail_max, sample.indecisive_ratio
                    );
                }
            }

            if let Some(out_dir) = out {
                std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
                let summary_path = out_dir.join("summary.json");
                let file = File::create(summary_path).context("failed to create summary file")?;
                serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
                println!("Run complete. Results saved to {:?}", out_dir);
            } else {
                println!(
                    "Run complete. Decisions recorded: {}",
                    summary.final_decision_total
                );
            }
        }
    }
    Ok(())
}
