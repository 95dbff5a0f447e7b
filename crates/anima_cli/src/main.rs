use anima_core::event::{CycleInput, RawEvent, Strategy};
use anima_core::{EngineConfig, StimulusDeltas};
use anima_engine::Engine;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Affective state engine driver", long_about = None)]
struct Args {
    /// Path to the state file (default: <data dir>/anima/state.json)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Path to the engine config TOML
    #[arg(short, long, default_value = "anima.toml")]
    config: PathBuf,

    /// Override the jitter seed
    #[arg(long, env = "ANIMA_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive session (the default)
    Repl,
    /// Stress-run the engine and report internal ranges
    Probe {
        /// How many cycles to simulate
        #[arg(long, default_value_t = 200)]
        steps: usize,
        /// Baseline stimulus level
        #[arg(long, default_value_t = 0.5)]
        center: f64,
        /// Random spread around the baseline
        #[arg(long, default_value_t = 0.18)]
        spread: f64,
    },
}

fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("anima")
        .join("state.json")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let state_path = args.state.clone().unwrap_or_else(default_state_path);

    let mut config = EngineConfig::load_or_default(&args.config);
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let snapshot = anima_store::load_or_default(&state_path);
    let engine = Engine::restore(config.clone(), snapshot)?;
    info!("engine online at cycle {}", engine.cycles());

    match args.command.unwrap_or(Command::Repl) {
        Command::Repl => repl(engine, config, &state_path),
        Command::Probe {
            steps,
            center,
            spread,
        } => {
            probe(engine, steps, center, spread);
            Ok(())
        }
    }
}

fn repl(
    mut engine: Engine,
    config: EngineConfig,
    state_path: &std::path::Path,
) -> anyhow::Result<()> {
    println!("Anima online. Empty line = idle cycle, '#help' for commands, 'quit' to exit.");

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();

        if line == "quit" || line == "exit" {
            break;
        }

        if let Some(command) = line.strip_prefix('#') {
            handle_command(&mut engine, &config, state_path, command)?;
            continue;
        }

        let cycle_input = if line.is_empty() {
            None
        } else {
            Some(CycleInput::Text(line.to_string()))
        };

        let out = engine.step(cycle_input);
        println!(
            "[cycle {}] mood={:.3} threat={:.2} tension={:.2} gate={}",
            out.cycle,
            out.mood,
            out.threat_level,
            out.belief_tension,
            if out.pressure.output_gate > 0.0 { "open" } else { "closed" },
        );
        if out.pressure.output_gate > 0.0 {
            println!("{}", engine.reflection());
        }
    }

    anima_store::save(state_path, &engine.snapshot())?;
    println!("state saved.");
    Ok(())
}

fn handle_command(
    engine: &mut Engine,
    config: &EngineConfig,
    state_path: &std::path::Path,
    command: &str,
) -> anyhow::Result<()> {
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("help") => {
            println!("  #state                 show the full state");
            println!("  #threat <actor> <i>    inject a threat event");
            println!("  #nudge <delta>         push every affect dimension by <delta>");
            println!("  #strategy <name>       record the host strategy");
            println!("  #reset <affect|threat|actors|tension>");
            println!("  #save / #load          persist or reload the snapshot");
        }
        Some("state") => {
            let snap = engine.snapshot();
            println!("{}", engine.affect().describe());
            println!(
                "  mood={:.3}  mem={:.3} react={:.3} tol={:.2} sens={:.2}",
                snap.mood,
                snap.clamp.memory_factor,
                snap.clamp.reaction_strength,
                snap.clamp.clamp_tolerance,
                snap.clamp.clamp_sensitivity,
            );
            println!(
                "  threat={:.2} actors={}  tension={:.2} contradictions={}",
                snap.threat.threat_level,
                serde_json::to_string(&snap.threat.actors)?,
                snap.tension.belief_tension,
                snap.tension.contradictions,
            );
            println!(
                "  mirror[{}]: {} ({:.2})",
                snap.mirror.window.len(),
                snap.mirror.summary,
                snap.mirror.coefficient,
            );
        }
        Some("threat") => {
            let actor = parts.next().unwrap_or("unknown");
            let intensity: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1.0);
            let out = engine.step(Some(CycleInput::Event(RawEvent::threat(actor, intensity))));
            println!(
                "[cycle {}] threat level now {:.2}",
                out.cycle, out.threat_level
            );
        }
        Some("nudge") => {
            let delta: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0.1);
            engine.apply_stimulus(&StimulusDeltas::uniform(delta));
            println!("{}", engine.affect().describe());
        }
        Some("strategy") => match parts.next().and_then(Strategy::parse) {
            Some(s) => {
                engine.set_strategy(s);
                println!("strategy recorded: {}", s.as_str());
            }
            None => println!("unknown strategy (reflect|idle|stabilize|explore|express)"),
        },
        Some("reset") => match parts.next() {
            Some("affect") => {
                engine.reset_affect();
                println!("affect reset.");
            }
            Some("threat") => {
                engine.reset_threat();
                println!("threat level reset (actor history kept).");
            }
            Some("actors") => {
                engine.reset_threat_actors();
                println!("actor history cleared.");
            }
            Some("tension") => {
                engine.reset_tension();
                println!("belief tension reset.");
            }
            _ => println!("reset what? (affect|threat|actors|tension)"),
        },
        Some("save") => {
            anima_store::save(state_path, &engine.snapshot())?;
            println!("state saved to {}", state_path.display());
        }
        Some("load") => {
            let snapshot = anima_store::load_or_default(state_path);
            *engine = Engine::restore(config.clone(), snapshot)?;
            println!("state reloaded (cycle {}).", engine.cycles());
        }
        _ => println!("unknown command, try #help"),
    }
    Ok(())
}

/// Long stress run: push noisy scalar stimuli through the full cycle and
/// report the observed ranges of the internal knobs.
fn probe(mut engine: Engine, steps: usize, center: f64, spread: f64) {
    let mut noise = oscillator();

    let mut mood_range = Range::new();
    let mut mem_range = Range::new();
    let mut react_range = Range::new();
    let mut coeff_range = Range::new();

    for i in 1..=steps {
        let stim = (center + noise() * spread).clamp(0.0, 1.0);
        let out = engine.step(Some(CycleInput::Stimulus(stim)));

        let params = engine.clamp_params();
        mood_range.push(out.mood);
        mem_range.push(params.memory_factor);
        react_range.push(params.reaction_strength);
        coeff_range.push(out.mirror.coefficient);

        if i == 1 || i % 25 == 0 {
            println!(
                "[#{:04}] stim={:.3} mood={:.3} mc={:.2} mem={:.3} react={:.3}",
                i, stim, out.mood, out.mirror.coefficient, params.memory_factor,
                params.reaction_strength,
            );
        }
    }

    println!("--- probe ranges over {steps} cycles ---");
    println!("  mood        {}", mood_range);
    println!("  memory      {}", mem_range);
    println!("  reaction    {}", react_range);
    println!("  mirror      {}", coeff_range);
}

/// Deterministic pseudo-noise in [-1, 1] for probe stimuli; the engine's own
/// jitter already carries the configured seed.
fn oscillator() -> impl FnMut() -> f64 {
    let mut t: f64 = 0.0;
    move || {
        t += 1.0;
        (t * 0.7).sin() * 0.6 + (t * 0.23).sin() * 0.4
    }
}

struct Range {
    min: f64,
    max: f64,
}

impl Range {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn push(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min.is_finite() {
            write!(f, "[{:.3}, {:.3}]", self.min, self.max)
        } else {
            write!(f, "[empty]")
        }
    }
}
