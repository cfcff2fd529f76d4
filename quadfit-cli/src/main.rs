use std::{
    hint::black_box,
    io::{self, Read},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use quadfit::{
    AffineTransform, Error, Point, TextualError,
    textual::{Outcome, Problem},
};

const NUM_ITERS_BENCHMARK: u32 = 100;
/// Residuals above this get highlighted.
const RESIDUAL_WARNING: f64 = 1e-6;

#[derive(Parser)]
#[command(name="quadfit", version, about, long_about = None)]
struct Cli {
    /// Path to the problem file.
    /// Use '-' for stdin.
    #[arg(short = 'f', long)]
    filepath: PathBuf,

    /// Show the residual of each correspondence and every mapped point.
    #[arg(long = "show-points")]
    show_points: bool,

    /// Print only the transform, as a JSON array `[a, b, c, d, e, f]`.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let soln = match main_inner(&cli) {
        Ok(soln) => soln,
        Err(e) => {
            use colored::Colorize;
            eprintln!("{}: {e:#}", "Error".red());
            std::process::exit(1);
        }
    };
    let soln = match soln {
        Ok(o) => o,
        Err(e) => {
            print_failure_output(e);
            std::process::exit(1);
        }
    };
    print_output(&soln, &cli);
}

type RunResult = Result<(Outcome, Duration), TextualError>;

fn main_inner(cli: &Cli) -> anyhow::Result<RunResult> {
    let problem_txt = read_problem(cli)?;
    let parsed = Problem::from_str(&problem_txt)
        .map_err(anyhow::Error::msg)
        .context("could not parse problem")?;
    log::debug!(
        "parsed {} correspondences, {} points to apply",
        parsed.correspondences.len(),
        parsed.queries.len()
    );

    // Ensure problem can be solved
    let now = std::time::Instant::now();
    let solved = match parsed.solve() {
        Ok(o) => o,
        Err(e) => return Ok(Err(e)),
    };

    // It succeeded. Benchmark its perf
    for _ in 0..NUM_ITERS_BENCHMARK {
        black_box(parsed.solve())?;
    }
    let elapsed = now.elapsed();
    let duration_per_iter = elapsed / NUM_ITERS_BENCHMARK;
    log::info!("solved {NUM_ITERS_BENCHMARK} times in {elapsed:?}");
    Ok(Ok((solved, duration_per_iter)))
}

/// Prints the output nicely to stdout.
fn print_output((outcome, duration): &(Outcome, Duration), cli: &Cli) {
    let Outcome {
        transform,
        residuals,
        mapped,
    } = outcome;
    if cli.json {
        println!("{}", json_array(transform));
        return;
    }
    print_transform(transform);
    print_max_residual(outcome.max_residual());
    print_performance(*duration);
    if cli.show_points {
        println!("Residuals:");
        for (label, r) in residuals {
            println!("\t{label}: {r:.3e}");
        }
        if !mapped.is_empty() {
            println!("Mapped points:");
            for (label, Point { x, y }) in mapped {
                println!("\t{label}: ({x:.2}, {y:.2})");
            }
        }
    }
}

fn json_array(transform: &AffineTransform) -> String {
    let parts: Vec<_> = transform.to_array().iter().map(f64::to_string).collect();
    format!("[{}]", parts.join(", "))
}

fn print_transform(t: &AffineTransform) {
    let AffineTransform { a, b, c, d, e, f } = t;
    println!("Transform: {t}");
    println!("\ta = {a:.4}, b = {b:.4}");
    println!("\tc = {c:.4}, d = {d:.4}");
    println!("\te = {e:.4}, f = {f:.4}");
}

fn print_max_residual(max: f64) {
    use colored::Colorize;
    let l = format!("{max:.3e}");
    if max > RESIDUAL_WARNING {
        println!("Max residual: {} (the target isn't an affine image of the source)", l.yellow());
    } else {
        println!("Max residual: {l}");
    }
}

fn print_performance(duration: Duration) {
    use colored::Colorize;
    let time = format!("{:.2}μs", duration.as_secs_f64() * 1e6);
    println!("Solved in {time} (mean over {NUM_ITERS_BENCHMARK} iterations)");
    // Fits are fast enough that a whole iteration can round down to 0ns.
    let solves_per_second = Duration::from_secs(1).as_nanos() / duration.as_nanos().max(1);
    let solves_per_second = if solves_per_second <= 60 {
        solves_per_second.to_string().red()
    } else {
        solves_per_second.to_string().normal()
    };
    println!("i.e. {solves_per_second} solves per second");
}

fn print_failure_output(error: TextualError) {
    use colored::Colorize;
    eprintln!("{}: {}", "Could not fit transform".red(), error);
    match error {
        TextualError::WrongNumberOfCorrespondences { found } if found < 4 => {
            eprintln!("Add more correspondences.");
        }
        TextualError::WrongNumberOfCorrespondences { .. } => {
            eprintln!("Remove some correspondences.");
        }
        TextualError::DuplicateLabel { .. } => {
            eprintln!("Every point needs its own label.");
        }
        TextualError::Fit(Error::DegenerateConfiguration) => {
            eprintln!("Make sure the source points aren't all on one line.");
        }
        TextualError::Fit(Error::Overflow) => {
            eprintln!("Try moving the source points further apart.");
        }
        TextualError::Fit(Error::NonFiniteInput | Error::Linalg(_)) => {}
    }
}

/// Read the problem text from a file or stdin, depending on user args.
/// They pass a filename, or '-' for stdin, as the first CLI arg.
fn read_problem(cli: &Cli) -> anyhow::Result<String> {
    // Read from file
    if cli.filepath != PathBuf::from("-") {
        return std::fs::read_to_string(&cli.filepath)
            .with_context(|| format!("could not read {}", cli.filepath.display()));
    }

    // Read from stdin
    let mut problem_txt = String::with_capacity(100);
    let mut stdin = io::stdin();
    stdin
        .read_to_string(&mut problem_txt)
        .context("could not read stdin")?;
    Ok(problem_txt)
}
