use std::{env, process::ExitCode, str::FromStr};

use cpu_sched_model::{Algorithm, ScheduleResult, WorkloadConfig, simulate};
use log::{LevelFilter, Log, Metadata, Record};

struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

// Level from SCHED_LOG, e.g. SCHED_LOG=debug; defaults to warn
fn init_logging() {
    let level = env::var("SCHED_LOG")
        .ok()
        .and_then(|raw| LevelFilter::from_str(&raw).ok())
        .unwrap_or(LevelFilter::Warn);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> ExitCode {
    init_logging();

    let config = WorkloadConfig::from_env();
    let workload = match config.generate() {
        Ok(workload) => workload,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Optional single algorithm code, e.g. `srtf` or `rr:4`
    let algorithms = match env::args().nth(1) {
        Some(code) => match code.parse::<Algorithm>() {
            Ok(algorithm) => vec![algorithm],
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Algorithm::all(config.quantum).to_vec(),
    };

    println!(
        "Workload: {} processes, {} ticks of work (seed {})",
        workload.len(),
        workload.total_burst(),
        config.seed
    );

    for algorithm in algorithms {
        match simulate(&workload, algorithm) {
            Ok(result) => report(algorithm, &result),
            Err(err) => {
                eprintln!("error: {algorithm}: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn report(algorithm: Algorithm, result: &ScheduleResult) {
    println!();
    println!("== {algorithm}");

    let timeline: Vec<String> = result
        .timeline
        .iter()
        .map(|s| format!("{}[{},{})", s.job, s.start, s.stop))
        .collect();
    println!("Timeline: {}", timeline.join(" "));

    println!(
        "{:<6} {:>8} {:>6} {:>8} {:>7} {:>8} {:>8}",
        "Job", "Priority", "Arrive", "Burst", "Finish", "Turnarnd", "Waiting"
    );
    for p in &result.solved_processes {
        let priority = p.priority.map_or_else(|| "-".to_string(), |v| v.to_string());
        println!(
            "{:<6} {:>8} {:>6} {:>8} {:>7} {:>8} {:>8}",
            p.job,
            priority,
            p.arrival_time,
            p.burst_time,
            p.finish_time,
            p.turnaround_time,
            p.waiting_time
        );
    }

    println!(
        "Average turnaround time: {:.2}  Average waiting time: {:.2}  Makespan: {}",
        result.average_turnaround_time(),
        result.average_waiting_time(),
        result.makespan()
    );
}
