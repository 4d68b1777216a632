use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lsm_compat::{default_registry, parse_macro_bindings};
use lsm_io::{
    OutputBundle, RunConfig, RunReport, RunStatus, load_config, load_snapshot,
    write_output_bundle, write_sta,
};
use lsm_patch::{FieldStats, PatchLevel, is_ported, precision_name};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn usage() {
    eprintln!("usage:");
    eprintln!("  lsm-cli init-circle <config.json> [--out-dir <dir>]");
    eprintln!("  lsm-cli symbols [header.h]");
    eprintln!("  lsm-cli stats <snapshot.json>");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_symbols() {
    let registry = default_registry();
    println!("precision: {}", precision_name());
    for spec in registry.specs() {
        println!(
            "{}  convention={:?}  int_args={}  real_args={}  ported={}",
            spec.symbol,
            spec.convention,
            spec.int_args,
            spec.real_args,
            is_ported(&spec.symbol)
        );
    }
}

/// Checks every `#define` binding of a legacy header against the registry.
/// Returns the number of bindings without a Rust routine.
fn check_header(path: &Path) -> Result<usize, String> {
    let header = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let registry = default_registry();
    let mut missing = 0usize;
    for binding in parse_macro_bindings(&header) {
        let resolved = registry
            .spec(&binding.macro_name)
            .filter(|spec| spec.symbol == binding.linker_symbol);
        match resolved {
            Some(spec) => println!(
                "{} -> {}: registered ({} ints, {} reals)",
                binding.macro_name, spec.symbol, spec.int_args, spec.real_args
            ),
            None => {
                missing += 1;
                println!(
                    "{} -> {}: missing",
                    binding.macro_name, binding.linker_symbol
                );
            }
        }
    }
    Ok(missing)
}

/// Reloads a field snapshot and summarizes its samples.
fn snapshot_stats(path: &Path) -> Result<FieldStats, String> {
    let snapshot = load_snapshot(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let field = snapshot
        .to_patch()
        .map_err(|err| format!("{}: {err}", path.display()))?;
    info!(ghost = %field.ghost_box(), "loaded snapshot");
    FieldStats::from_values(field.as_slice().iter().copied())
        .ok_or_else(|| format!("{}: snapshot holds no samples", path.display()))
}

#[derive(Debug, PartialEq, Eq)]
struct InitCircleArgs {
    config: PathBuf,
    out_dir: Option<PathBuf>,
}

fn parse_init_circle_args(args: &[String]) -> Option<InitCircleArgs> {
    match args {
        [config] => Some(InitCircleArgs {
            config: PathBuf::from(config),
            out_dir: None,
        }),
        [config, flag, dir] if flag == "--out-dir" => Some(InitCircleArgs {
            config: PathBuf::from(config),
            out_dir: Some(PathBuf::from(dir)),
        }),
        _ => None,
    }
}

fn default_out_dir(config: &Path) -> PathBuf {
    config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn initialize(config: &RunConfig, level: &mut PatchLevel) -> Result<usize, String> {
    let circle = config.circle().map_err(|err| err.to_string())?;
    level
        .init_circle(&circle, config.fill_region)
        .map_err(|err| err.to_string())?;
    level.exchange_ghosts().map_err(|err| err.to_string())
}

fn run_init_circle(args: &InitCircleArgs) -> Result<(RunReport, OutputBundle), String> {
    let config =
        load_config(&args.config).map_err(|err| format!("{}: {err}", args.config.display()))?;
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| default_out_dir(&args.config));
    let mut level = config.build_level().map_err(|err| err.to_string())?;

    info!(job = %config.job_name, patches = level.patch_count(), "initializing level set");
    let exchanged = match initialize(&config, &mut level) {
        Ok(exchanged) => exchanged,
        Err(message) => {
            if config.output.report {
                let report =
                    RunReport::from_level(&config.job_name, &level, 0, RunStatus::Failed, &message);
                let sta = out_dir.join(format!("{}.sta", config.job_name));
                if let Err(err) = write_sta(&sta, &report) {
                    error!(error = %err, "failed to write status report");
                }
            }
            return Err(message);
        }
    };

    let field = level.gather().map_err(|err| err.to_string())?;
    let report = RunReport::from_level(
        &config.job_name,
        &level,
        exchanged,
        RunStatus::Success,
        format!("circle signed distance over {} cells", field.ghost_box().num_cells()),
    );
    let bundle = write_output_bundle(&out_dir, &report, &field, level.geometry(), &config.output)
        .map_err(|err| format!("{}: {err}", out_dir.display()))?;
    Ok((report, bundle))
}

fn print_stats(stats: &FieldStats) {
    println!("cells: {}", stats.cells);
    println!("inside_cells: {}", stats.negative_cells);
    println!("min: {:.6e}", stats.min);
    println!("max: {:.6e}", stats.max);
}

fn print_report(report: &RunReport, bundle: &OutputBundle) {
    println!("job: {}", report.job_name);
    println!("precision: {}", report.precision);
    println!("domain: {}", report.domain);
    println!("patches: {}", report.num_patches);
    println!("ghost_cells_exchanged: {}", report.ghost_cells_exchanged);
    if let Some(stats) = &report.stats {
        print_stats(stats);
    }
    for path in [&bundle.snapshot_path, &bundle.vtk_path, &bundle.sta_path]
        .into_iter()
        .flatten()
    {
        println!("wrote: {}", path.display());
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("symbols") if args.len() == 2 => {
            print_symbols();
            ExitCode::SUCCESS
        }
        Some("symbols") if args.len() == 3 => match check_header(Path::new(&args[2])) {
            Ok(0) => ExitCode::SUCCESS,
            Ok(missing) => {
                eprintln!("{missing} binding(s) have no Rust routine");
                ExitCode::from(1)
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::from(1)
            }
        },
        Some("stats") if args.len() == 3 => match snapshot_stats(Path::new(&args[2])) {
            Ok(stats) => {
                print_stats(&stats);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("{err}");
                ExitCode::from(1)
            }
        },
        Some("init-circle") => {
            let Some(parsed) = parse_init_circle_args(&args[2..]) else {
                usage();
                return ExitCode::from(2);
            };
            match run_init_circle(&parsed) {
                Ok((report, bundle)) => {
                    print_report(&report, &bundle);
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    error!("{err}");
                    eprintln!("init-circle failed: {err}");
                    ExitCode::from(1)
                }
            }
        }
        _ => {
            usage();
            ExitCode::from(2)
        }
    }
}
