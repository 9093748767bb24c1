// Entry point: renders the figures of one experiment from its run data.
mod cli;
mod logging;

use std::error::Error;
use std::path::Path;

use clap::Parser;
use tracing::{info, warn};

use cli::{Args, FigureKind};
use syncplot::config::AppConfig;
use syncplot::data::RunData;
use syncplot::plots::FigureWriter;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init_logger(args.verbose);

    let mut cfg = AppConfig::load_or_default(&args.config);
    if let Some(dir) = &args.out_dir {
        cfg.output.dir = dir.clone();
    }
    if let Some(create) = args.create_dir {
        cfg.output.create_dir = create;
    }

    let data = RunData::load(Path::new(&args.input))?;
    let graph = data.graph();
    let writer = FigureWriter::from_config(&cfg);

    let want_time_corr = match args.figure {
        FigureKind::TimeCorr => true,
        FigureKind::CorrMatDcm => false,
        FigureKind::All => data.has_time_series(),
    };
    let want_corr_mat = match args.figure {
        FigureKind::TimeCorr => false,
        FigureKind::CorrMatDcm => true,
        FigureKind::All => data.has_matrices(),
    };
    if !want_time_corr && !want_corr_mat {
        warn!(input = %args.input, "run data has neither time series nor matrices; nothing to draw");
        return Ok(());
    }

    if want_time_corr {
        writer.time_corr(&graph, &data.sol, &data.corr_vals, data.omega, &data.t)?;
    }
    if want_corr_mat {
        writer.corr_mat_dcm(&graph, &data.sum_rho_avg, &data.d_average, data.no_runs)?;
    }

    info!(dir = %writer.out_dir().display(), "done");
    Ok(())
}
