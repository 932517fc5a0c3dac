// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate newton;

use clap::{App, AppSettings, Arg, ArgMatches};
use std::str::FromStr;

use newton::bench::{measure, millis, speedups, Measurement};
use newton::error::cause_chain;
use newton::ppm::write_ppm;
use newton::scheduler::{Job, Strategy};
use newton::{RootSet, Settings, Viewport};

const ROOTS: &str = "n";
const USAGE: &str = "USAGE: newton [--n=<value>]";

fn validate_positive(s: &str) -> Result<(), String> {
    match usize::from_str(s) {
        Ok(n) if n >= 1 => Ok(()),
        Ok(_) => Err("the number of roots must be at least 1".to_string()),
        Err(_) => Err("could not parse the number of roots".to_string()),
    }
}

fn args<'a>() -> clap::Result<ArgMatches<'a>> {
    App::new("newton")
        .about("Newton fractal renderer and execution-strategy benchmark")
        .setting(AppSettings::DisableHelpFlags)
        .setting(AppSettings::DisableVersion)
        .arg(
            Arg::with_name(ROOTS)
                .long(ROOTS)
                .takes_value(true)
                .require_equals(true)
                .default_value("3")
                .validator(|s| validate_positive(&s))
                .help("Degree of z^n - 1, which is also the number of roots"),
        )
        .get_matches_safe()
}

/// Renders under one strategy, prints its timings and writes its image.
fn run_strategy(
    job: &Job,
    strategy: Strategy,
    settings: &Settings,
) -> newton::Result<Measurement> {
    let m = measure(job, strategy, settings.repetitions)?;
    for run in &m.runs {
        println!("@time of {} run:\t[{:.3}] ms", strategy.label(), millis(*run));
    }
    println!("@newton {} best:\t[{:.3}] ms", strategy.label(), millis(m.best));
    write_ppm(
        settings.output_path(strategy),
        &m.buffers,
        job.viewport,
        job.roots.count(),
        job.max_iters,
    )?;
    println!("Wrote image file {}", settings.output_path(strategy).display());
    Ok(m)
}

fn run(root_count: usize) -> newton::Result<()> {
    let settings = Settings::from_env()?;
    let viewport: Viewport = settings.viewport()?;
    let roots = RootSet::new(root_count)?;
    info!(
        "{}x{} pixels, {} roots, {} iterations, {} threads, {} repetitions",
        viewport.width,
        viewport.height,
        roots.count(),
        settings.max_iters,
        settings.threads,
        settings.repetitions
    );

    let job = Job {
        viewport: &viewport,
        roots: &roots,
        max_iters: settings.max_iters,
    };

    let [flat, serial, tasks] = settings.strategies();
    let flat = run_strategy(&job, flat, &settings)?;
    let serial = run_strategy(&job, serial, &settings)?;
    let tasks = run_strategy(&job, tasks, &settings)?;

    for other in &[&flat, &tasks] {
        if other.buffers != serial.buffers {
            warn!("{} output differs from the serial output", other.strategy);
        }
    }

    for speedup in speedups(&serial, &flat, &tasks).iter() {
        println!("\n\t\t\t\t{}", speedup);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root_count = match args() {
        Ok(matches) => matches.value_of(ROOTS).and_then(|n| usize::from_str(n).ok()),
        Err(e) => {
            debug!("rejected arguments: {}", e.message);
            None
        }
    };
    let root_count = match root_count {
        Some(n) => n,
        None => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(root_count) {
        eprintln!("error: {}", cause_chain(&e));
        std::process::exit(1);
    }
}
