//! # Contract and quote rendering tool
#![warn(missing_docs)]

use std::{path::Path, thread};

use color_eyre::eyre::{self, eyre, WrapErr};
use contract_tool::cli::{
    init,
    job::JobRun,
    opt::{Format, Options, Settings},
};

fn process(file: &Path, opt: &Options, settings: &Settings) -> eyre::Result<()> {
    JobRun::load(file, opt, settings)?.output()
}

fn main() -> eyre::Result<()> {
    let opt: Options = init()?;
    let settings = opt.settings().wrap_err("Failed to load the settings")?;

    // the summary goes to the console, one job after the other
    if opt.files.len() == 1 || opt.format == Format::Summary {
        for file in &opt.files {
            process(file, &opt, &settings)?;
        }
        return Ok(());
    }

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = opt
            .files
            .iter()
            .map(|file| {
                let (opt, settings) = (&opt, &*settings);
                (file, s.spawn(move || process(file, opt, settings)))
            })
            .collect();
        handles
            .into_iter()
            .map(|(file, handle)| match handle.join() {
                Ok(result) => (file, result),
                Err(_) => (file, Err(eyre!("Rendering panicked"))),
            })
            .collect()
    });

    let mut failed = 0;
    for (file, result) in &results {
        if let Err(e) = result {
            log::error!("{}: {:?}", file.display(), e);
            failed += 1;
        }
    }
    if failed > 0 {
        return Err(eyre!("{} of {} jobs failed", failed, results.len()));
    }
    Ok(())
}
