use std::path::Path;

use color_eyre::eyre;
use contract_preview::preview_job;

use super::{handle_out, out_path, JobRun};

/// Write the preview of the job as an HTML page
pub fn output_html(run: &JobRun) -> eyre::Result<()> {
    let options = run.settings.preview_options(run.opt);
    let preview = preview_job(&run.job, &run.classifier, &options);
    let html = preview.to_html()?;
    let out = run.opt.out.as_deref();
    handle_out(out, run.file, "html", html.as_bytes())?;
    if out != Some(Path::new("-")) {
        eprintln!(
            "Wrote HTML file to '{}'",
            out_path(out, run.file, "html").display()
        );
    }
    Ok(())
}
