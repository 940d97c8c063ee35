use color_eyre::eyre::{self, WrapErr};
use contract_pdf::render_job;
use futures_lite::future::block_on;

use super::{handle_out, JobRun};

/// Render the job as a PDF file
pub fn output_pdf(run: &JobRun) -> eyre::Result<()> {
    let loader = run.image_loader();
    let options = run.settings.render_options();
    let doc = block_on(render_job(&run.job, &run.classifier, &loader, &options))
        .wrap_err_with(|| format!("Failed to render `{}`", run.file.display()))?;
    handle_out(run.opt.out.as_deref(), run.file, "pdf", &doc.bytes)?;
    log::info!(
        "Done! {} pages, {} sections",
        doc.page_count(),
        doc.sections.len()
    );
    Ok(())
}
