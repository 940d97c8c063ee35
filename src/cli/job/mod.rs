//! Rendering one job file

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use color_eyre::eyre::{self, WrapErr};
use contract_model::{kind::CodeClassifier, Job};
use log::info;

use super::{
    images::FsImageLoader,
    opt::{Format, Options, Settings},
};

pub mod html;
pub mod pdf;
pub mod summary;

/// A loaded job and everything needed to render it
pub struct JobRun<'a> {
    /// The job file
    pub file: &'a Path,
    /// The job
    pub job: Job,
    /// The command line
    pub opt: &'a Options,
    /// The merged settings
    pub settings: &'a Settings,
    /// The contract kind detection
    pub classifier: CodeClassifier,
}

impl<'a> JobRun<'a> {
    /// Load a job file
    pub fn load(file: &'a Path, opt: &'a Options, settings: &'a Settings) -> eyre::Result<Self> {
        let mut job = Job::load(file)
            .wrap_err_with(|| format!("Failed to load job `{}`", file.display()))?;
        if let Some(contract_type) = &opt.contract_type {
            job.contract_type = Some(contract_type.clone());
        }
        Ok(Self {
            file,
            job,
            opt,
            settings,
            classifier: settings.classifier(),
        })
    }

    /// Images are looked up in the settings' folder, else next to the job
    pub fn image_loader(&self) -> FsImageLoader {
        let root = match &self.settings.images_dir {
            Some(dir) => dir.clone(),
            None => self
                .file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };
        FsImageLoader::new(root)
    }

    /// Write the output in the selected format
    pub fn output(&self) -> eyre::Result<()> {
        match self.opt.format {
            Format::Pdf => pdf::output_pdf(self),
            Format::Html => html::output_html(self),
            Format::Summary => summary::output_summary(self),
        }
    }
}

/// Where the output for `file` goes
///
/// `out` is a folder; without it the output lands next to the job file.
pub fn out_path(out: Option<&Path>, file: &Path, extension: &str) -> PathBuf {
    let dir = out.or_else(|| file.parent()).unwrap_or_else(|| Path::new("."));
    let stem = file.file_stem().unwrap_or(file.as_os_str());
    let mut buf = dir.join(stem);
    buf.set_extension(extension);
    buf
}

/// Write `bytes` to the console (`-`) or to a file
pub fn handle_out(
    out: Option<&Path>,
    file: &Path,
    extension: &str,
    bytes: &[u8],
) -> eyre::Result<()> {
    if out == Some(Path::new("-")) {
        let stdout = io::stdout();
        let mut stdolock = stdout.lock();
        stdolock.write_all(bytes)?;
        stdolock.flush()?;
        Ok(())
    } else {
        let out = out_path(out, file, extension);
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let out_file = File::create(&out)
            .wrap_err_with(|| format!("Failed to create `{}`", out.display()))?;
        let mut out_buf = BufWriter::new(out_file);
        info!("Writing `{}` ...", out.display());
        out_buf.write_all(bytes)?;
        out_buf.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::out_path;

    #[test]
    fn output_paths() {
        let file = Path::new("demos/quote.ron");
        assert_eq!(out_path(None, file, "pdf"), PathBuf::from("demos/quote.pdf"));
        assert_eq!(
            out_path(Some(Path::new("out")), file, "html"),
            PathBuf::from("out/quote.html")
        );
    }
}
