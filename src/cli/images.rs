//! Loading the logo and the signature from the local file system

use std::{
    future::Future,
    path::{Path, PathBuf},
};

use contract_pdf::images::{ImageError, ImageLoader};

/// Resolves image URLs against a folder
///
/// Plain paths and `file://` URLs are read from disk. Other schemes are not
/// supported, the document is rendered without the image.
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    /// Create a new instance rooted at `root`
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The file behind `url`
    pub fn resolve(&self, url: &str) -> Result<PathBuf, ImageError> {
        let url = url.trim();
        let path = match url.strip_prefix("file://") {
            Some(path) => path,
            None if url.contains("://") || url.starts_with("data:") => {
                return Err(ImageError::Unsupported(url.to_owned()))
            }
            None => url,
        };
        Ok(self.root.join(Path::new(path)))
    }
}

impl ImageLoader for FsImageLoader {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ImageError>> {
        let bytes = self.resolve(url).and_then(|path| {
            log::debug!("Reading image `{}`", path.display());
            Ok(std::fs::read(path)?)
        });
        std::future::ready(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use contract_pdf::images::{ImageError, ImageLoader};
    use futures_lite::future::block_on;

    use super::FsImageLoader;

    #[test]
    fn resolve() {
        let loader = FsImageLoader::new(PathBuf::from("demos"));
        assert_eq!(
            loader.resolve("logo.png").unwrap(),
            PathBuf::from("demos/logo.png")
        );
        assert_eq!(
            loader.resolve("file:///srv/logo.png").unwrap(),
            PathBuf::from("/srv/logo.png")
        );
        assert!(matches!(
            loader.resolve("https://cdn.example.com/logo.png"),
            Err(ImageError::Unsupported(_))
        ));
    }

    #[test]
    fn missing_file() {
        let loader = FsImageLoader::new(PathBuf::from("does-not-exist"));
        assert!(matches!(
            block_on(loader.fetch("logo.png")),
            Err(ImageError::Io(_))
        ));
    }

    #[test]
    fn demo_logo() {
        let loader = FsImageLoader::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("demos"));
        let bytes = block_on(loader.fetch("file://logo.png")).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
