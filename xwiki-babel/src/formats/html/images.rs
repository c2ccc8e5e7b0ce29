//! Image path resolution
//!
//! Image references in a preview are rewritten into URLs the preview surface can load. The
//! [`LocationHint`] says where the document lives; it is the only input besides the path.
//!
//! | Source path        | Resolved against                                   |
//! |--------------------|----------------------------------------------------|
//! | `https://…`, `data:…` | nothing, returned unchanged                     |
//! | `./a.png`, `../a.png`, `a.png` | the document's directory               |
//! | `/a.png`           | the workspace root, or the filesystem root         |
//!
//! The resulting `file:` URL is then mapped onto [`LocationHint::resource_base`] when one
//! is set, so `/home/me/doc/a.png` becomes `<base>/home/me/doc/a.png`.

use std::path::PathBuf;
use url::Url;

/// Where the rendered document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationHint {
    /// Path of the document being rendered. Must be absolute for resolution to succeed.
    pub document: PathBuf,
    /// Directory that `/`-rooted image paths are relative to.
    pub workspace_root: Option<PathBuf>,
    /// Origin the preview surface serves local files from.
    pub resource_base: Option<Url>,
}

impl LocationHint {
    pub fn new(document: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            workspace_root: None,
            resource_base: None,
        }
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    pub fn with_resource_base(mut self, base: Url) -> Self {
        self.resource_base = Some(base);
        self
    }
}

/// Resolve an image `src` for display.
///
/// Never fails: when the path cannot be resolved the original `src` is returned.
pub fn resolve_image_path(src: &str, hint: Option<&LocationHint>) -> String {
    if is_absolute_url(src) {
        return src.to_string();
    }
    let Some(hint) = hint else {
        return src.to_string();
    };
    match resolve(src, hint) {
        Some(url) => url.into(),
        None => {
            log::debug!(
                "could not resolve image '{}' for {}",
                src,
                hint.document.display()
            );
            src.to_string()
        }
    }
}

// Single-letter schemes are Windows drive letters, not URLs.
fn is_absolute_url(src: &str) -> bool {
    match Url::parse(src) {
        Ok(url) => url.scheme().len() > 1,
        Err(_) => false,
    }
}

fn resolve(src: &str, hint: &LocationHint) -> Option<Url> {
    let file_url = match src.strip_prefix('/') {
        Some(rooted) => match &hint.workspace_root {
            Some(root) => Url::from_directory_path(root).ok()?.join(rooted).ok()?,
            None => Url::from_file_path(src).ok()?,
        },
        None => Url::from_file_path(&hint.document).ok()?.join(src).ok()?,
    };
    match &hint.resource_base {
        Some(base) => map_onto_base(base, &file_url),
        None => Some(file_url),
    }
}

fn map_onto_base(base: &Url, file_url: &Url) -> Option<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let relative = file_url.path().trim_start_matches('/');
    base.join(&format!("./{relative}")).ok()
}
