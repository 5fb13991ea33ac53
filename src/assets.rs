use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

// CDN URLs for @celsowm/markdown-wysiwyg and its dependency (marked.js).
// The upstream project only tags `latest` for the editor dist files; the
// pins are overridable through `InjectorConfig`.
pub const MARKED_JS_URL: &str = "https://cdn.jsdelivr.net/npm/marked/marked.min.js";
pub const EDITOR_CSS_URL: &str =
    "https://cdn.jsdelivr.net/gh/celsowm/markdown-wysiwyg@latest/dist/editor.css";
pub const EDITOR_JS_URL: &str =
    "https://cdn.jsdelivr.net/gh/celsowm/markdown-wysiwyg@latest/dist/editor.js";

pub const INTEGRATION_JS: &str = "live-wysiwyg-integration.js";
pub const ADMONITION_JS: &str = "admonition-extension.js";
pub const ADMONITION_CSS: &str = "admonition.css";
pub const ICON_SVG: &str = "wysiwyg.svg";

pub const VENDOR_DIR: &str = "vendor";
pub const VENDOR_EDITOR_CSS: &str = "editor.css";
pub const VENDOR_EDITOR_JS: &str = "editor.js";
pub const VENDOR_MARKED_JS: &str = "marked.min.js";

/// Where the editor, its stylesheet and the markdown renderer come from.
///
/// `Cdn` emits references the browser fetches itself; `Vendored` reads the
/// dist files from `<assets-dir>/vendor/` and embeds them into the page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetSource {
    #[default]
    Cdn,
    Vendored,
}

/// Resolved locations of the three third-party assets when fetched from a CDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnUrls {
    pub marked_js: String,
    pub editor_css: String,
    pub editor_js: String,
}

impl Default for CdnUrls {
    fn default() -> Self {
        Self {
            marked_js: MARKED_JS_URL.to_string(),
            editor_css: EDITOR_CSS_URL.to_string(),
            editor_js: EDITOR_JS_URL.to_string(),
        }
    }
}

/// A single asset, either referenced by URL or embedded by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    Remote(String),
    Inline(String),
}

impl AssetRef {
    fn to_style_tag(&self) -> String {
        match self {
            Self::Remote(url) => format!(r#"<link rel="stylesheet" href="{url}">"#),
            Self::Inline(content) => format!("<style>{content}</style>"),
        }
    }

    fn to_script_tag(&self) -> String {
        match self {
            Self::Remote(url) => format!(r#"<script src="{url}"></script>"#),
            Self::Inline(content) => format!("<script>{content}</script>"),
        }
    }
}

/// Everything a single page injection needs, read fresh from disk.
///
/// Nothing here is cached across pages: edits to the integration script or
/// the stylesheets are picked up by the next rebuild without restarting the
/// preprocessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBundle {
    editor_css: AssetRef,
    marked_js: AssetRef,
    editor_js: AssetRef,
    admonition_css: String,
    admonition_js: String,
    integration_js: String,
    icon: Option<String>,
}

impl AssetBundle {
    /// Reads the asset set for one page render.
    ///
    /// Every missing local file is an error, except the toolbar icon which
    /// degrades to `None`.
    pub fn resolve(source: AssetSource, urls: &CdnUrls, asset_dir: &Path) -> Result<Self> {
        let (editor_css, marked_js, editor_js) = match source {
            AssetSource::Cdn => (
                AssetRef::Remote(urls.editor_css.clone()),
                AssetRef::Remote(urls.marked_js.clone()),
                AssetRef::Remote(urls.editor_js.clone()),
            ),
            AssetSource::Vendored => {
                let vendor = asset_dir.join(VENDOR_DIR);
                (
                    AssetRef::Inline(read_asset(&vendor, VENDOR_EDITOR_CSS)?),
                    AssetRef::Inline(read_asset(&vendor, VENDOR_MARKED_JS)?),
                    AssetRef::Inline(read_asset(&vendor, VENDOR_EDITOR_JS)?),
                )
            }
        };
        Ok(Self {
            editor_css,
            marked_js,
            editor_js,
            admonition_css: read_asset(asset_dir, ADMONITION_CSS)?,
            admonition_js: read_asset(asset_dir, ADMONITION_JS)?,
            integration_js: read_asset(asset_dir, INTEGRATION_JS)?,
            icon: read_icon(asset_dir)?,
        })
    }

    /// The toolbar icon as a `data:` URL, if `wysiwyg.svg` exists.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Assembles the markup fragment to prepend to a page.
    ///
    /// Script order matters: the admonition extension registers itself with
    /// `marked`, and the integration script expects both the renderer and
    /// the editor library to be evaluated already.
    pub fn render(&self, preamble: &str) -> String {
        format!(
            "{}{}{}{}{}<script>{}\n{}</script>",
            self.editor_css.to_style_tag(),
            AssetRef::Inline(self.admonition_css.clone()).to_style_tag(),
            self.marked_js.to_script_tag(),
            AssetRef::Inline(self.admonition_js.clone()).to_script_tag(),
            self.editor_js.to_script_tag(),
            preamble,
            self.integration_js,
        )
    }
}

fn read_asset(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    fs::read_to_string(&path).with_context(|| format!("Could not read asset {}", path.display()))
}

// The icon is the one optional asset: a missing file means "no icon", any
// other failure is still an error.
fn read_icon(asset_dir: &Path) -> Result<Option<String>> {
    let path = asset_dir.join(ICON_SVG);
    match fs::read(&path) {
        Ok(bytes) => Ok(Some(format!(
            "data:image/svg+xml;base64,{}",
            STANDARD.encode(bytes)
        ))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("Could not read icon {}", path.display()))
        }
    }
}
