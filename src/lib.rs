//! This is a preprocessor for the [rust-lang mdbook](https://github.com/rust-lang/mdBook) project. While `mdbook serve` is running it injects the [@celsowm/markdown-wysiwyg](https://github.com/celsowm/markdown-wysiwyg) rich editor into every page, so rendered chapters can be edited visually in the browser. Static builds are left untouched.
//!
//! # Getting started
//!
//! ```sh
//! cargo install mdbook-live-wysiwyg
//! ```
//!
//! You also have to activate the preprocessor, put this in your `book.toml` file:
//!
//! ```toml
//! [preprocessor.live-wysiwyg]
//! ```
//!
//! The preprocessor protocol does not say whether mdbook is serving or
//! building, so tell the preprocessor through the environment when you want
//! the editor:
//!
//! ```sh
//! MDBOOK_LIVE_WYSIWYG_COMMAND=serve mdbook serve
//! ```
//!
//! Without that variable the preprocessor assumes a static build and injects
//! nothing.
//!
//! # Configuration
//!
//! All options with their defaults:
//!
//! ```toml
//! [preprocessor.live-wysiwyg]
//! # "cdn" loads the editor and marked.js from jsDelivr; "vendored" embeds
//! # the dist files found under `<assets-dir>/vendor/`.
//! assets = "cdn"
//! # CSS selector for the editable region; unset lets the integration script
//! # pick the page's main content element.
//! # article-selector = "main .content"
//! # Whether the editor activates without clicking the toolbar toggle.
//! autoload = true
//! # Where the plugin's asset files live; defaults to the `assets/`
//! # directory next to the installed binary. Relative paths are resolved
//! # against the book root.
//! # assets-dir = "wysiwyg-assets"
//! # CDN pins, only used with `assets = "cdn"`. Two of the upstream dist
//! # files are only published under @latest; override these to pin exact
//! # versions.
//! # marked-js-url = "https://cdn.jsdelivr.net/npm/marked/marked.min.js"
//! # editor-css-url = "https://cdn.jsdelivr.net/gh/celsowm/markdown-wysiwyg@latest/dist/editor.css"
//! # editor-js-url = "https://cdn.jsdelivr.net/gh/celsowm/markdown-wysiwyg@latest/dist/editor.js"
//! ```
//!
//! # Details
//!
//! When serving, every chapter gets a markup fragment prepended: the editor
//! stylesheet, an admonition stylesheet, the marked.js renderer, a marked
//! extension for mkdocs-style `!!! note` admonition blocks, the editor
//! library, and finally a script block with a small configuration preamble
//! followed by the integration script. Asset files are re-read on every page
//! render, so editing them only requires a rebuild, not a restart.
//!
//! With `assets = "vendored"` nothing is fetched from a CDN; place the
//! upstream `editor.css`, `editor.js` and `marked.min.js` dist files in
//! `<assets-dir>/vendor/` yourself. An optional `wysiwyg.svg` in the asset
//! directory becomes the toolbar icon (embedded as a base64 data URL); when
//! the file is absent the integration script falls back to a text label.
pub mod assets;
pub mod injector;
mod utils;

pub use injector::{InjectorConfig, LiveWysiwyg, RunMode, COMMAND_ENV_VAR, PREPROCESSOR_NAME};
