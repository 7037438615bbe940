// Library root
// -----------
// The binary (`main.rs`) wires these modules into a single interactive run:
// prompt for a search, query the photo API, download the results in
// parallel into a folder named after the search term.
//
// Module responsibilities:
// - `config`: environment-driven settings, read once at startup.
// - `api`: HTTP client for the search endpoint and its response shapes.
// - `download`: download tasks and the streaming file downloader.
// - `ui`: interactive prompts and their validators.
// - `app`: the orchestrator tying the above together.
// - `slug`: search term -> folder name.
//
// `app` talks to the other components through the `Prompter`,
// `PhotoSearch` and `ImageDownloader` traits.
pub mod api;
pub mod app;
pub mod config;
pub mod download;
pub mod error;
pub mod model;
pub mod slug;
pub mod ui;

pub use error::{Error, Result};
