// Entrypoint for the CLI application.
// - Keeps `main` small: load config, build the components, run once.
// - Returns `anyhow::Result` so any fatal error is printed and the process
//   exits non-zero. Partial download failures still exit 0.

use env_logger::Env;
use photofetch::api::{build_http_client, SearchClient};
use photofetch::app::App;
use photofetch::config::Config;
use photofetch::download::HttpDownloader;
use photofetch::ui::TerminalPrompter;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // Checked before any prompt is shown.
    let config = Config::from_env()?;
    log::debug!("loaded {:?}", config);

    let client = build_http_client(&config)?;
    let app = App::new(
        TerminalPrompter,
        SearchClient::new(client.clone(), &config),
        HttpDownloader::new(client),
        &config,
    );

    app.run()?;
    Ok(())
}
