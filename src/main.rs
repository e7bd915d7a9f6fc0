mod app;
mod config;
mod domain;
mod models;
mod ui;

use std::path::Path;

use anyhow::{Result, bail};
use gpui::{App, Application};

use crate::config::BoardConfig;
use crate::ui::FileAssets;

const USAGE: &str = "usage: gpui-chessboard [CONFIG.json]
       gpui-chessboard --snapshot OUT.png [CONFIG.json]
       gpui-chessboard --print-config-schema";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (snapshot, config_path) = match args.as_slice() {
        [flag] if flag == "--print-config-schema" => {
            println!("{}", config::schema_json()?);
            return Ok(());
        }
        [flag, out, rest @ ..] if flag == "--snapshot" && rest.len() <= 1 => {
            (Some(Path::new(out)), rest.first())
        }
        [flag, ..] if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
        [path] => (None, Some(path)),
        [] => (None, None),
        _ => bail!(USAGE),
    };

    let config = BoardConfig::load(config_path.map(Path::new))?;
    let requests = config.asset_requests()?;

    if let Some(out) = snapshot {
        return app::snapshot(&config, requests, out);
    }

    Application::new()
        .with_assets(FileAssets::new())
        .run(move |cx: &mut App| app::run(cx, config, requests));
    Ok(())
}
