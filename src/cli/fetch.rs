use chrono::{DateTime, Utc};
use relfetch::config::Config;
use relfetch::core::{expand_home, RelfetchResult};
use relfetch::di::ServiceContainer;
use relfetch::download::{byte_progress_bar, hidden_progress, ProgressFactory};
use relfetch::github::{filter_assets, select_asset, tag_specifier, ResolutionRequest};
use relfetch::target::{TargetFile, DEFAULT_MODE};
use std::path::PathBuf;
use tracing::debug;

/// Everything the fetch command needs, as parsed from the command line
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub repo: String,
    pub tag: Option<String>,
    pub prerelease: bool,
    pub since: Option<DateTime<Utc>>,
    pub asset_filters: Vec<String>,
    pub to: Option<String>,
    pub list: bool,
    pub token: Option<String>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

pub async fn run(options: FetchOptions) -> RelfetchResult<()> {
    let container = ServiceContainer::from_config(load_config(&options)?);

    let mut request = ResolutionRequest::new(options.repo.trim(), tag_specifier(options.tag.as_deref()))
        .with_prerelease(options.prerelease);
    if let Some(since) = options.since {
        request = request.with_min_time(since);
    }

    let assets = container.finder().find(&request, container.client()).await?;

    if options.list {
        for asset in filter_assets(&assets, &options.asset_filters) {
            println!("{}", asset.name);
        }
        return Ok(());
    }

    let asset = select_asset(&assets, &options.asset_filters)?;
    let destination = destination(&options, &asset.name)?;
    debug!("Writing {} to {}", asset.name, destination);

    let mut target = TargetFile::open(&destination, DEFAULT_MODE, true)?;
    let progress: Box<ProgressFactory> = if options.quiet || target.is_stdout() {
        Box::new(hidden_progress)
    } else {
        Box::new(byte_progress_bar)
    };

    let written = container
        .client()
        .download(&asset.download_url, target.writer(), &*progress)
        .await?;
    let filename = target.filename().map(|p| p.display().to_string());
    target.finish()?;

    if let (Some(filename), false) = (filename, options.quiet) {
        eprintln!("Downloaded {} ({} bytes) to {}", asset.name, written, filename);
    }

    Ok(())
}

fn load_config(options: &FetchOptions) -> RelfetchResult<Config> {
    let mut config = match &options.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env();
            config
        }
        None => Config::load()?,
    };

    if let Some(token) = options.token.as_deref().filter(|t| !t.is_empty()) {
        config.token = Some(token.to_string());
    }
    Ok(config)
}

/// `--to` when given (joined with the asset name if it is a directory),
/// otherwise the asset name in the current directory
fn destination(options: &FetchOptions, asset_name: &str) -> RelfetchResult<String> {
    match options.to.as_deref() {
        None => Ok(asset_name.to_string()),
        Some("-") => Ok("-".to_string()),
        Some(to) => {
            let path = expand_home(to)?;
            if path.is_dir() {
                Ok(path.join(asset_name).to_string_lossy().into_owned())
            } else {
                Ok(to.to_string())
            }
        }
    }
}
