//! Release and asset resolution

use crate::core::{RelfetchError, RelfetchResult};
use crate::di::ClientContract;
use crate::github::types::{Asset, Release};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Default GitHub API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Tag specifier meaning "the latest release"
pub const LATEST: &str = "latest";

/// Prefix marking an exact tag name in a tag specifier
pub const TAGS_PREFIX: &str = "tags/";

/// Bounds for the paginated release search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingLimits {
    /// Entries per page the API returns. A shorter page is the last one.
    pub page_size: usize,
    /// Maximum number of pages scanned before giving up.
    pub max_pages: u32,
}

impl PagingLimits {
    pub const DEFAULT_PAGE_SIZE: usize = 30;
    pub const DEFAULT_MAX_PAGES: u32 = 20;

    pub fn new(page_size: usize, max_pages: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
        }
    }
}

impl Default for PagingLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE, Self::DEFAULT_MAX_PAGES)
    }
}

/// What to resolve: a repository, a tag specifier and the constraints on
/// the release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// `owner/name`
    pub repo: String,
    /// `latest`, a release id, or `tags/<name>`
    pub tag: String,
    /// Accept prereleases
    pub prerelease: bool,
    /// Releases created before this instant are not accepted
    pub min_time: DateTime<Utc>,
}

impl ResolutionRequest {
    pub fn new(repo: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            tag: tag.into(),
            prerelease: false,
            min_time: DateTime::<Utc>::MIN_UTC,
        }
    }

    pub fn with_prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }

    pub fn with_min_time(mut self, min_time: DateTime<Utc>) -> Self {
        self.min_time = min_time;
        self
    }

    /// Whether the tag names an exact tag (`tags/<name>`)
    pub fn is_exact_tag(&self) -> bool {
        self.tag.starts_with(TAGS_PREFIX)
    }

    /// The tag with any `tags/` prefix removed
    pub fn bare_tag(&self) -> &str {
        self.tag.strip_prefix(TAGS_PREFIX).unwrap_or(&self.tag)
    }

    fn accepts(&self, release: &Release) -> bool {
        release.created_at >= self.min_time
    }
}

/// Map a user-supplied tag onto a tag specifier.
///
/// No tag (or `latest`) means the latest release; anything else is looked
/// up as an exact tag, falling back to a substring search.
pub fn tag_specifier(tag: Option<&str>) -> String {
    match tag.map(str::trim) {
        None | Some("") | Some(LATEST) => LATEST.to_string(),
        Some(t) if t.starts_with(TAGS_PREFIX) => t.to_string(),
        Some(t) => format!("{}{}", TAGS_PREFIX, t),
    }
}

/// Resolves release assets through a [`ClientContract`].
///
/// Requests are issued one at a time; a page search stops at the first
/// match.
#[derive(Debug, Clone)]
pub struct AssetFinder {
    api_url: String,
    paging: PagingLimits,
}

impl Default for AssetFinder {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl AssetFinder {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            paging: PagingLimits::default(),
        }
    }

    pub fn with_paging(mut self, paging: PagingLimits) -> Self {
        self.paging = paging;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn paging(&self) -> PagingLimits {
        self.paging
    }

    fn release_url(&self, repo: &str, tag: &str) -> String {
        format!("{}/repos/{}/releases/{}", self.api_url, repo, tag)
    }

    fn page_url(&self, repo: &str, page: u32) -> String {
        format!("{}/repos/{}/releases?page={}", self.api_url, repo, page)
    }

    /// Find the assets of the release `request` names.
    ///
    /// Returns [`RelfetchError::NoUpgrade`] when the release found is older
    /// than `request.min_time`.
    pub async fn find(
        &self,
        request: &ResolutionRequest,
        client: &dyn ClientContract,
    ) -> RelfetchResult<Vec<Asset>> {
        if request.repo.is_empty() {
            return Err(RelfetchError::Config("repository must not be empty".to_string()));
        }

        let request = self.resolve_latest(request, client).await?;
        let url = self.release_url(&request.repo, &request.tag);
        let response = client.get_json(&url).await?;

        if !response.is_ok() {
            if response.status == 404 && request.is_exact_tag() {
                warn!(
                    repo = %request.repo,
                    tag = %request.bare_tag(),
                    "no release for exact tag, searching release history"
                );
                return self.find_match(&request, client).await;
            }
            return Err(response.into_api_error(&url).into());
        }

        let release: Release = response.json()?;
        if !request.accepts(&release) {
            debug!(tag = %release.tag, created_at = %release.created_at, "release is not newer than minimum time");
            return Err(RelfetchError::NoUpgrade);
        }

        info!(repo = %request.repo, tag = %release.tag, assets = release.assets.len(), "resolved release");
        Ok(release.to_assets())
    }

    /// Search the release history for the newest release whose tag contains
    /// the request's bare tag.
    ///
    /// Prereleases are skipped unless `request.prerelease` is set, as are
    /// releases created before `request.min_time`.
    pub async fn find_match(
        &self,
        request: &ResolutionRequest,
        client: &dyn ClientContract,
    ) -> RelfetchResult<Vec<Asset>> {
        let tag = request.bare_tag();

        for page in 1..=self.paging.max_pages {
            let url = self.page_url(&request.repo, page);
            debug!(url = %url, page, "scanning releases page");

            let response = client.get_json(&url).await?;
            if !response.is_ok() {
                return Err(response.into_api_error(&url).into());
            }

            let releases: Vec<Release> = response.json()?;
            let found = releases
                .iter()
                .filter(|r| request.prerelease || !r.prerelease)
                .find(|r| r.tag.contains(tag) && request.accepts(r));

            if let Some(release) = found {
                info!(repo = %request.repo, tag = %release.tag, page, "matched release");
                return Ok(release.to_assets());
            }

            if releases.len() < self.paging.page_size {
                break;
            }
        }

        Err(RelfetchError::NoMatchingTag(tag.to_string()))
    }

    /// Tag name of the repository's latest release
    pub async fn latest_tag(
        &self,
        repo: &str,
        client: &dyn ClientContract,
    ) -> RelfetchResult<String> {
        self.fetch_latest_release(repo, client)
            .await
            .map(|release| release.tag)
            .map_err(|e| RelfetchError::LatestTag(Box::new(e)))
    }

    async fn fetch_latest_release(
        &self,
        repo: &str,
        client: &dyn ClientContract,
    ) -> RelfetchResult<Release> {
        let url = self.release_url(repo, LATEST);
        let response = client.get_json(&url).await?;
        if !response.is_ok() {
            return Err(response.into_api_error(&url).into());
        }
        response.json()
    }

    /// The request with `latest` replaced by the concrete latest tag, when
    /// prereleases are wanted. Otherwise an unchanged copy.
    pub async fn resolve_latest(
        &self,
        request: &ResolutionRequest,
        client: &dyn ClientContract,
    ) -> RelfetchResult<ResolutionRequest> {
        if !(request.prerelease && request.tag == LATEST) {
            return Ok(request.clone());
        }

        let tag = self.latest_tag(&request.repo, client).await?;
        debug!(repo = %request.repo, tag = %tag, "resolved latest tag");
        Ok(ResolutionRequest {
            tag: format!("{}{}", TAGS_PREFIX, tag),
            ..request.clone()
        })
    }
}

/// Resolve the assets for `repo` at `tag` against the public GitHub API.
pub async fn find_assets(
    repo: &str,
    tag: &str,
    prerelease: bool,
    min_time: DateTime<Utc>,
    client: &dyn ClientContract,
) -> RelfetchResult<Vec<Asset>> {
    let request = ResolutionRequest::new(repo, tag)
        .with_prerelease(prerelease)
        .with_min_time(min_time);
    AssetFinder::default().find(&request, client).await
}
