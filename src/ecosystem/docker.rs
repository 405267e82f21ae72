//! Docker Hub images, listed through the paginated tags API.
//!
//! Official images (`python`) live under the `library` namespace. The
//! floating `latest` tag is not a version and is dropped.

use super::{dedup_preserving_order, http, lookup_error, Ecosystem};
use crate::error::Result;
use serde::Deserialize;

const API_BASE: &str = "https://hub.docker.com/v2/repositories";
const PAGE_SIZE: &str = "100";

#[derive(Debug, Deserialize)]
struct TagPage {
    next: Option<String>,
    #[serde(default)]
    results: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
    last_updated: Option<String>,
}

/// Images hosted on Docker Hub.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerImage;

impl Ecosystem for DockerImage {
    fn key(&self) -> &str {
        "docker_image"
    }

    fn list_versions(&self, package_name: &str) -> Result<Vec<String>> {
        let (namespace, repository) = split_image_name(package_name);
        let mut url = http::build_url(API_BASE, &[namespace, repository, "tags"])
            .map_err(|e| lookup_error(self.key(), package_name, e))?;
        url.query_pairs_mut().append_pair("page_size", PAGE_SIZE);

        let mut tags = Vec::new();
        let mut next = Some(url.to_string());
        while let Some(page_url) = next {
            let page: TagPage =
                http::get_json(&page_url).map_err(|e| lookup_error(self.key(), package_name, e))?;
            tags.extend(page.results);
            next = page.next;
        }

        Ok(tags_oldest_first(tags))
    }
}

/// `alpine/flake8` → (`alpine`, `flake8`); `python` → (`library`, `python`).
fn split_image_name(image: &str) -> (&str, &str) {
    image.split_once('/').unwrap_or(("library", image))
}

/// Order tags by last push, oldest first, without `latest`.
fn tags_oldest_first(mut tags: Vec<Tag>) -> Vec<String> {
    tags.retain(|tag| tag.name != "latest");
    tags.sort_by(|a, b| a.last_updated.cmp(&b.last_updated));
    dedup_preserving_order(tags.into_iter().map(|tag| tag.name).collect())
}
