//! Schedule page data loaded from disk.
//!
//! Each route has a `{route_id}.json` file holding its page data, and may
//! have `{route_id}.map.json` and `{route_id}.static_map.json` next to it
//! with the raw embedded map payloads. Payload files are kept as text and
//! only parsed when a direction view is rendered.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::schedule::{EmbeddedPayloads, SchedulePageData};

const MAP_SUFFIX: &str = ".map.json";
const STATIC_MAP_SUFFIX: &str = ".static_map.json";

/// Errors from loading page data.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Reading a file or directory failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A page file isn't valid page data
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The directory has no page files
    #[error("no schedule pages found in {0}")]
    Empty(PathBuf),
}

/// A route's page data plus its embedded payloads.
#[derive(Debug, Clone)]
pub struct RoutePage {
    pub data: SchedulePageData,
    pub payloads: EmbeddedPayloads,
}

/// All schedule pages, keyed by route id.
#[derive(Debug, Clone, Default)]
pub struct PageRepository {
    pages: HashMap<String, Arc<RoutePage>>,
}

impl PageRepository {
    /// Load every page in `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, PageError> {
        let dir = dir.as_ref();
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| PageError::Io { path, source }
        };

        let mut pages = HashMap::new();
        for entry in std::fs::read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            let Some(route_id) = page_route_id(&path) else {
                continue;
            };

            let json = std::fs::read_to_string(&path).map_err(io_err(&path))?;
            let data: SchedulePageData =
                serde_json::from_str(&json).map_err(|source| PageError::Json {
                    path: path.clone(),
                    source,
                })?;

            let payloads = EmbeddedPayloads::new(
                read_optional(&dir.join(format!("{route_id}{MAP_SUFFIX}")))?,
                read_optional(&dir.join(format!("{route_id}{STATIC_MAP_SUFFIX}")))?,
            );

            debug!(
                route = %route_id,
                has_map = payloads.map_data.is_some(),
                has_static_map = payloads.static_map_data.is_some(),
                "loaded schedule page"
            );
            pages.insert(route_id, Arc::new(RoutePage { data, payloads }));
        }

        if pages.is_empty() {
            return Err(PageError::Empty(dir.to_path_buf()));
        }

        info!(count = pages.len(), dir = %dir.display(), "schedule pages loaded");
        Ok(Self { pages })
    }

    /// Build a repository from pages already in memory.
    pub fn from_pages(pages: impl IntoIterator<Item = (String, RoutePage)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(id, page)| (id, Arc::new(page)))
                .collect(),
        }
    }

    pub fn get(&self, route_id: &str) -> Option<Arc<RoutePage>> {
        self.pages.get(route_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Route ids, sorted.
    pub fn route_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.pages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Route id for a page file, or `None` for payload files and anything
/// that isn't JSON.
fn page_route_id(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    if name.ends_with(MAP_SUFFIX) || name.ends_with(STATIC_MAP_SUFFIX) {
        return None;
    }
    let route_id = name.strip_suffix(".json")?;
    (!route_id.is_empty()).then(|| route_id.to_string())
}

fn read_optional(path: &Path) -> Result<Option<String>, PageError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: &str = r#"{
        "route": {"id": "Red", "name": "Red Line", "type": 1},
        "route_patterns": {"0": [{"id": "Red-1-0", "name": "Alewife - Ashmont", "direction_id": 0}]},
        "today": "2026-10-18"
    }"#;

    const FERRY: &str = r#"{"route": {"id": "Boat-F4", "name": "Charlestown Ferry", "type": 4}, "today": "2026-10-18"}"#;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn loads_pages_and_payloads() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Red.json", RED);
        write(dir.path(), "Red.map.json", r#"{"markers": []}"#);
        write(dir.path(), "Boat-F4.json", FERRY);
        write(dir.path(), "Boat-F4.static_map.json", "{broken");
        write(dir.path(), "README.txt", "not a page");

        let repo = PageRepository::load(dir.path()).unwrap();
        assert_eq!(repo.route_ids(), vec!["Boat-F4", "Red"]);

        let red = repo.get("Red").unwrap();
        assert!(red.data.route.is_subway());
        assert_eq!(red.payloads.map_data.as_deref(), Some(r#"{"markers": []}"#));
        assert!(red.payloads.static_map_data.is_none());

        // Payload text is kept verbatim, even when malformed
        let ferry = repo.get("Boat-F4").unwrap();
        assert_eq!(ferry.payloads.static_map_data.as_deref(), Some("{broken"));

        assert!(repo.get("Blue").is_none());
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Red.map.json", "{}");
        let err = PageRepository::load(dir.path()).unwrap_err();
        assert!(matches!(err, PageError::Empty(_)));
    }

    #[test]
    fn invalid_page_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Red.json", r#"{"route": {}}"#);
        let err = PageRepository::load(dir.path()).unwrap_err();
        assert!(matches!(err, PageError::Json { .. }));
        assert!(err.to_string().contains("Red.json"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PageRepository::load(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, PageError::Io { .. }));
    }

    #[test]
    fn route_id_from_file_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["66.json", "66.map.json", "66.static_map.json", "notes.txt"] {
            write(dir.path(), name, "{}");
        }
        assert_eq!(page_route_id(&dir.path().join("66.json")), Some("66".to_string()));
        assert_eq!(page_route_id(&dir.path().join("66.map.json")), None);
        assert_eq!(page_route_id(&dir.path().join("66.static_map.json")), None);
        assert_eq!(page_route_id(&dir.path().join("notes.txt")), None);
        assert_eq!(page_route_id(&dir.path().join("missing.json")), None);
    }

    #[test]
    fn sample_data_loads() {
        let repo = PageRepository::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data")).unwrap();
        assert_eq!(repo.route_ids(), vec!["66", "Boat-F4"]);

        let bus = repo.get("66").unwrap();
        assert_eq!(bus.data.stop_tree().flatten().len(), 3);
        assert!(bus.payloads.map_data(crate::schedule::PayloadPolicy::Strict).unwrap().is_some());

        let ferry = repo.get("Boat-F4").unwrap();
        assert!(ferry.data.route.is_ferry());
        assert!(
            ferry
                .payloads
                .static_map_data(crate::schedule::PayloadPolicy::Strict)
                .unwrap()
                .is_some()
        );
    }
}
