use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

use crate::error::{DownloadErrorKind, PslError, Result};
use crate::index::BUNDLED_SUFFIX_LIST;
use crate::parser::{parse_suffix_list, read_suffix_list};
use crate::source::SuffixListSource;

/// Canonical location of the Public Suffix List
pub const DEFAULT_SUFFIX_LIST_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

/// Default file name of the cached list
pub const DEFAULT_FILENAME: &str = "public_suffix_list.dat";

/// Refresh the cached list weekly
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Suffix list source that downloads the list and caches the raw text on
/// disk, refreshing it once it is older than the update interval.
///
/// When a refresh fails a stale cached copy is used; when there is none, the
/// bundled list is used unless that fallback is disabled.
pub struct AutoSuffixListLoader {
    pub path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub url: String,
    pub update_interval: Duration,
    pub fallback_to_bundled: bool,
    download_lock: Mutex<()>,
}

impl AutoSuffixListLoader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self {
            path: None,
            data_dir: None,
            url: DEFAULT_SUFFIX_LIST_URL.to_string(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            fallback_to_bundled: true,
            download_lock: Mutex::new(()),
        }
    }

    /// Set the cache file path (overrides data_dir)
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the directory holding the cached list
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set custom download URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set how old the cached list may get before it is refreshed
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Enable or disable falling back to the bundled list
    pub fn with_fallback_to_bundled(mut self, enabled: bool) -> Self {
        self.fallback_to_bundled = enabled;
        self
    }

    /// Cache file path
    pub fn cache_path(&self) -> PathBuf {
        if let Some(ref path) = self.path {
            return path.clone();
        }
        match self.data_dir {
            Some(ref dir) => dir.join(DEFAULT_FILENAME),
            None => PathBuf::from(DEFAULT_FILENAME),
        }
    }

    /// Check if the cached file needs a download
    fn should_download(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => {
                if meta.len() == 0 {
                    return true;
                }
                match meta.modified() {
                    Ok(mtime) => SystemTime::now()
                        .duration_since(mtime)
                        .map(|d| d > self.update_interval)
                        .unwrap_or(true),
                    Err(_) => true,
                }
            }
            Err(_) => true,
        }
    }

    /// Download the list into `path`, verifying it before it replaces the
    /// cached copy.
    fn download(&self, path: &Path) -> Result<()> {
        let _lock = self.download_lock.lock();

        // Another caller may have refreshed it while we waited.
        if !self.should_download(path) {
            return Ok(());
        }

        log::info!("Downloading {} from {}", path.display(), self.url);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = path.with_extension("tmp");

        let response = ureq::get(&self.url).call().map_err(|e| PslError::Download {
            kind: DownloadErrorKind::RequestFailed,
            message: format!("Download failed: {}", e),
        })?;

        let (_, body) = response.into_parts();
        let mut reader = body.into_reader();
        write_verified(&mut reader, &tmp_path)?;

        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        log::info!("Downloaded {} successfully", path.display());
        Ok(())
    }
}

impl Default for AutoSuffixListLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixListSource for AutoSuffixListLoader {
    fn load_text(&self) -> Result<String> {
        let path = self.cache_path();

        if self.should_download(&path) {
            if let Err(e) = self.download(&path) {
                if !path.exists() {
                    if self.fallback_to_bundled {
                        log::warn!("{}; using bundled suffix list", e);
                        return Ok(BUNDLED_SUFFIX_LIST.to_string());
                    }
                    return Err(PslError::Download {
                        kind: DownloadErrorKind::Unavailable,
                        message: format!("no cached suffix list at {}: {}", path.display(), e),
                    });
                }
                log::warn!("Download failed, using existing file: {}", e);
            }
        }

        read_suffix_list(&path)
    }
}

/// Copy `reader` into `tmp_path` and verify the result. The file is removed
/// on any failure.
fn write_verified(reader: &mut impl Read, tmp_path: &Path) -> Result<()> {
    let result = fs::File::create(tmp_path)
        .and_then(|mut file| {
            io::copy(reader, &mut file)?;
            file.flush()
        })
        .map_err(PslError::from)
        .and_then(|()| verify_suffix_list_file(tmp_path));

    if result.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    result
}

/// Check that a suffix list file parses into at least one rule.
pub fn verify_suffix_list_file(path: &Path) -> Result<()> {
    let text = read_suffix_list(path)?;
    if parse_suffix_list(&text).is_empty() {
        return Err(PslError::Download {
            kind: DownloadErrorKind::VerificationFailed,
            message: format!("{} contains no suffix rules", path.display()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::create_dir_all(&dir);
        dir
    }

    #[test]
    fn test_builder_pattern() {
        let loader = AutoSuffixListLoader::new()
            .with_data_dir("/tmp/test")
            .with_url("http://example.com/psl.dat")
            .with_update_interval(Duration::from_secs(3600))
            .with_fallback_to_bundled(false);

        assert_eq!(loader.url, "http://example.com/psl.dat");
        assert_eq!(loader.update_interval, Duration::from_secs(3600));
        assert!(!loader.fallback_to_bundled);
        assert_eq!(
            loader.cache_path(),
            PathBuf::from("/tmp/test").join(DEFAULT_FILENAME)
        );
    }

    #[test]
    fn test_explicit_path_overrides_data_dir() {
        let loader = AutoSuffixListLoader::new()
            .with_data_dir("/tmp/a")
            .with_path("/tmp/b/list.dat");
        assert_eq!(loader.cache_path(), PathBuf::from("/tmp/b/list.dat"));
    }

    #[test]
    fn test_fresh_cache_is_used_without_download() {
        let dir = test_dir("domain_extractor_test_fetch_fresh");
        let path = dir.join("list.dat");
        fs::write(&path, "com\ncustomtld\n").unwrap();

        // Unroutable URL: a download attempt would fail.
        let loader = AutoSuffixListLoader::new()
            .with_path(&path)
            .with_url("http://127.0.0.1:9/psl.dat")
            .with_fallback_to_bundled(false);

        let index = loader.load_index().unwrap();
        assert!(index.is_known("customtld"));

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_stale_cache_used_when_download_fails() {
        let dir = test_dir("domain_extractor_test_fetch_stale");
        let path = dir.join("list.dat");
        fs::write(&path, "staletld\n").unwrap();

        let loader = AutoSuffixListLoader::new()
            .with_path(&path)
            .with_url("http://127.0.0.1:9/psl.dat")
            .with_update_interval(Duration::ZERO)
            .with_fallback_to_bundled(false);

        let index = loader.load_index().unwrap();
        assert!(index.is_known("staletld"));

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_bundled_fallback_when_nothing_cached() {
        let dir = test_dir("domain_extractor_test_fetch_bundled");
        let loader = AutoSuffixListLoader::new()
            .with_data_dir(&dir)
            .with_url("http://127.0.0.1:9/psl.dat");

        let index = loader.load_index().unwrap();
        assert!(index.is_known("co.uk"));

        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_unavailable_without_fallback() {
        let dir = test_dir("domain_extractor_test_fetch_unavailable");
        let loader = AutoSuffixListLoader::new()
            .with_data_dir(&dir)
            .with_url("http://127.0.0.1:9/psl.dat")
            .with_fallback_to_bundled(false);

        match loader.load_text() {
            Err(PslError::Download { kind, .. }) => {
                assert_eq!(kind, DownloadErrorKind::Unavailable)
            }
            other => panic!("expected Unavailable, got {:?}", other.map(|t| t.len())),
        }

        let _ = fs::remove_dir(&dir);
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
        }
    }

    #[test]
    fn test_write_verified_removes_tmp_on_read_error() {
        let dir = test_dir("domain_extractor_test_fetch_broken");
        let tmp = dir.join("list.tmp");

        let err = write_verified(&mut BrokenReader, &tmp).unwrap_err();
        assert!(matches!(err, PslError::Io(_)));
        assert!(!tmp.exists());

        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_write_verified_removes_tmp_on_empty_list() {
        let dir = test_dir("domain_extractor_test_fetch_empty");
        let tmp = dir.join("list.tmp");

        let mut body: &[u8] = b"// nothing but comments\n";
        let err = write_verified(&mut body, &tmp).unwrap_err();
        assert!(matches!(
            err,
            PslError::Download {
                kind: DownloadErrorKind::VerificationFailed,
                ..
            }
        ));
        assert!(!tmp.exists());

        let mut body: &[u8] = b"com\n";
        write_verified(&mut body, &tmp).unwrap();
        assert!(tmp.exists());

        let _ = fs::remove_file(&tmp);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_verify_suffix_list_file() {
        let dir = test_dir("domain_extractor_test_fetch_verify");
        let good = dir.join("good.dat");
        let bad = dir.join("bad.dat");
        fs::write(&good, "// header\ncom\n").unwrap();
        fs::write(&bad, "// only comments\n\n").unwrap();

        assert!(verify_suffix_list_file(&good).is_ok());
        match verify_suffix_list_file(&bad) {
            Err(PslError::Download { kind, .. }) => {
                assert_eq!(kind, DownloadErrorKind::VerificationFailed)
            }
            other => panic!("expected VerificationFailed, got {:?}", other),
        }

        let _ = fs::remove_file(&good);
        let _ = fs::remove_file(&bad);
        let _ = fs::remove_dir(&dir);
    }
}
