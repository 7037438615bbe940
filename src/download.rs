// Downloader: turns one search result into a file on disk.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::api::SearchResult;
use crate::error::{Error, Result};
use crate::model::ImageSize;

const CHUNK_SIZE: usize = 64 * 1024;

/// Fetches the image described by a task and stores it at `task.path()`.
/// Implementations must be shareable across worker threads.
pub trait ImageDownloader {
    fn download(&self, task: &DownloadTask) -> Result<PathBuf>;
}

/// Everything needed to fetch and store one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// 1-based position of the result in the search response.
    pub position: usize,
    pub id: String,
    pub file_name: String,
    pub url: String,
    pub folder: PathBuf,
}

/// `<slug>-<position>-<id>.jpg`
pub fn file_name(slug: &str, position: usize, id: &str) -> String {
    format!("{}-{}-{}.jpg", slug, position, id)
}

impl DownloadTask {
    pub fn new(
        slug: &str,
        position: usize,
        result: &SearchResult,
        size: ImageSize,
        folder: &Path,
    ) -> Self {
        DownloadTask {
            position,
            id: result.id.clone(),
            file_name: file_name(slug, position, &result.id),
            url: result.url_for(size).to_string(),
            folder: folder.to_path_buf(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }
}

/// Downloader backed by a blocking reqwest client.
#[derive(Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new(client: Client) -> Self {
        HttpDownloader { client }
    }
}

impl ImageDownloader for HttpDownloader {
    /// Create the target folder if needed, GET the image and stream it to
    /// disk chunk by chunk. A failed download may leave a partial file.
    fn download(&self, task: &DownloadTask) -> Result<PathBuf> {
        fs::create_dir_all(&task.folder).map_err(|source| Error::Io {
            path: task.folder.clone(),
            source,
        })?;

        let mut res = self
            .client
            .get(&task.url)
            .send()
            .map_err(|e| Error::network(&task.url, e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::network(&task.url, format!("HTTP {}", status)));
        }
        if status == StatusCode::NO_CONTENT || res.content_length() == Some(0) {
            return Err(Error::Protocol(format!("{} returned no body", task.url)));
        }

        let path = task.path();
        let mut file = File::create(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let written = copy_body(&mut res, &mut file, &task.url, &path)?;

        debug!("wrote {} bytes to {}", written, path.display());
        Ok(path)
    }
}

/// Copy `reader` into `writer` in fixed-size chunks. Read failures are
/// reported as network errors, write failures as I/O errors on `path`.
fn copy_body<R, W>(reader: &mut R, writer: &mut W, url: &str, path: &Path) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::network(url, e)),
        };
        writer.write_all(&buf[..n]).map_err(io_err)?;
        written += n as u64;
    }
    writer.flush().map_err(io_err)?;

    Ok(written)
}
