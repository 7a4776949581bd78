//! HTTP downloads and GitHub release lookup

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::{Client, Response};

use crate::error::{AutomatorError, Result};
use crate::setup::types::GithubRelease;

const USER_AGENT: &str = concat!("fiji-automator/", env!("CARGO_PKG_VERSION"));

/// Blocking client with our user agent; GitHub rejects requests without one
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Stream `url` into `dest` with a progress bar, returning the byte count
///
/// Data lands in `<dest>.part` first and is renamed on completion, so an
/// interrupted download never leaves a truncated file under the final name.
pub fn download_file(client: &Client, url: &str, dest: &Path, label: &str) -> Result<u64> {
    log::info!("setup - Downloading {} from {}", label, url);

    let response = client.get(url).send().map_err(|e| AutomatorError::Download {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if !response.status().is_success() {
        return Err(AutomatorError::Download {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let total_size = response.content_length().unwrap_or(0);
    let pb = if total_size > 0 {
        ProgressBar::new(total_size)
    } else {
        ProgressBar::no_length()
    };
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg} [{bar:40}] {percent}% {bytes}/{total_bytes} ({bytes_per_sec})")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb.set_message(label.to_string());

    let part = part_path(dest);
    let downloaded = match write_part(response, &part, &pb, url) {
        Ok(n) => n,
        Err(e) => {
            pb.abandon();
            if let Err(rm) = fs::remove_file(&part) {
                log::debug!("setup - Could not remove {}: {}", part.display(), rm);
            }
            return Err(e);
        }
    };
    pb.finish_and_clear();
    fs::rename(&part, dest)?;

    log::info!("setup - Downloaded {} ({} bytes)", label, downloaded);
    Ok(downloaded)
}

fn write_part(response: Response, part: &Path, pb: &ProgressBar, url: &str) -> Result<u64> {
    let mut file = BufWriter::new(File::create(part)?);
    let mut reader = BufReader::new(response);
    let mut downloaded: u64 = 0;
    let mut buffer = [0u8; 131_072];

    loop {
        let n = reader.read(&mut buffer).map_err(|e| AutomatorError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if n == 0 {
            break;
        }
        file.write_all(&buffer[..n])?;
        downloaded += n as u64;
        pb.set_position(downloaded);
    }

    file.flush()?;
    Ok(downloaded)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

/// Fetch a release description from the GitHub API
pub fn fetch_release(client: &Client, api_url: &str) -> Result<GithubRelease> {
    log::debug!("setup - Querying {}", api_url);
    let response = client
        .get(api_url)
        .header("Accept", "application/vnd.github+json")
        .send()
        .map_err(|e| AutomatorError::Release(e.to_string()))?;

    if !response.status().is_success() {
        return Err(AutomatorError::Release(format!(
            "HTTP {} from {}",
            response.status(),
            api_url
        )));
    }

    response
        .json::<GithubRelease>()
        .map_err(|e| AutomatorError::Release(format!("unexpected response: {}", e)))
}
