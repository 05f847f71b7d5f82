//! Blocking HTTP helpers built on a shared [`ureq::Agent`].

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use indicatif::ProgressBar;
use tracing::{debug, warn};
use ureq::{Agent, AgentBuilder, Request};

use crate::mime::ImageMime;

const USER_AGENT: &str = concat!("utilbelt/", env!("CARGO_PKG_VERSION"));

/// Builds the agent used by the helpers below.
pub fn agent() -> Agent {
    AgentBuilder::new().timeout(Duration::from_secs(30)).user_agent(USER_AGENT).build()
}

/// Sends a prepared request and returns the whole response body.
///
/// A response with an error status is still a response: its body is returned and
/// only transport failures are reported as errors.
pub fn send_request(request: Request, body: Option<&[u8]>) -> anyhow::Result<Vec<u8>> {
    let url = request.url().to_string();
    let result = match body {
        Some(body) => request.send_bytes(body),
        None => request.call(),
    };

    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            warn!(%url, code, "request answered with an error status");
            response
        }
        Err(e) => return Err(e).context("Error Getting HTTP Response"),
    };
    debug!(%url, status = response.status(), "received response");

    let mut data = Vec::new();
    response.into_reader().read_to_end(&mut data).context("Error Parsing Response")?;
    Ok(data)
}

/// What [`download_image`] left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub path: PathBuf,
    pub bytes: u64,
    pub mime: Option<ImageMime>,
}

/// Downloads `url` into a newly created file at `path`.
pub fn download_image(agent: &Agent, url: &str, path: impl AsRef<Path>) -> anyhow::Result<Download> {
    download_image_with_progress(agent, url, path, &ProgressBar::hidden())
}

/// Same as [`download_image`], reporting the transferred bytes on `pb`.
///
/// The body is streamed to the file, so arbitrarily large images never sit in memory.
pub fn download_image_with_progress(
    agent: &Agent,
    url: &str,
    path: impl AsRef<Path>,
    pb: &ProgressBar,
) -> anyhow::Result<Download> {
    let path = path.as_ref();
    let response = agent.get(url).call().context("Error Getting Image")?;

    let mime = match response.header("Content-Type") {
        Some(content_type) => {
            let mime = ImageMime::from_content_type(content_type);
            if mime.is_none() {
                warn!(%url, content_type, "downloaded content does not look like an image");
            }
            mime
        }
        None => None,
    };
    if let Some(length) = response.header("Content-Length").and_then(|l| l.parse().ok()) {
        pb.set_length(length);
    }

    let mut file = File::create(path).context("Error Creating File")?;
    let mut reader = pb.wrap_read(response.into_reader());
    let bytes = io::copy(&mut reader, &mut file).context("Error Saving Image File")?;
    debug!(%url, path = %path.display(), bytes, "image saved");

    Ok(Download { path: path.to_path_buf(), bytes, mime })
}
