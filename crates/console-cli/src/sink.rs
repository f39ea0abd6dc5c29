//! Where the finished login URL goes: a browser tab or standard output.

use std::io::{self, Write};

use console_federation::LoginUrl;
use tracing::{info, warn};

/// Consumes a finished login URL.
pub trait LoginSink {
    /// Hand `url` over.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the URL could not be delivered at all.
    fn deliver(&mut self, url: &LoginUrl) -> io::Result<()>;
}

/// Writes the URL and a newline to a writer.
pub struct PrintSink<W> {
    out: W,
}

impl<W: Write> PrintSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> LoginSink for PrintSink<W> {
    fn deliver(&mut self, url: &LoginUrl) -> io::Result<()> {
        writeln!(self.out, "{url}")?;
        self.out.flush()
    }
}

type Opener = Box<dyn FnMut(&str) -> io::Result<()>>;

/// Opens the URL in the default browser.
///
/// With a logout URL set, that page is opened first so the new session
/// replaces any console session already open in the browser.
pub struct BrowserSink {
    logout_url: Option<String>,
    opener: Opener,
}

impl BrowserSink {
    /// Sink backed by the system browser.
    pub fn system(logout_url: Option<String>) -> Self {
        Self::with_opener(logout_url, |target| open::that(target))
    }

    pub fn with_opener(
        logout_url: Option<String>,
        opener: impl FnMut(&str) -> io::Result<()> + 'static,
    ) -> Self {
        Self {
            logout_url,
            opener: Box::new(opener),
        }
    }
}

impl LoginSink for BrowserSink {
    fn deliver(&mut self, url: &LoginUrl) -> io::Result<()> {
        if let Some(logout) = &self.logout_url {
            if let Err(e) = (self.opener)(logout) {
                warn!(error = %e, "could not open logout page, continuing");
            }
        }

        (self.opener)(url.as_str())?;
        info!("console opened in browser");
        Ok(())
    }
}
