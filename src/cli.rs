//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use screenshot_api::{CaptureOption, Cookies};

/// Capture website screenshots with the Screenshot API.
///
/// With `--output` the image is saved to a file; otherwise the raw response
/// body is written to stdout.
#[derive(Parser, Debug)]
#[command(name = "screenshot")]
#[command(author, version, about)]
pub struct Args {
    /// Website to capture
    pub url: String,

    /// Save the screenshot to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// API key (overrides SCREENSHOT_API_KEY and the config file)
    #[arg(long)]
    pub api_key: Option<String>,

    /// API endpoint (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Image type: jpg | png | pdf
    #[arg(short = 't', long = "type")]
    pub image_type: Option<String>,

    /// JPEG quality (40-99)
    #[arg(long)]
    pub quality: Option<i64>,

    /// Image width in px (100-3000)
    #[arg(long)]
    pub width: Option<i64>,

    /// Image height in px (100-3000)
    #[arg(long)]
    pub height: Option<i64>,

    /// Thumbnail width in px (50 up to the image width)
    #[arg(long)]
    pub thumb_width: Option<i64>,

    /// Retrieving mode: fast | slow
    #[arg(long)]
    pub mode: Option<String>,

    /// Scroll down before capturing
    #[arg(long)]
    pub scroll: bool,

    /// Scroll position: top | bottom
    #[arg(long)]
    pub scroll_position: Option<String>,

    /// Capture the full page
    #[arg(long)]
    pub full_page: bool,

    /// Disable JavaScript
    #[arg(long)]
    pub no_js: bool,

    /// Delay before capture in ms (0-9999)
    #[arg(long)]
    pub delay: Option<i64>,

    /// Page loading timeout in ms (1000-30000)
    #[arg(long)]
    pub timeout: Option<i64>,

    /// Device scale factor (0.5-4.0)
    #[arg(long)]
    pub scale: Option<f64>,

    /// Emulate a retina display
    #[arg(long)]
    pub retina: bool,

    /// User-Agent used by the service
    #[arg(long)]
    pub ua: Option<String>,

    /// Cookie sent with the page request, as NAME=VALUE (repeatable)
    #[arg(long = "cookie")]
    pub cookies: Vec<String>,

    /// Emulate a mobile device
    #[arg(long)]
    pub mobile: bool,

    /// Emulate a touch screen
    #[arg(long)]
    pub touch_screen: bool,

    /// Render in landscape mode
    #[arg(long)]
    pub landscape: bool,

    /// Fail when redirects change the target hostname
    #[arg(long)]
    pub fail_on_hostname_change: bool,

    /// Errors output format: JSON | XML (ignored with --output)
    #[arg(long)]
    pub errors_output_format: Option<String>,

    /// Response output format: image | base64 (ignored with --output)
    #[arg(long)]
    pub image_output_format: Option<String>,

    /// Credits to charge: SA | DRS
    #[arg(long)]
    pub credits: Option<String>,
}

impl Args {
    /// Collects the capture options requested on the command line.
    ///
    /// Values are passed through unvalidated; the client checks them.
    pub fn capture_options(&self) -> Result<Vec<CaptureOption>> {
        let mut options = Vec::new();

        let strings: [(&Option<String>, fn(String) -> CaptureOption); 7] = [
            (&self.errors_output_format, CaptureOption::ErrorsOutputFormat),
            (&self.image_output_format, CaptureOption::ImageOutputFormat),
            (&self.credits, CaptureOption::Credits),
            (&self.image_type, CaptureOption::Type),
            (&self.mode, CaptureOption::Mode),
            (&self.scroll_position, CaptureOption::ScrollPosition),
            (&self.ua, CaptureOption::Ua),
        ];
        for (value, make) in strings {
            if let Some(value) = value {
                options.push(make(value.clone()));
            }
        }

        let integers: [(Option<i64>, fn(i64) -> CaptureOption); 6] = [
            (self.quality, CaptureOption::Quality),
            (self.width, CaptureOption::Width),
            (self.height, CaptureOption::Height),
            (self.thumb_width, CaptureOption::ThumbWidth),
            (self.delay, CaptureOption::Delay),
            (self.timeout, CaptureOption::Timeout),
        ];
        options.extend(
            integers
                .into_iter()
                .filter_map(|(value, make)| value.map(make)),
        );

        if let Some(scale) = self.scale {
            options.push(CaptureOption::Scale(scale));
        }

        options.extend([
            CaptureOption::Scroll(self.scroll),
            CaptureOption::FullPage(self.full_page),
            CaptureOption::NoJs(self.no_js),
            CaptureOption::Retina(self.retina),
            CaptureOption::Mobile(self.mobile),
            CaptureOption::TouchScreen(self.touch_screen),
            CaptureOption::Landscape(self.landscape),
            CaptureOption::FailOnHostnameChange(self.fail_on_hostname_change),
        ]);

        if !self.cookies.is_empty() {
            options.push(CaptureOption::Cookies(parse_cookies(&self.cookies)?));
        }

        Ok(options)
    }
}

fn parse_cookies(raw: &[String]) -> Result<Cookies> {
    let mut cookies = Cookies::new();
    for entry in raw {
        let Some((name, value)) = entry.split_once('=') else {
            bail!("Invalid cookie '{entry}': expected NAME=VALUE");
        };
        if name.trim().is_empty() {
            bail!("Invalid cookie '{entry}': empty name");
        }
        cookies.insert(name.trim(), value);
    }
    Ok(cookies)
}
