use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use byte_unit::{Byte, UnitType};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use utilbelt::line_count::count_lines_with_capacity;
use utilbelt::{failure, grid, http, Prompter};

/// Reads larger than this are refused, the buffer is allocated up front.
const MAX_BUFFER_SIZE: u64 = 64 * 1024 * 1024;

/// The `confirm` exit status when no answer could be obtained, 1 meaning "no".
const CONFIRM_FAILED: u8 = 2;

/// A handful of small utilities: count lines, fetch URLs, ask questions.
#[derive(Debug, Parser, Clone)]
#[command(name = "utilbelt", version)]
struct Opt {
    /// Increase the log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, Clone)]
enum Command {
    /// Count the `\n` bytes of files, where the special minus (-) path reads stdin.
    Count {
        #[arg(default_value = "-")]
        files: Vec<PathBuf>,

        /// The size of the reads issued on each file, at most 64 MiB.
        #[arg(long, default_value = "32 KiB")]
        buffer_size: Byte,
    },

    /// Download an image and save it to a file.
    Download {
        #[arg(long)]
        url: String,

        #[arg(long)]
        output: PathBuf,
    },

    /// Send an HTTP request and print the response body.
    Request {
        #[arg(long)]
        url: String,

        #[arg(long, default_value = "GET")]
        method: String,

        /// A header to send, written as `Name: value`. Can be repeated.
        #[arg(long = "header", value_name = "HEADER")]
        headers: Vec<String>,

        /// The request body.
        #[arg(long)]
        data: Option<String>,
    },

    /// Print the home directory of the current user.
    Home,

    /// Print the local IPv4 address used for outbound traffic.
    Ip,

    /// Ask a yes/no question, exiting with 0 on yes, 1 on no and 2 when no valid answer was given.
    Confirm {
        question: String,

        /// The number of invalid answers tolerated before giving up.
        #[arg(long, default_value_t = 3)]
        attempts: usize,
    },

    /// Ask a question and print the answer.
    Input { question: String },

    /// Print every `row,col` pair of a grid.
    Grid {
        #[arg(long)]
        height: usize,

        #[arg(long)]
        width: usize,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn open(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    if path == Path::new("-") {
        Ok(Box::new(io::stdin()))
    } else {
        let file = failure::return_on_error(format!("Error Opening File {:?}", path), File::open(path))?;
        Ok(Box::new(file))
    }
}

fn count(files: &[PathBuf], buffer_size: Byte) -> anyhow::Result<()> {
    if buffer_size.as_u64() > MAX_BUFFER_SIZE {
        anyhow::bail!("Buffer size {} exceeds the 64 MiB limit", buffer_size);
    }
    let capacity =
        usize::try_from(buffer_size.as_u64()).context("Buffer size does not fit in memory")?;
    let mut total = 0;
    for path in files {
        let reader = open(path)?;
        let count = count_lines_with_capacity(reader, capacity)
            .with_context(|| format!("Error Counting Lines of {:?}", path))?;
        println!("{}\t{}", count, path.display());
        total += count;
    }
    if files.len() > 1 {
        println!("{}\ttotal", total);
    }
    Ok(())
}

fn download(url: &str, output: &Path) -> anyhow::Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {bytes} ({bytes_per_sec}) {msg}")?);
    pb.set_message(url.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = http::download_image_with_progress(&http::agent(), url, output, &pb);
    pb.finish_and_clear();
    let download = result?;
    if let Some(mime) = download.mime.filter(|mime| !mime.matches_path(&download.path)) {
        warn!(
            path = %download.path.display(),
            mime = mime.as_str(),
            "the output extension does not match the image type, expected .{}",
            mime.extension()
        );
    }

    let size = Byte::from_u64(download.bytes).get_appropriate_unit(UnitType::Binary);
    match download.mime {
        Some(mime) => println!("Saved {} ({:.1}, {})", download.path.display(), size, mime.as_str()),
        None => println!("Saved {} ({:.1})", download.path.display(), size),
    }
    Ok(())
}

fn request(url: &str, method: &str, headers: &[String], data: Option<&str>) -> anyhow::Result<()> {
    let mut request = http::agent().request(method, url);
    for header in headers {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("Invalid header {:?}, expected `Name: value`", header))?;
        request = request.set(name.trim(), value.trim());
    }

    let body = http::send_request(request, data.map(str::as_bytes))?;
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", String::from_utf8_lossy(&body)),
    }
    Ok(())
}

fn run(opt: Opt) -> anyhow::Result<ExitCode> {
    match opt.command {
        Command::Count { files, buffer_size } => count(&files, buffer_size)?,
        Command::Download { url, output } => download(&url, &output)?,
        Command::Request { url, method, headers, data } => {
            request(&url, &method, &headers, data.as_deref())?
        }
        Command::Home => println!("{}", utilbelt::home_dir()?.display()),
        Command::Ip => match utilbelt::local_ip().context("Failed to Get Inet Address")? {
            Some(ip) => println!("{}", ip),
            None => println!(),
        },
        Command::Confirm { question, attempts } => {
            return match Prompter::stdio().with_max_attempts(attempts).confirm(&question) {
                Ok(true) => Ok(ExitCode::SUCCESS),
                Ok(false) => Ok(ExitCode::FAILURE),
                Err(e) => {
                    eprintln!("{}", failure::render(&anyhow::Error::from(e)));
                    Ok(ExitCode::from(CONFIRM_FAILED))
                }
            };
        }
        Command::Input { question } => {
            let mut answer = String::new();
            Prompter::stdio().set_from_input(&mut answer, &question)?;
            println!("{}", answer);
        }
        Command::Grid { height, width } => grid::loop_2d(height, width, |row, col| {
            println!("{},{}", row, col);
        }),
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let opt = Opt::parse();
    init_tracing(opt.verbose);

    match run(opt) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", failure::render(&e));
            ExitCode::FAILURE
        }
    }
}
