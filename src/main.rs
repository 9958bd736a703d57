use std::{env, ffi::OsString, fmt, io, process::ExitCode};

use clap::Parser;
use easyrest::{AuthConfig, Config, HeaderList};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ENV_EASYREST_BASIC: &str = "EASYREST_BASIC";
const ENV_EASYREST_COOKIE: &str = "EASYREST_COOKIE";

/// Long flags that may also be spelled with a single dash, e.g. `-header`.
const SINGLE_DASH_FLAGS: &[&str] = &["basic", "cookie", "header"];

#[derive(Parser)]
#[command(version, about = "Send a single JSON-RPC call over HTTP and print the result")]
struct Args {
    /// HTTP basic authentication, as `user:pass`.
    #[arg(long, env = ENV_EASYREST_BASIC, value_name = "USER:PASS")]
    basic: Option<String>,
    /// Cookie to send in the HTTP request.
    #[arg(long, env = ENV_EASYREST_COOKIE)]
    cookie: Option<String>,
    /// Extra HTTP header to send, may be repeated.
    ///
    /// Entries without a colon are ignored.
    #[arg(long = "header", value_name = "NAME:VALUE")]
    headers: Vec<String>,
    /// Where to POST the request. `http://` is prepended unless present.
    url: String,
    method: String,
    /// The request's `params`, as JSON.
    #[arg(allow_negative_numbers = true)]
    params: String,
    /// Anything after PARAMS is ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |it: &Option<String>| it.as_ref().map(|_| "<redacted>");
        f.debug_struct("Args")
            .field("basic", &redacted(&self.basic))
            .field("cookie", &redacted(&self.cookie))
            .field("headers", &self.headers)
            .field("url", &self.url)
            .field("method", &self.method)
            .field("params", &self.params)
            .field("rest", &self.rest)
            .finish()
    }
}

impl Args {
    fn config(&self) -> Config {
        Config {
            headers: HeaderList::from_iter(&self.headers),
            auth: AuthConfig {
                basic: self.basic.clone(),
                cookie: self.cookie.clone(),
            },
            ..Config::new(&self.url)
        }
    }
}

/// Rewrite `-basic x` / `-header=x` to their double-dash spelling.
fn expand_single_dash_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut out = Vec::new();
    let mut passthrough = false;
    for arg in args {
        let expanded = match (passthrough, arg.to_str()) {
            (false, Some("--")) => {
                passthrough = true;
                None
            }
            (false, Some(s)) => s
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-'))
                .filter(|rest| {
                    let name = rest.split_once('=').map_or(*rest, |(name, _)| name);
                    SINGLE_DASH_FLAGS.contains(&name)
                })
                .map(|_| OsString::from(format!("-{s}"))),
            _ => None,
        };
        out.push(expanded.unwrap_or(arg));
    }
    out
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match Args::try_parse_from(expand_single_dash_flags(env::args_os())) {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };
    debug!(?args);
    if !args.rest.is_empty() {
        debug!(ignored = ?args.rest, "ignoring extra arguments");
    }

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<String> {
    let params = easyrest::parse_params(&args.params)?;
    let result = easyrest::invoke(&args.config(), &args.method, params)?;
    Ok(easyrest::render_result(result.as_ref())?)
}
