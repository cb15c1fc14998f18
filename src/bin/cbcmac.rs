//! cbcmac CLI: compute and verify length-prepended CBC-MAC tags
//!
//! Usage:
//!   cbcmac keygen --output <file>
//!   cbcmac tag    [--key <file>] [--in <file>]
//!   cbcmac verify [--key <file>] [--in <file>] --tag <hex>
//!
//! Configuration (environment variables):
//!   CBCMAC_KEY         - Hex key, used when --key is not given
//!   CBCMAC_LOG_FORMAT  - "json" for structured logging, "pretty" for dev
//!   RUST_LOG           - Log filter (default: warn)

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use lp_cbc_mac::{CbcMac, Key, Tag};

type CliResult = Result<ExitCode, Box<dyn std::error::Error>>;

/// Exit status for a well-formed tag that does not match.
const EXIT_INVALID_TAG: u8 = 2;

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "keygen" => cmd_keygen(&args[2..]),
        "tag" => cmd_tag(&args[2..]),
        "verify" => cmd_verify(&args[2..]),
        "--help" | "-h" => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        "--version" | "-V" => {
            println!("cbcmac {}", lp_cbc_mac::VERSION);
            Ok(ExitCode::SUCCESS)
        }
        cmd => {
            eprintln!("error: unknown command '{}'", cmd);
            print_usage();
            Err("unknown command".into())
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let log_format = std::env::var("CBCMAC_LOG_FORMAT").unwrap_or_else(|_| "pretty".into());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"cbcmac — length-prepended CBC-MAC (AES-256)

USAGE:
    cbcmac <COMMAND> [OPTIONS]

COMMANDS:
    keygen      Generate a new 256-bit key (hex)
    tag         Compute the tag of a file (or stdin)
    verify      Check a tag against a file (or stdin)

EXAMPLES:
    # Generate key
    cbcmac keygen --output mac.key

    # Compute tag
    cbcmac tag --key mac.key --in message.bin

    # Verify (exit status 0 = valid, 2 = invalid)
    cbcmac verify \
        --key mac.key \
        --in message.bin \
        --tag a51d7ed83b9e4037cf8da336f7a46881

OPTIONS:
    -k, --key <FILE>     Hex key file
    -i, --in <FILE>      Message file (default: stdin; --input also accepted)
    -t, --tag <HEX>      Tag to verify
    -o, --output <FILE>  Key output file (keygen)
    -h, --help           Print help
    -V, --version        Print version

ENVIRONMENT:
    CBCMAC_KEY          Hex key used when --key is omitted
    CBCMAC_LOG_FORMAT   "json" or "pretty"
    RUST_LOG            Log filter
"#
    );
}

#[derive(Default)]
struct Options {
    key_path: Option<PathBuf>,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    tag: Option<String>,
}

fn parse_options(args: &[String]) -> Result<Options, Box<dyn std::error::Error>> {
    let mut opts = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--key" | "-k" => {
                i += 1;
                opts.key_path = Some(PathBuf::from(args.get(i).ok_or("missing key path")?));
            }
            "--in" | "--input" | "-i" => {
                i += 1;
                opts.input_path = Some(PathBuf::from(args.get(i).ok_or("missing input path")?));
            }
            "--output" | "-o" => {
                i += 1;
                opts.output_path = Some(PathBuf::from(args.get(i).ok_or("missing output path")?));
            }
            "--tag" | "-t" => {
                i += 1;
                opts.tag = Some(args.get(i).ok_or("missing tag")?.clone());
            }
            _ => return Err(format!("unknown option: {}", args[i]).into()),
        }
        i += 1;
    }

    Ok(opts)
}

/// Key file (hex) if given, else `CBCMAC_KEY`.
fn load_key(opts: &Options) -> Result<Key, Box<dyn std::error::Error>> {
    let hex_key = match opts.key_path {
        Some(ref path) => {
            tracing::debug!(path = %path.display(), "loading key file");
            zeroize::Zeroizing::new(fs::read_to_string(path)?)
        }
        None => zeroize::Zeroizing::new(
            std::env::var("CBCMAC_KEY").map_err(|_| "missing --key (or CBCMAC_KEY)")?,
        ),
    };
    Ok(Key::from_hex(&hex_key)?)
}

fn read_message(opts: &Options) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let message = if let Some(ref path) = opts.input_path {
        fs::read(path)?
    } else {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    };
    tracing::debug!(bytes = message.len(), "read message");
    Ok(message)
}

fn cmd_keygen(args: &[String]) -> CliResult {
    let opts = parse_options(args)?;
    let output_path = opts.output_path.ok_or("missing --output")?;

    let key = Key::generate()?;
    let encoded = zeroize::Zeroizing::new(key.to_hex());
    fs::write(&output_path, encoded.as_bytes())?;

    // Restrict key permissions (Unix only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&output_path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&output_path, perms)?;
    }

    tracing::info!(path = %output_path.display(), "generated key");
    eprintln!("Generated key: {} (mode 600)", output_path.display());

    Ok(ExitCode::SUCCESS)
}

fn cmd_tag(args: &[String]) -> CliResult {
    let opts = parse_options(args)?;
    let mac = CbcMac::new(load_key(&opts)?);
    let message = read_message(&opts)?;

    println!("{}", mac.compute(&message));

    Ok(ExitCode::SUCCESS)
}

fn cmd_verify(args: &[String]) -> CliResult {
    let opts = parse_options(args)?;
    let tag = Tag::from_hex(opts.tag.as_deref().ok_or("missing --tag")?)?;
    let mac = CbcMac::new(load_key(&opts)?);
    let message = read_message(&opts)?;

    if mac.verify(&tag, &message) {
        println!("valid");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("invalid");
        Ok(ExitCode::from(EXIT_INVALID_TAG))
    }
}
