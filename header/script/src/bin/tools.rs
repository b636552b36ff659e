//! Operator tools for rollkit headers.
//!
//! Headers are read from files in their canonical binary encoding, except for
//! `from-json` which reads the JSON form.
//!
//! ```shell
//! RUST_LOG=debug cargo run --bin rollkit-header-tools -- --cmd verify \
//!     --trusted trusted.bin --input candidate.bin
//! ```
use clap::Parser;
use eyre::{bail, WrapErr};
use rollkit_types::Header;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

// The arguments for the command.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// One of: inspect, validate, verify, vote, from-json, to-json
    #[clap(long)]
    cmd: String,

    #[clap(long)]
    input: String,

    /// Trusted header to verify the input against
    #[clap(long, env = "TRUSTED_HEADER")]
    trusted: Option<String>,

    #[clap(long)]
    output: Option<String>,
}

fn read_header(path: &str) -> eyre::Result<Header> {
    let bytes = fs::read(path).wrap_err_with(|| format!("Failed to read {}", path))?;
    Header::unmarshal_binary(&bytes).wrap_err_with(|| format!("Failed to decode header {}", path))
}

fn write_or_print(
    output: Option<&str>,
    bytes: &[u8],
    printable: impl FnOnce() -> String,
) -> eyre::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, bytes).wrap_err_with(|| format!("Failed to write {}", path))?;
            info!(path, len = bytes.len(), "wrote output");
        }
        None => println!("{}", printable()),
    }
    Ok(())
}

fn inspect(header: &Header) -> eyre::Result<()> {
    let time = header.tm_time()?;

    println!("hash:              {}", header.hash());
    println!("chain id:          {}", header.chain_id());
    println!("height:            {}", header.height());
    println!("time:              {}", time);
    println!(
        "version:           block={} app={}",
        header.version.block, header.version.app
    );
    println!("last header hash:  {}", header.last_header_hash);
    println!("last commit hash:  {}", header.last_commit_hash);
    println!("data hash:         {}", header.data_hash);
    println!("consensus hash:    {}", header.consensus_hash);
    println!("app hash:          {}", header.app_hash);
    println!("validator hash:    {}", header.validator_hash);
    println!("last results hash: {}", header.last_results_hash);
    println!(
        "proposer address:  {}",
        hex::encode_upper(&header.proposer_address)
    );
    Ok(())
}

fn main() -> eyre::Result<()> {
    // Setup logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    // Load env variables.
    dotenv::dotenv().ok();

    // Parse the command line arguments.
    let args = Args::parse();
    let output = args.output.as_deref();

    match args.cmd.as_str() {
        "inspect" => {
            let header = read_header(&args.input)?;
            inspect(&header)?;
        }
        "validate" => {
            let header = read_header(&args.input)?;
            header
                .validate_basic()
                .wrap_err_with(|| format!("Header at height {} is invalid", header.height()))?;
            info!(height = header.height(), "header is valid");
        }
        "verify" => {
            let Some(trusted_path) = args.trusted.as_deref() else {
                bail!("verify requires --trusted");
            };
            let trusted = read_header(trusted_path)?;
            let untrusted = read_header(&args.input)?;
            untrusted.validate_basic()?;
            trusted.verify(&untrusted).wrap_err_with(|| {
                format!(
                    "Header at height {} failed verification against trusted height {}",
                    untrusted.height(),
                    trusted.height()
                )
            })?;
            info!(
                trusted = trusted.height(),
                untrusted = untrusted.height(),
                "header verified"
            );
        }
        "vote" => {
            let header = read_header(&args.input)?;
            let sign_bytes = header.make_cometbft_vote()?;
            write_or_print(output, &sign_bytes, || hex::encode(&sign_bytes))?;
        }
        "from-json" => {
            let json = fs::read_to_string(&args.input)
                .wrap_err_with(|| format!("Failed to read {}", args.input))?;
            let header: Header =
                serde_json::from_str(&json).wrap_err("Failed to parse header JSON")?;
            let bytes = header.marshal_binary();
            write_or_print(output, &bytes, || hex::encode(&bytes))?;
        }
        "to-json" => {
            let header = read_header(&args.input)?;
            let json = serde_json::to_string_pretty(&header)?;
            write_or_print(output, json.as_bytes(), || json.clone())?;
        }
        other => bail!("Unknown command: {}", other),
    }

    Ok(())
}
