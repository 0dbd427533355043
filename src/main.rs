use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use build_jwks::jwks::{self, JwksBuilder, DEFAULT_KEY_ID};
use build_jwks::{AlgorithmIdentifier, KeyUse};

/// Convert an RSA public key (PEM, SubjectPublicKeyInfo) into a JSON Web Key Set
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// PEM file holding the RSA public key
    input: PathBuf,

    /// Destination of the JWKS document
    output: PathBuf,

    /// Key identifier written to the `kid` member
    #[arg(long, default_value = DEFAULT_KEY_ID)]
    kid: String,

    /// Use the RFC 7638 SHA-256 thumbprint of the key as `kid`
    #[arg(long, conflicts_with = "kid")]
    kid_thumbprint: bool,

    /// RSA algorithm written to the `alg` member (RS256, RS384, RS512, PS256, PS384, PS512)
    #[arg(long, default_value = "RS256")]
    alg: AlgorithmIdentifier,

    /// Intended use of the key
    #[arg(long = "use", value_enum, default_value_t = UseArg::Sig)]
    key_use: UseArg,

    /// Don't echo the document to standard output
    #[arg(short, long)]
    quiet: bool,

    /// Log each step to standard error
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UseArg {
    /// Signature verification
    Sig,
    /// Encryption
    Enc,
}

impl From<UseArg> for KeyUse {
    fn from(value: UseArg) -> Self {
        match value {
            UseArg::Sig => KeyUse::Signature,
            UseArg::Enc => KeyUse::Encryption,
        }
    }
}

impl Args {
    fn builder(&self) -> JwksBuilder {
        let builder = JwksBuilder::default()
            .algorithm(self.alg)
            .key_use(self.key_use.into());

        if self.kid_thumbprint {
            builder.thumbprint_key_id()
        } else {
            builder.key_id(self.kid.clone())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={default}", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let rendered = jwks::run(&args.input, &args.output, &args.builder()).with_context(|| {
        format!(
            "failed to build JWKS from {} into {}",
            args.input.display(),
            args.output.display()
        )
    })?;

    if !args.quiet {
        println!("{rendered}");
    }

    Ok(())
}
