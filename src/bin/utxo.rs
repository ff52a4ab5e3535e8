//! List bitcoin unspent transaction outputs (UTXOs).

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use bitgo::prelude::*;

#[derive(Parser, Debug)]
#[command(version, about = "List the unspents of a BitGo wallet", long_about = None)]
struct Cli {
    /// BitGo API server base URL.
    #[arg(long, default_value = LOCAL_EXPRESS_URL)]
    host: String,
    /// BitGo access token.
    #[arg(long, env = "BITGO_ACCESS_TOKEN", default_value = "", hide_env_values = true)]
    token: String,
    /// Coin identifier.
    #[arg(long, default_value = DEFAULT_COIN)]
    coin: String,
    /// BitGo wallet ID.
    #[arg(long, default_value = "")]
    wallet: String,
    /// Continue from this ID as provided by nextBatchPrevId in the previous list.
    #[arg(long)]
    prev_id: Option<String>,
    /// Ignore unspents smaller than this amount of bitcoins.
    #[arg(long, default_value_t = Decimal::ZERO)]
    min_size: Decimal,
    /// Ignore unspents larger than this amount of bitcoins.
    #[arg(long, default_value_t = Decimal::ZERO)]
    max_size: Decimal,
    /// Ignore unspents confirmed at a lower block height than the given height.
    #[arg(long, default_value_t = 0)]
    min_height: u64,
    /// Ignore unspents that have fewer than the given confirmations.
    #[arg(long, default_value_t = 0)]
    min_confirms: u32,
    /// How many seconds to wait after a failed download attempt.
    #[arg(long, default_value_t = 15)]
    wait: u64,
    /// Enable debug mode.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn filter(&self) -> Result<UnspentsFilter, SdkError> {
        let satoshis = |btc: Decimal| -> Result<Option<i64>, SdkError> {
            let sat = to_satoshis(btc).map_err(|e| SdkError::Validation(e.to_string()))?;
            Ok(Some(sat).filter(|v| *v > 0))
        };

        Ok(UnspentsFilter {
            prev_id: self.prev_id.clone().filter(|id| !id.is_empty()),
            min_value: satoshis(self.min_size)?,
            max_value: satoshis(self.max_size)?,
            min_height: Some(self.min_height).filter(|v| *v > 0),
            min_confirms: Some(self.min_confirms).filter(|v| *v > 0),
        })
    }
}

/// Filter directives: `RUST_LOG` (default `info`), plus client diagnostics
/// at debug level when `--debug` is set.
fn log_directives(rust_log: Option<String>, debug: bool) -> String {
    let base = rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "info".to_string());
    if debug {
        format!("{},bitgo=debug", base)
    } else {
        base
    }
}

fn init_logging(debug: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = EnvFilter::try_new(log_directives(rust_log, debug))
        .unwrap_or_else(|_| EnvFilter::new(log_directives(None, debug)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Cancel `ctx` on SIGINT or SIGTERM (Ctrl+C elsewhere).
fn cancel_on_signal(ctx: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let (mut sigterm, mut sigint) =
                match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                    (Ok(term), Ok(int)) => (term, int),
                    (Err(e), _) | (_, Err(e)) => {
                        tracing::warn!("utxo: cannot install signal handlers: {}", e);
                        return;
                    }
                };
            tokio::select! {
                _ = sigterm.recv() => {}
                _ = sigint.recv() => {}
            }
        }

        #[cfg(not(unix))]
        {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
        }

        tracing::info!("utxo: stopping...");
        ctx.cancel();
    });
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let ctx = CancellationToken::new();
    cancel_on_signal(ctx.clone());

    let logger: Arc<dyn Logger> = if cli.debug {
        Arc::new(TracingLogger)
    } else {
        Arc::new(NoopLogger)
    };
    let client = match BitGoClient::builder()
        .base_url(&cli.host)
        .coin(&cli.coin)
        .access_token(cli.token.as_str())
        .logger(logger)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("utxo: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut query = match cli.filter() {
        Ok(filter) => filter.to_query(),
        Err(e) => {
            tracing::error!("utxo: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let retry = RetryConfig::fixed(Duration::from_secs(cli.wait));
    let mut downloaded = 0usize;
    let mut attempt = 0u32;
    loop {
        let result = client
            .wallets()
            .unspents(&ctx, &cli.wallet, &mut query, |page| {
                downloaded += page.unspents.len();
                tracing::info!("utxo: fetched {} unspents", downloaded);
                for utxo in &page.unspents {
                    println!("{:.8}", to_bitcoins(utxo.value));
                }
            })
            .await;

        let err = match result {
            Ok(()) => break,
            Err(_) if ctx.is_cancelled() => break,
            Err(e) => e,
        };
        match &err {
            SdkError::Api(e) => {
                tracing::warn!("utxo: failed to list unspents, {}: {}", e.status, e)
            }
            e => tracing::warn!("utxo: failed to list unspents: {}", e),
        }

        tracing::info!("utxo: retrying in {} seconds...", cli.wait);
        if retry.wait(attempt, &ctx).await.is_err() {
            break;
        }
        attempt = attempt.saturating_add(1);
    }
    ExitCode::SUCCESS
}
