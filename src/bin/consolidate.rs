//! Consolidate the unspents currently held in a wallet to a smaller number.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use bitgo::prelude::*;

#[derive(Parser, Debug)]
#[command(version, about = "Consolidate the unspents held in a BitGo wallet", long_about = None)]
struct Cli {
    /// BitGo Express API server base URL.
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
    /// Passphrase of the wallet.
    #[arg(long, default_value = "")]
    passphrase: String,
    /// Number of outputs created by the consolidation transaction.
    #[arg(long, default_value_t = 1)]
    target: u32,
    /// Number of unspents to select (max is 200).
    #[arg(long, default_value_t = 25)]
    limit: u32,
    /// Ignore unspents smaller than this amount of bitcoins.
    #[arg(long, default_value_t = Decimal::ZERO)]
    min_value: Decimal,
    /// Ignore unspents larger than this amount of bitcoins.
    #[arg(long, default_value_t = Decimal::ZERO)]
    max_value: Decimal,
    /// The minimum height of unspents on the block chain to use.
    #[arg(long, default_value_t = 0)]
    min_height: u64,
    /// The desired fee rate for the transaction in satoshis/KB.
    #[arg(long, default_value_t = 0)]
    fee_rate: u64,
    /// Fee rate is chosen by targeting a confirmation in this number of blocks
    /// (BTC only, fee-rate takes precedence if also set).
    #[arg(long, default_value_t = 0)]
    fee_tx_confirm_target: u32,
    /// Maximum percentage of an unspent's value to be used for fees. Cannot be combined with min-value.
    #[arg(long, default_value_t = 0)]
    max_fee_percentage: u32,
    /// The required number of confirmations for each transaction input.
    #[arg(long, default_value_t = 0)]
    min_confirms: u32,
    /// Apply the required confirmations set in min-confirms for change outputs.
    #[arg(long)]
    enforce_min_confirms_for_change: bool,
    /// Maximum number of consolidation iterations to perform.
    #[arg(long, default_value_t = 1)]
    max_iter: u32,
    /// Enable debug mode.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn params(&self) -> Result<ConsolidateParams, SdkError> {
        let satoshis = |btc: Decimal| -> Result<Option<i64>, SdkError> {
            let sat = to_satoshis(btc).map_err(|e| SdkError::Validation(e.to_string()))?;
            Ok(Some(sat).filter(|v| *v > 0))
        };
        let positive = |v: u32| Some(v).filter(|v| *v > 0);

        Ok(ConsolidateParams {
            wallet_passphrase: Some(self.passphrase.clone()).filter(|p| !p.is_empty()),
            num_unspents_to_make: positive(self.target),
            limit: positive(self.limit),
            min_value: satoshis(self.min_value)?,
            max_value: satoshis(self.max_value)?,
            min_height: Some(self.min_height).filter(|v| *v > 0),
            fee_rate: Some(self.fee_rate).filter(|v| *v > 0),
            fee_tx_confirm_target: positive(self.fee_tx_confirm_target),
            max_fee_percentage: positive(self.max_fee_percentage),
            min_confirms: positive(self.min_confirms),
            enforce_min_confirms_for_change: Some(true)
                .filter(|_| self.enforce_min_confirms_for_change),
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
                        tracing::warn!("consolidate: cannot install signal handlers: {}", e);
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

        tracing::info!("consolidate: stopping...");
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
            tracing::error!("consolidate: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let params = match cli.params() {
        Ok(params) => params,
        Err(e) => {
            tracing::error!("consolidate: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for _ in 0..cli.max_iter {
        match client.wallets().consolidate(&ctx, &cli.wallet, Some(&params)).await {
            Ok(tx) => println!("{}", tx.txid),
            Err(_) if ctx.is_cancelled() => break,
            Err(SdkError::Api(e)) => {
                tracing::error!("consolidate: failed to coalesce unspents, {}: {}", e.status, e);
                return ExitCode::FAILURE;
            }
            Err(e) => {
                tracing::error!("consolidate: failed to coalesce unspents: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_defaults_send_target_and_limit_only() {
        let cli = Cli::parse_from(["consolidate", "--wallet", "w"]);
        let params = cli.params().unwrap();
        assert_eq!(
            params,
            ConsolidateParams {
                num_unspents_to_make: Some(1),
                limit: Some(25),
                ..Default::default()
            }
        );
        assert_eq!(cli.max_iter, 1);
        assert_eq!(cli.host, "http://0.0.0.0:3080");
    }

    #[test]
    fn test_bitcoin_flags_convert_to_satoshis() {
        let cli = Cli::parse_from([
            "consolidate",
            "--min-value",
            "0.0001",
            "--max-value",
            "1.5",
            "--enforce-min-confirms-for-change",
        ]);
        let params = cli.params().unwrap();
        assert_eq!(params.min_value, Some(10_000));
        assert_eq!(params.max_value, Some(150_000_000));
        assert_eq!(params.enforce_min_confirms_for_change, Some(true));
    }

    #[test]
    fn test_debug_flag_enables_client_diagnostics() {
        let cli = Cli::parse_from(["consolidate", "--debug"]);
        let directives = log_directives(None, cli.debug);
        assert_eq!(directives, "info,bitgo=debug");
        let filter = EnvFilter::try_new(&directives).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_directives_without_debug() {
        assert_eq!(log_directives(None, false), "info");
        assert_eq!(log_directives(Some("  ".into()), false), "info");
        assert_eq!(log_directives(Some("warn".into()), true), "warn,bitgo=debug");
        let filter = EnvFilter::try_new(log_directives(None, false)).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
