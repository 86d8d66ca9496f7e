mod commands;
mod context;

use std::env;
use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use verdant_core::{ActionError, NoticeKind};

use commands::UsageError;
use context::Data;

const DEFAULT_LOG_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();

    // Load the .env file
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((name, rest)) = args.split_first() else {
        commands::help::help();
        return Ok(ExitCode::from(2));
    };

    let Some(meta) = commands::find(name) else {
        report_usage(&UsageError {
            usage: commands::help::META.usage,
            message: format!("unknown command `{}`", name),
        });
        return Ok(ExitCode::from(2));
    };
    debug!(command = meta.name, "running command");

    if !meta.needs_backend {
        return Ok(run_offline(meta.name, rest));
    }

    let data = Data::from_env()?;
    match commands::run_networked(meta.name, rest, &data).await {
        Ok(Ok(())) => Ok(ExitCode::SUCCESS),
        Ok(Err(err)) => {
            report_action_error(&err);
            Ok(ExitCode::SUCCESS)
        }
        Err(usage) => {
            report_usage(&usage);
            Ok(ExitCode::from(2))
        }
    }
}

fn run_offline(name: &str, args: &[String]) -> ExitCode {
    match name {
        "level" => match commands::level::parse(args) {
            Ok(points) => {
                commands::level::level(points);
                ExitCode::SUCCESS
            }
            Err(usage) => {
                report_usage(&usage);
                ExitCode::from(2)
            }
        },
        _ => {
            commands::help::help();
            ExitCode::SUCCESS
        }
    }
}

fn report_usage(usage: &UsageError) {
    eprintln!("error: {}", usage.message);
    eprintln!("usage: {}", usage.usage);
}

/// Failed actions are shown as notices; they never fail the process.
fn report_action_error(err: &ActionError) {
    let notice = err.notice();
    match notice.kind {
        NoticeKind::LoginPrompt => {
            info!("action needs a viewer identity");
            eprintln!("{} (set VERDANT_VIEWER_ID)", notice.message);
        }
        NoticeKind::Error => {
            error!(?err, "action failed");
            eprintln!("{}", notice.message);
        }
    }
    if err.is_retryable_by_user() {
        debug!("action may be retried manually");
    }
}
