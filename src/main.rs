use std::io::{self, Write};

use anyhow::Result;
use arrow::util::pretty::pretty_format_batches;
use tracing_subscriber::EnvFilter;

use flexfun::SampleFlexFunction;
use flexfun::model::config::Settings;
use flexfun::plugin::{FunctionDescriptor, FunctionRuntime, Invocation, ServerContext};

const DEFAULT_LOG_FILTER: &str = "flexfun=info";

fn main() -> Result<()> {
    let settings = Settings::load()?;

    // Initialize logging to file (stdout carries the results)
    let log_dir = directories::ProjectDirs::from("", "", "flexfun")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from("/tmp"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "flexfun.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = settings
        .get_str("logging.filter")
        .unwrap_or(DEFAULT_LOG_FILTER);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::try_new(filter)?)
        .init();

    tracing::info!("flexfun starting");
    for name in settings.ignored_vars() {
        tracing::warn!("ignoring malformed settings variable {name}");
    }

    let ctx = ServerContext::new(settings);
    let mut runtime = FunctionRuntime::<SampleFlexFunction>::new();
    runtime.load(&ctx)?;

    let mut out = io::stdout().lock();
    list_function(&mut out, runtime.descriptor())?;

    let batch = runtime.invoke(&invocation_from_args(std::env::args().skip(1)))?;
    writeln!(out, "{}", pretty_format_batches(&[batch])?)?;

    Ok(())
}

/// Any arguments are the column hint.
fn invocation_from_args(args: impl IntoIterator<Item = String>) -> Invocation {
    let columns: Vec<String> = args.into_iter().collect();
    if columns.is_empty() {
        Invocation::default()
    } else {
        Invocation::default().with_columns(columns)
    }
}

fn list_function(out: &mut impl Write, descriptor: &FunctionDescriptor) -> Result<()> {
    writeln!(out, "Function name  : {}", descriptor.name())?;
    writeln!(
        out,
        "Descriptor     : {}",
        String::from_utf8_lossy(&descriptor.command())
    )?;
    writeln!(out, "Function result:")?;
    for field in descriptor.schema().fields() {
        writeln!(out, "  {}: {}", field.name(), field.data_type())?;
    }
    Ok(())
}
