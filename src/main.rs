use likely_subtags::data::sample;
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("likely_subtags=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // diagnostics are logged as they are recorded
    let report = sample::builder().build()?;

    for (source, target) in report.likely.iter() {
        println!("{source}\t→\t{target}");
    }

    println!();
    for (maximal, minimal) in report.minimal.iter() {
        println!("{maximal}\t←\t{minimal}");
    }

    info!(
        entries = report.likely.len(),
        pruned = report.pruned.len(),
        diagnostics = report.diagnostics.len(),
        "done"
    );
    Ok(())
}
