use anyhow::{Context, Result};
use clap::Parser;
use ossec_qpack::{
    cli::Cli,
    query_pack::{PackConfig, QueryPack},
    rootkit_db::RootkitDb,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    // The database is read in full before the output is touched, so a bad
    // input never clobbers an existing pack
    let db = RootkitDb::from_file(&args.input).context("Failed to load rootkit database")?;

    for entry in &db.skipped {
        println!("{}", entry);
    }

    let config = PackConfig {
        interval: args.interval,
        ..PackConfig::default()
    };
    let pack = QueryPack::from_file_map(&db.files, &config);

    pack.write_to(&args.output)
        .context("Failed to write query pack")?;

    Ok(())
}
