use arcrest_datatypes::primitives::chunk_indices;
use clap::Parser;

/// Prints the 1-indexed row ranges for sending rows in batches
#[derive(Debug, Parser)]
pub struct Chunks {
    /// Total number of rows
    rows: usize,

    /// Maximum number of rows per request
    #[arg(default_value_t = 2000)]
    chunk_size: usize,
}

/// One `start-end` line per batch
pub fn plan_chunks(params: &Chunks) -> Result<String, anyhow::Error> {
    let plan = chunk_indices(params.rows, params.chunk_size)?;

    Ok(plan
        .ranges()
        .map(|range| format!("{}-{}", range.start(), range.end()))
        .collect::<Vec<_>>()
        .join("\n"))
}
