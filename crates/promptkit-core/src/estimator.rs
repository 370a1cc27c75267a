//! Storage cost estimates for saved prompts.
//!
//! Flat rate per kilobyte with a one-unit minimum, quoted in the network's currency.

const COST_PER_KB: f64 = 0.0001;

/// Estimated cost of storing `size_bytes` bytes.
pub fn estimate_storage_cost(size_bytes: usize) -> f64 {
    let size_kb = size_bytes as f64 / 1024.0;
    COST_PER_KB.max(size_kb * COST_PER_KB)
}

/// Format a cost with six decimals, e.g. `0.000100`.
pub fn format_cost(cost: f64) -> String {
    format!("{cost:.6}")
}

/// Human-readable byte size.
pub fn format_bytes(n: u64) -> String {
    if n >= 1_048_576 {
        format!("{:.1} MB", n as f64 / 1_048_576.0)
    } else if n >= 1024 {
        format!("{:.1} KB", n as f64 / 1024.0)
    } else {
        format!("{n} B")
    }
}
