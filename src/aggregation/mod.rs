mod window;
#[cfg(test)]
mod tests;

pub use window::{rolling_counts, WindowedAggregator};
