pub mod diff;
pub mod output;
pub mod sample;
pub mod simulate;
pub mod snapshot;
