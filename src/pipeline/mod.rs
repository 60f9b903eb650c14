// Batch pipeline: keyword corpus + documents -> every output table.

pub mod run;
