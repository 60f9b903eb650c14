// Axiscope: bipolar semantic axis vectors for keyword-scored documents.
//
// This is the library root. Modules follow the pipeline from input to
// output: corpus loading, endpoint feature extraction, axis vectors, the
// batch pipeline, and table/terminal output.

pub mod config;
pub mod corpus;
pub mod error;
pub mod features;
pub mod output;
pub mod pipeline;
pub mod vectors;
