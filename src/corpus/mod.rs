// Corpus types and loaders: keyword dictionaries per axis endpoint, and the
// documents they are scored against.

pub mod documents;
pub mod keywords;
pub mod loader;
