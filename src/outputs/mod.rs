//! Persistence for both pipeline stages.
//!
//! # Submodules
//!
//! - [`handoff`]: the CSV file of discovered links, written by collection and
//!   read back by extraction
//! - [`json`]: one JSON document per extracted article
//!
//! # Output Structure
//!
//! ```text
//! bbc_articles.csv          # handoff file, path given on the command line
//! json_output/
//! ├── bbc_com_culture_<title>_20250506083000.json
//! └── bbc_com_culture_<title>_20250506083002.json
//! ```

pub mod handoff;
pub mod json;
