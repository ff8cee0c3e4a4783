// NEO Explorer - Core Library
// Near-Earth objects, their close approaches, and CSV/JSON export

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod export;
pub mod filters;
pub mod logging;
pub mod parser;
pub mod temporal;

// Re-export commonly used types
pub use config::Config;
pub use db::NeoDatabase;
pub use entities::{
    ApproachId, CloseApproach, LinkedApproach, NearEarthObject, NeoId, NeoLookup, RawApproach,
    RawNeo,
};
pub use error::{NeoError, NeoResult};
pub use export::{
    write_results, write_to_csv, write_to_json, ApproachRecord, OutputFormat, CSV_FIELDNAMES,
};
pub use filters::{limit, Comparison, Filter, QueryCriteria};
pub use logging::init_logging;
pub use parser::{load_approaches, load_neos};
pub use temporal::{format_calendar_date, parse_calendar_date, parse_query_date};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
