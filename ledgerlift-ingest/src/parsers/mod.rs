pub mod statement_text;

pub use statement_text::{
    GluedIdentifier, RawMatch, build_record, parse_statement_text, scan_matches, split_glued_identifier,
};
