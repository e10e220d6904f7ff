// Raw-content URL building
pub mod url_resolver;

// CSV download and parsing
pub mod csv_fetcher;

// Currency, number and date text
pub mod formatting;

// Load orchestration
pub mod dashboard;
