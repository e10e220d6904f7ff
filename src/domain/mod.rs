// Domain-specific error types
pub mod errors;

// Number and date conventions
pub mod locale;

// Port interfaces (transport and presentation)
pub mod ports;

// CSV row records
pub mod records;
