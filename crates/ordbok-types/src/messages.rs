//! Fixed user-facing strings.

/// Shown when the submitted text is empty after trimming
pub const WORD_REQUIRED: &str = "A word is required";

/// Shown when the service answered but had no definition for the word
pub const NOT_FOUND: &str = "The word or its definition could not be found.";

/// Prefix for non-success HTTP statuses, followed by the status text
pub const SERVER_PROBLEM: &str = "A server problem occurred:";

/// Shown for malformed payloads, network failures and timeouts
pub const LOOKUP_FAILED: &str =
    "Something went wrong while looking up the word, or the definition is missing";

/// Shown while a lookup is in flight
pub const LOADING: &str = "Loading...";
