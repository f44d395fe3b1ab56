mod resolve;
mod table;

// Only used by the CLI integration tests
use assert_cmd as _;
use predicates as _;
