//! Contract-address detection
//!
//! Flags text containing a standalone token shaped like a base-58 encoded address:
//! 32 to 44 characters from the base-58 alphabet (no `0`, `O`, `I` or `l`), delimited by
//! word boundaries. This is a syntactic heuristic only; a string of the right shape is
//! flagged whether or not it names a real account.

use lazy_static::lazy_static;
use regex::Regex;

/// Base-58 alphabet as a regex character class
const BASE58_CLASS: &str = "[1-9A-HJ-NP-Za-km-z]";

/// Shortest run that counts as an address
pub const MIN_ADDRESS_LEN: usize = 32;

/// Longest run that counts as an address
pub const MAX_ADDRESS_LEN: usize = 44;

lazy_static! {
    static ref DEFAULT_DETECTOR: ContractAddressDetector = ContractAddressDetector::new();
}

/// Compiled contract-address matcher
#[derive(Debug, Clone)]
pub struct ContractAddressDetector {
    pattern: Regex,
}

impl ContractAddressDetector {
    /// Compile the detector
    pub fn new() -> Self {
        // ASCII word boundaries: a non-ASCII letter next to the run still delimits it.
        let source = format!(
            r"(?-u:\b){BASE58_CLASS}{{{MIN_ADDRESS_LEN},{MAX_ADDRESS_LEN}}}(?-u:\b)"
        );
        Self {
            pattern: Regex::new(&source).expect("address pattern is a valid regex"),
        }
    }

    /// Check whether `text` contains an address-shaped token
    pub fn is_flagged(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Default for ContractAddressDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Check `text` with the shared detector
pub fn is_flagged(text: &str) -> bool {
    DEFAULT_DETECTOR.is_flagged(text)
}
