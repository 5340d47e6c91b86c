//! Plausibility check of an assembled plate string.

use std::sync::OnceLock;

use platescan_chars::PROVINCES;
use regex::Regex;

fn plate_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        let provinces: String = PROVINCES.concat();
        let pattern = format!("^[{provinces}][A-HJ-NP-Z][A-HJ-NP-Z0-9]{{5,6}}$");
        Regex::new(&pattern)
            .map_err(|e| log::error!("plate pattern does not compile: {e}"))
            .ok()
    })
    .as_ref()
}

/// Province, then a city letter, then five (six on new-energy plates)
/// letters or digits. `I` and `O` are never valid.
pub fn is_valid_plate(plate: &str) -> bool {
    plate_regex().is_some_and(|re| re.is_match(plate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_and_new_energy_plates() {
        assert!(is_valid_plate("苏A12345"));
        assert!(is_valid_plate("京N8B3C7"));
        assert!(is_valid_plate("粤BD12345"));
    }

    #[test]
    fn rejects_malformed_plates() {
        assert!(!is_valid_plate(""));
        assert!(!is_valid_plate("A123456"));
        assert!(!is_valid_plate("苏112345"));
        assert!(!is_valid_plate("苏AO2345"));
        assert!(!is_valid_plate("苏A1234"));
        assert!(!is_valid_plate("苏A1234567"));
    }
}
