//! Logo discovery and embedding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

/// Conventional logo locations, first hit wins.
const CANDIDATES: [&str; 4] = ["logo.jpg", "logo.png", "assets/logo.jpg", "assets/logo.png"];

/// Load the brand logo as a base64 string for inline embedding in the card.
///
/// Returns the empty string when no logo file is present; the composer
/// renders a blank placeholder in that case.
pub fn load_logo() -> String {
    load_logo_from(CANDIDATES.iter().map(Path::new))
}

/// Try each candidate path in order and base64-encode the first readable one.
pub fn load_logo_from<'a, I>(candidates: I) -> String
where
    I: IntoIterator<Item = &'a Path>,
{
    for candidate in candidates {
        if let Ok(bytes) = fs::read(candidate) {
            println!("  Logo loaded: {}", candidate.display());
            return STANDARD.encode(bytes);
        }
    }
    eprintln!("  WARNING: No logo file found");
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_candidates_yield_empty_string() {
        let missing = Path::new("/nonexistent/logo.jpg");
        assert_eq!(load_logo_from([missing]), "");
    }

    #[test]
    fn first_readable_candidate_is_encoded() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"jpeg bytes").unwrap();

        let missing = Path::new("/nonexistent/logo.jpg");
        let encoded = load_logo_from([missing, file.path()]);
        assert_eq!(encoded, STANDARD.encode(b"jpeg bytes"));
    }
}
