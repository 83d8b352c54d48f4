use chrono::{DateTime, TimeZone};

use crate::ai::RefinedNote;

pub const DOWNLOAD_CONTENT_TYPE: &str = "text/markdown";

const FILE_PREFIX: &str = "catatan_rapi_";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// `catatan_rapi_<YYYY-MM-DD_HH-MM>.md` for the given moment.
pub fn download_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}{}.md", FILE_PREFIX, at.format(TIMESTAMP_FORMAT))
}

/// Exactly the previewed text, as UTF-8.
pub fn download_bytes(note: &RefinedNote) -> Vec<u8> {
    note.content.as_bytes().to_vec()
}

pub fn content_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{}\"", file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Utc};

    #[test]
    fn file_name_uses_minute_precision() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 59).unwrap();
        assert_eq!(download_file_name(&at), "catatan_rapi_2025-03-07_09-05.md");
    }

    #[test]
    fn file_name_matches_the_download_pattern() {
        let name = download_file_name(&Local::now());
        let pattern =
            regex::Regex::new(r"^catatan_rapi_\d{4}-\d{2}-\d{2}_\d{2}-\d{2}\.md$").unwrap();
        assert!(pattern.is_match(&name), "{name}");
    }

    #[test]
    fn bytes_are_the_utf8_of_the_preview() {
        let note = RefinedNote {
            content: "# Rangkuman\n\n**Kompleksitas** — O(n²) ✓".to_string(),
            model: "gemini-2.5-pro".to_string(),
            generated_at: Local::now(),
        };
        let bytes = download_bytes(&note);
        assert_eq!(String::from_utf8(bytes).unwrap(), note.content);
    }

    #[test]
    fn disposition_names_the_file() {
        assert_eq!(
            content_disposition("catatan_rapi_2025-03-07_09-05.md"),
            "attachment; filename=\"catatan_rapi_2025-03-07_09-05.md\""
        );
    }
}
