use crate::CardError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Where published stories live
pub const SITE_URL: &str = "https://dailythriller.com";

/// The caption shared along with a story card
const SHARE_CAPTION: &str = "每日恐怖故事";

/// A story as published by the daily story API. Only the title and content are ever
/// drawn; the date keys the story and names everything shared from it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Calendar date the story was published for, as `YYYY-MM-DD`
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_source: Option<String>,
    pub created_at_utc: String,
}

impl Story {
    /// Parse a story record from the API's JSON representation
    pub fn from_json(json: &str) -> Result<Story, CardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The publication date, if the record's date is a valid `YYYY-MM-DD` date
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Everything needed to share or download this story's card
    pub fn share_info(&self) -> ShareInfo {
        ShareInfo {
            file_name: format!("story-{}.png", self.date),
            title: self.title.clone(),
            text: format!("{SHARE_CAPTION} - {}", display_date(&self.date)),
            url: format!("{SITE_URL}/story/{}", self.date),
        }
    }
}

/// Metadata handed to a share sheet along with a rendered card, or used to name the
/// file when the card is downloaded instead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareInfo {
    pub file_name: String,
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Format a `YYYY-MM-DD` date the way it is shown to readers, i.e. `2024 年 3 月 5 日`.
/// Dates that do not parse are returned untouched.
pub fn display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => format!("{} 年 {} 月 {} 日", d.year(), d.month(), d.day()),
        Err(_) => {
            log::debug!("cannot format {date:?} as a calendar date");
            date.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "id": 42,
        "title": "鬼屋",
        "content": "他走进了那间鬼屋。\n门在身后关上了。",
        "date": "2024-03-05",
        "aiSource": "model",
        "createdAtUtc": "2024-03-04T16:00:00Z"
    }"#;

    #[test]
    fn parses_api_records() {
        let story = Story::from_json(RECORD).expect("valid record");
        assert_eq!(story.id, 42);
        assert_eq!(story.title, "鬼屋");
        assert_eq!(story.ai_source.as_deref(), Some("model"));
        assert_eq!(story.created_at_utc, "2024-03-04T16:00:00Z");
        assert_eq!(story.calendar_date(), NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn ai_source_is_optional() {
        let story = Story::from_json(
            r#"{"id":1,"title":"t","content":"c","date":"2024-01-01","createdAtUtc":"x"}"#,
        )
        .expect("valid record");
        assert_eq!(story.ai_source, None);
    }

    #[test]
    fn malformed_records_are_errors() {
        assert!(matches!(
            Story::from_json(r#"{"id":1}"#),
            Err(CardError::Json(_))
        ));
    }

    #[test]
    fn share_info_is_derived_from_the_date() {
        let share = Story::from_json(RECORD).expect("valid record").share_info();
        assert_eq!(share.file_name, "story-2024-03-05.png");
        assert_eq!(share.title, "鬼屋");
        assert_eq!(share.text, "每日恐怖故事 - 2024 年 3 月 5 日");
        assert_eq!(share.url, "https://dailythriller.com/story/2024-03-05");
    }

    #[test]
    fn unparseable_dates_are_shown_as_is() {
        assert_eq!(display_date("2024-13-01"), "2024-13-01");
        assert_eq!(display_date("yesterday"), "yesterday");
    }
}
