//! Article push payload delivered by MPusher to the callback URL.

use std::fmt::Display;

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// One pushed article.
///
/// Only `article_id` is mandatory on the wire. The remaining fields fall back
/// to their defaults when absent or `null`, so a partially populated push
/// still reaches the handler. Text fields also accept numbers and integer
/// fields also accept numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePushPayload {
    /// Unique article identifier
    #[serde(deserialize_with = "deserialize_text")]
    pub article_id: String,
    /// Official account ID
    #[serde(default, deserialize_with = "deserialize_int")]
    pub mp_id: i64,
    /// Base64 encoded official account ID
    #[serde(default, rename = "mpIdB64", deserialize_with = "deserialize_text")]
    pub mp_id_b64: String,
    /// Official account name
    #[serde(default, deserialize_with = "deserialize_text")]
    pub mp_name: String,
    /// Message ID of the article
    #[serde(default, deserialize_with = "deserialize_int")]
    pub article_msg_id: i64,
    /// Position of the article inside its message
    #[serde(default, deserialize_with = "deserialize_int")]
    pub article_idx: i32,
    /// Article signature, used by the fallback link
    #[serde(default, deserialize_with = "deserialize_text")]
    pub article_sn: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub cover_img: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    /// Publish time, Unix seconds
    #[serde(default, deserialize_with = "deserialize_int")]
    pub published_at: i64,
    /// Primary article link
    #[serde(default, deserialize_with = "deserialize_text")]
    pub url: String,
    /// Fallback article link
    #[serde(default, deserialize_with = "deserialize_text")]
    pub url2: String,
}

/// String field that may arrive as a number or `null`.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextValue {
        Str(String),
        Num(serde_json::Number),
    }

    match Option::<TextValue>::deserialize(deserializer)? {
        Some(TextValue::Str(s)) => Ok(s),
        Some(TextValue::Num(n)) => Ok(n.to_string()),
        None => Ok(String::new()),
    }
}

/// Integer field that may arrive as a numeric string or `null`.
///
/// A blank string counts as unset; any other non-numeric string is an error.
fn deserialize_int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
    T::Error: Display,
{
    use serde::de::Error;
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntValue {
        Int(i64),
        Str(String),
    }

    let value = match Option::<IntValue>::deserialize(deserializer)? {
        Some(IntValue::Int(i)) => i,
        Some(IntValue::Str(s)) if s.trim().is_empty() => return Ok(T::default()),
        Some(IntValue::Str(s)) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid integer string \"{s}\"")))?,
        None => return Ok(T::default()),
    };
    T::try_from(value).map_err(D::Error::custom)
}

impl ArticlePushPayload {
    /// Publish time as a timestamp, `None` when unset or out of range.
    pub fn published_time(&self) -> Option<Timestamp> {
        if self.published_at <= 0 {
            return None;
        }
        Timestamp::from_second(self.published_at).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "articleId": "2247484078_1",
            "mpId": 2247484078i64,
            "mpIdB64": "MjI0NzQ4NDA3OA==",
            "mpName": "示例公众号",
            "articleMsgId": 2247484078i64,
            "articleIdx": 1,
            "articleSn": "abc123def456",
            "title": "示例文章标题",
            "coverImg": "https://example.com/cover.jpg",
            "description": "这是一篇示例文章的描述",
            "publishedAt": 1640995200,
            "url": "https://mp.weixin.qq.com/s/2247484078_1",
            "url2": "https://mp.weixin.qq.com/s?__biz=2247484078&mid=2247484078&idx=1&sn=abc123def456"
        })
    }

    #[test]
    fn test_deserialize_full_payload() {
        let payload: ArticlePushPayload = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(payload.article_id, "2247484078_1");
        assert_eq!(payload.mp_id_b64, "MjI0NzQ4NDA3OA==");
        assert_eq!(payload.article_idx, 1);
        assert_eq!(payload.published_at, 1640995200);
    }

    #[test]
    fn test_serialize_round_trips_wire_names() {
        let payload: ArticlePushPayload = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap(), sample_json());
    }

    #[test]
    fn test_partial_payload_uses_defaults() {
        let payload: ArticlePushPayload =
            serde_json::from_value(serde_json::json!({"articleId": "a1"})).unwrap();
        assert_eq!(payload.article_id, "a1");
        assert_eq!(payload.mp_id, 0);
        assert!(payload.title.is_empty());
    }

    #[test]
    fn test_missing_article_id_fails() {
        let result: Result<ArticlePushPayload, _> =
            serde_json::from_value(serde_json::json!({"mpId": 123}));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let payload: ArticlePushPayload = serde_json::from_value(serde_json::json!({
            "articleId": "a1",
            "mpId": null,
            "title": null,
            "description": null,
            "coverImg": null,
            "publishedAt": null
        }))
        .unwrap();
        assert_eq!(payload.article_id, "a1");
        assert_eq!(payload.mp_id, 0);
        assert!(payload.description.is_empty());
        assert!(payload.cover_img.is_empty());
        assert!(payload.published_time().is_none());
    }

    #[test]
    fn test_numeric_strings_and_numeric_text() {
        let payload: ArticlePushPayload = serde_json::from_value(serde_json::json!({
            "articleId": 12345,
            "mpId": "2247484078",
            "articleIdx": " 2 ",
            "publishedAt": "1640995200",
            "articleMsgId": "",
            "mpName": 42
        }))
        .unwrap();
        assert_eq!(payload.article_id, "12345");
        assert_eq!(payload.mp_id, 2247484078);
        assert_eq!(payload.article_idx, 2);
        assert_eq!(payload.published_at, 1640995200);
        assert_eq!(payload.article_msg_id, 0);
        assert_eq!(payload.mp_name, "42");
    }

    #[test]
    fn test_unusable_field_values_fail() {
        for body in [
            serde_json::json!({"articleId": "a", "mpId": "not a number"}),
            serde_json::json!({"articleId": "a", "articleIdx": 4_294_967_296i64}),
            serde_json::json!({"articleId": "a", "title": {"text": "x"}}),
        ] {
            assert!(serde_json::from_value::<ArticlePushPayload>(body).is_err());
        }
    }

    #[test]
    fn test_published_time() {
        let payload = ArticlePushPayload {
            published_at: 1640995200,
            ..Default::default()
        };
        assert_eq!(
            payload.published_time().unwrap().to_string(),
            "2022-01-01T00:00:00Z"
        );
        assert!(ArticlePushPayload::default().published_time().is_none());
    }
}
