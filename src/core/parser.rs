// actchat - core/parser.rs
//
// Line classifier for ACT network logs.
// Core layer: works on one &str at a time, never touches the filesystem.
//
// Record layout (pipe-delimited):
//
//   00|2024-01-15T20:16:42.0000000-05:00|000A|Jane Doe|Hello there|9a1b2c3d
//   type|timestamp|chat code|speaker|message body|checksum
//
// Only record type 00 carries chat. Every other record type still has a
// type and a timestamp, which are validated, and is classified as Other.

use crate::core::model::{ChatCodes, LogLine, MessageKind};
use crate::util::constants::{
    CHAT_RECORD_TYPE, FIELD_BODY, FIELD_CODE, FIELD_DELIMITER, FIELD_NAME, FIELD_TIMESTAMP,
    FIELD_TYPE, MIN_CHAT_FIELDS, MIN_RECORD_FIELDS, NAME_WORDS, TIMESTAMP_FORMAT,
};
use crate::util::error::ParseError;
use chrono::{DateTime, FixedOffset};

/// Classify one raw log line.
///
/// Returns `ParseError` when the line is too short for its record type or
/// its timestamp cannot be parsed. Callers skip such lines and continue.
pub fn classify<'a>(raw: &'a str, codes: &ChatCodes) -> Result<LogLine<'a>, ParseError> {
    let fields: Vec<&str> = raw.split(FIELD_DELIMITER).collect();
    if fields.len() < MIN_RECORD_FIELDS {
        return Err(ParseError::TooFewFields {
            found: fields.len(),
            required: MIN_RECORD_FIELDS,
        });
    }

    let timestamp = parse_timestamp(fields[FIELD_TIMESTAMP])?;

    if fields[FIELD_TYPE].trim() != CHAT_RECORD_TYPE {
        return Ok(LogLine {
            raw_text: raw,
            timestamp,
            code: String::new(),
            speaker: String::new(),
            kind: MessageKind::Other,
            body: "",
        });
    }

    if fields.len() < MIN_CHAT_FIELDS {
        return Err(ParseError::TooFewFields {
            found: fields.len(),
            required: MIN_CHAT_FIELDS,
        });
    }

    let code = fields[FIELD_CODE].trim().to_ascii_uppercase();
    let body = message_body(raw, fields.len());

    let mut kind = if codes.say.contains(&code) {
        MessageKind::Say
    } else if codes.emote.contains(&code) {
        MessageKind::Emote
    } else {
        MessageKind::Other
    };

    if kind == MessageKind::Say && has_emote_marker(body, &codes.emote_markers) {
        kind = MessageKind::Emote;
    }

    let mut speaker = normalize_name(fields[FIELD_NAME]);
    // Standard emotes leave the name field empty and start the body with
    // the actor's full name.
    if speaker.is_empty() && kind == MessageKind::Emote {
        speaker = leading_name(body);
    }

    Ok(LogLine {
        raw_text: raw,
        timestamp,
        code,
        speaker,
        kind,
        body,
    })
}

/// Normalise a speaker name for exact matching.
///
/// The game embeds private-use glyphs in names: party-slot icons before the
/// name and a cross-world icon between the name and the home world
/// (`Jane Doe<icon>Gilgamesh`). Leading glyphs are dropped and the name ends
/// at the first glyph after it. The rest is trimmed with inner whitespace
/// collapsed to one space.
pub fn normalize_name(raw: &str) -> String {
    let name = raw
        .trim_start_matches(|c: char| is_private_use(c) || c.is_whitespace())
        .split(is_private_use)
        .next()
        .unwrap_or_default();
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_private_use(c: char) -> bool {
    ('\u{E000}'..='\u{F8FF}').contains(&c)
}

/// The first `NAME_WORDS` words of an emote body, normalised.
fn leading_name(body: &str) -> String {
    let words: Vec<&str> = body
        .split(|c: char| is_private_use(c) || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .take(NAME_WORDS)
        .collect();
    if words.len() < NAME_WORDS {
        return String::new();
    }
    words.join(" ")
}

/// Everything from the body field up to, not including, the trailing
/// checksum field. A body that itself contains the delimiter is kept whole.
fn message_body(raw: &str, field_count: usize) -> &str {
    let rest = raw
        .splitn(FIELD_BODY + 1, FIELD_DELIMITER)
        .nth(FIELD_BODY)
        .unwrap_or_default();
    if field_count > MIN_CHAT_FIELDS {
        rest.rsplit_once(FIELD_DELIMITER)
            .map(|(body, _checksum)| body)
            .unwrap_or(rest)
    } else {
        rest
    }
}

fn has_emote_marker(body: &str, markers: &[String]) -> bool {
    let body = body.trim_start();
    markers
        .iter()
        .any(|m| !m.is_empty() && body.starts_with(m.as_str()))
}

/// Parse the timestamp field.
///
/// ACT writes seven fractional digits and a `+HH:MM` offset; RFC 3339 with a
/// `Z` suffix is accepted as well.
fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let trimmed = raw.trim();
    DateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .map_err(|_| ParseError::TimestampParse {
            raw_timestamp: trimmed.to_string(),
        })
}
