//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::identity::{EntityKind, RecordId};
use crate::core::repository::{Repository, YamlRepository};
use crate::core::store::CrmStore;
use crate::core::workspace::Workspace;

/// Open the workspace from `--workspace` or by walking up from the
/// current directory
pub fn open_repository(global: &GlobalOpts) -> Result<YamlRepository> {
    let workspace = match &global.workspace {
        Some(path) => Workspace::open(path),
        None => Workspace::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    Ok(YamlRepository::new(workspace))
}

/// Load the store from the workspace data files
pub fn load_store(global: &GlobalOpts) -> Result<(YamlRepository, CrmStore)> {
    let repository = open_repository(global)?;
    let store = repository.load().into_diagnostic()?;
    Ok((repository, store))
}

/// Parse a record id argument, insisting it belongs to the expected
/// collection. A bare number is accepted as shorthand ("3" -> "L003").
pub fn parse_id(kind: EntityKind, raw: &str) -> Result<RecordId> {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let seq: u32 = raw
            .parse()
            .map_err(|_| miette::miette!("sequence number '{}' is out of range", raw))?;
        return Ok(RecordId::new(kind, seq));
    }

    let id = RecordId::parse(raw).map_err(|e| miette::miette!("{}", e))?;
    if id.kind() != kind {
        return Err(miette::miette!(
            "'{}' is a {} id, expected a {} id",
            raw,
            id.kind(),
            kind
        ));
    }
    Ok(id)
}

/// Parse a time-of-day argument, accepting "14:30" or "14:30:00"
pub fn parse_time(raw: &str) -> Result<chrono::NaiveTime> {
    chrono::NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| chrono::NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| miette::miette!("invalid time '{}', expected HH:MM", raw))
}

/// Truncate a string to max_len characters, adding "..." if truncated.
/// Counts chars, not bytes, so multi-byte names never split mid-char.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output (RFC 4180)
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_bare_number() {
        let id = parse_id(EntityKind::Lead, "3").unwrap();
        assert_eq!(id.to_string(), "L003");
    }

    #[test]
    fn test_parse_id_rejects_wrong_kind() {
        assert!(parse_id(EntityKind::Lead, "P001").is_err());
    }

    #[test]
    fn test_parse_id_full_form() {
        let id = parse_id(EntityKind::Pledge, "PL007").unwrap();
        assert_eq!(id.seq(), 7);
    }

    #[test]
    fn test_parse_time_with_and_without_seconds() {
        assert_eq!(parse_time("14:30").unwrap().to_string(), "14:30:00");
        assert_eq!(parse_time("09:15:30").unwrap().to_string(), "09:15:30");
        assert!(parse_time("half past two").is_err());
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a longer string", 10), "a longe...");
    }

    #[test]
    fn test_truncate_str_multibyte_names() {
        assert_eq!(truncate_str("Людмила Оникієнко", 10), "Людмила...");
        assert_eq!(truncate_str("محمد عبد الرحمن", 10), "محمد عب...");
        assert_eq!(truncate_str("Ümit Öztürk", 11), "Ümit Öztürk");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
