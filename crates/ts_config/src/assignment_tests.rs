use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use test_log::test;

use super::*;

#[test]
fn test_from_str() {
    let kv: KvAssignment = "stream.open_marker=<reasoning>".parse().unwrap();
    assert_eq!(kv.key(), "stream.open_marker");
    assert_eq!(kv.value(), "<reasoning>");

    // Only the first `=` separates key and value.
    let kv: KvAssignment = "style.cursor==".parse().unwrap();
    assert_eq!(kv.value(), "=");

    // Empty values are allowed.
    let kv: KvAssignment = "stream.stream_prefix=".parse().unwrap();
    assert_eq!(kv.value(), "");

    assert_matches!("no-separator".parse::<KvAssignment>(), Err(Error::InvalidAssignment(_)));
    assert_matches!(" =value".parse::<KvAssignment>(), Err(Error::InvalidAssignment(_)));
}

#[test]
fn test_trim_prefix() {
    let mut kv = KvAssignment::new("stream.open_marker", "x");

    assert!(!kv.p("style"));
    assert_eq!(kv.key_string(), "stream.open_marker");

    assert!(kv.p("stream"));
    assert_eq!(kv.key_string(), "open_marker");

    // The full key is kept for error reporting.
    assert_eq!(kv.key(), "stream.open_marker");

    // Partial segments do not match.
    let mut kv = KvAssignment::new("streaming.x", "x");
    assert!(!kv.p("stream"));
}

#[test]
fn test_try_parse() {
    assert_eq!(KvAssignment::new("a", " 3 ").try_parse::<usize>().unwrap(), 3);
    assert!(KvAssignment::new("a", "true").try_bool().unwrap());

    let error = KvAssignment::new("stream.max_decode_passes", "many")
        .try_parse::<usize>()
        .unwrap_err();

    assert_matches!(error, Error::InvalidConfigValue { key, value, .. } => {
        assert_eq!(key, "stream.max_decode_passes");
        assert_eq!(value, "many");
    });
}
