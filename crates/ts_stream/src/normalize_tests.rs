use pretty_assertions::assert_eq;
use test_log::test;

use super::*;

struct TestCase {
    input: &'static str,
    output: &'static str,
}

#[expect(clippy::needless_pass_by_value)]
fn run_test(name: &str, normalizer: &Normalizer, case: TestCase) {
    let actual = normalizer.normalize(case.input);
    assert_eq!(actual, case.output, "failed case: {name}");
}

#[test]
fn test_strip_prefix() {
    let cases = vec![
        ("none", TestCase {
            input: "Hello world",
            output: "Hello world",
        }),
        ("leading", TestCase {
            input: "data:Hi",
            output: "Hi",
        }),
        ("repeated leading", TestCase {
            input: "data:data:Hi",
            output: "Hi",
        }),
        ("in the middle", TestCase {
            input: "one data:two data:three",
            output: "one two three",
        }),
        ("nested", TestCase {
            input: "dadata:ta:x",
            output: "x",
        }),
        ("deeply nested", TestCase {
            input: "dadadata:ta:ta:y",
            output: "y",
        }),
        ("only prefixes", TestCase {
            input: "data:data:data:",
            output: "",
        }),
        ("partial is kept", TestCase {
            input: "metadat",
            output: "metadat",
        }),
    ];

    let normalizer = Normalizer::new();
    for (name, case) in cases {
        run_test(name, &normalizer, case);
    }
}

#[test]
fn test_decode_entities() {
    let cases = vec![
        ("amp-encoded lt", TestCase {
            input: "A&amp;lt;B",
            output: "A<B",
        }),
        ("single entities", TestCase {
            input: "&lt;b&gt; &quot;q&quot; &#39;s&#39;",
            output: "<b> \"q\" 's'",
        }),
        ("garbled gt", TestCase {
            input: "a;amp;gtb",
            output: "a>b",
        }),
        ("garbled lt", TestCase {
            input: "a;amp;ltb",
            output: "a<b",
        }),
        ("garbled amp", TestCase {
            input: "x;amp;y",
            output: "x&y",
        }),
        ("escaped marker", TestCase {
            input: "&lt;think&gt;hmm&lt;/think&gt;",
            output: "<think>hmm</think>",
        }),
        ("double escaped marker", TestCase {
            input: "&amp;lt;think&amp;gt;",
            output: "<think>",
        }),
        ("unknown entity", TestCase {
            input: "&nbsp;&copy;",
            output: "&nbsp;&copy;",
        }),
        ("bare ampersand", TestCase {
            input: "fish & chips",
            output: "fish & chips",
        }),
    ];

    let normalizer = Normalizer::new();
    for (name, case) in cases {
        run_test(name, &normalizer, case);
    }
}

#[test]
fn test_prefix_and_entities_combined() {
    let normalizer = Normalizer::new();

    assert_eq!(normalizer.normalize("data:&lt;think&gt;data:x"), "<think>x");
    assert_eq!(normalizer.normalize("data:data:Hi"), "Hi");
}

#[test]
fn test_decode_pass_cap() {
    let input = "say &amp;quot;hi&amp;quot;";

    // The default cap is enough to converge.
    assert_eq!(Normalizer::new().normalize(input), "say \"hi\"");

    // A single pass leaves the text half-decoded, and that is what is kept.
    let normalizer = Normalizer::new().with_max_decode_passes(1);
    assert_eq!(normalizer.normalize(input), "say &quot;hi&quot;");

    // Zero is treated as one.
    let normalizer = Normalizer::new().with_max_decode_passes(0);
    assert_eq!(normalizer.normalize(input), "say &quot;hi&quot;");
}

#[test]
fn test_custom_and_empty_prefix() {
    let normalizer = Normalizer::new().with_prefix("event:");
    assert_eq!(normalizer.normalize("event:data:x"), "data:x");

    let normalizer = Normalizer::new().with_prefix("");
    assert_eq!(normalizer.normalize("data:x"), "data:x");
}

#[test]
fn test_normalize_is_idempotent() {
    for input in [
        "data:data:Hi",
        "A&amp;lt;B",
        "dadata:ta:&amp;quot;",
        "plain text",
        "&lt;think&gt;data:reason&lt;/think&gt;answer",
    ] {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "input: {input:?}");
        assert!(!once.contains(STREAM_PREFIX), "input: {input:?}");
    }
}
