use pretty_assertions::assert_eq;
use test_log::test;
use ts_conversation::Message;

use super::*;
use crate::{marker::Markers, normalize::normalize, state::Mode};

struct TestCase {
    accumulator: Accumulator,
    fragments: Vec<&'static str>,
    answer: &'static str,
    reasoning: Option<&'static str>,
    mode: Mode,
}

impl Default for TestCase {
    fn default() -> Self {
        Self {
            accumulator: Accumulator::default(),
            fragments: vec![],
            answer: "",
            reasoning: None,
            mode: Mode::Answer,
        }
    }
}

#[expect(clippy::needless_pass_by_value)]
fn run_test(name: &str, case: TestCase) {
    let mut state = StreamState::new();
    let mut message = Message::assistant();

    for fragment in &case.fragments {
        case.accumulator.apply_chunk(&mut state, &mut message, fragment);
    }
    case.accumulator.finish(&mut state, &mut message);

    assert_eq!(message.answer_text, case.answer, "failed case: {name}");
    assert_eq!(message.reasoning(), case.reasoning, "failed case: {name}");
    assert_eq!(state.mode(), case.mode, "failed case: {name}");
    assert_eq!(state.pending(), "", "failed case: {name}");
}

#[test]
fn test_apply_chunk() {
    let cases = vec![
        ("reasoning split over fragments", TestCase {
            fragments: vec!["Hello ", "<think>reason", "ing</think> world"],
            answer: "Hello  world",
            reasoning: Some("reasoning"),
            ..Default::default()
        }),
        ("stream ends inside reasoning", TestCase {
            fragments: vec!["<think>partial"],
            reasoning: Some("partial"),
            mode: Mode::Reasoning,
            ..Default::default()
        }),
        ("no markers at all", TestCase {
            fragments: vec!["no tags here", "still none"],
            answer: "no tags herestill none",
            ..Default::default()
        }),
        ("closing marker without reasoning", TestCase {
            fragments: vec!["<think>", "</think>answer"],
            answer: "answer",
            ..Default::default()
        }),
        ("marker split over fragments", TestCase {
            fragments: vec!["Hi <thi", "nk>r", "</th", "ink>ok"],
            answer: "Hi ok",
            reasoning: Some("r"),
            ..Default::default()
        }),
        ("entity split over fragments", TestCase {
            fragments: vec!["A&am", "p;lt;B"],
            answer: "A<B",
            ..Default::default()
        }),
        ("escaped marker split over fragments", TestCase {
            fragments: vec!["&lt;thi", "nk&gt;hmm&lt;/think&g", "t;yes"],
            answer: "yes",
            reasoning: Some("hmm"),
            ..Default::default()
        }),
        ("stream prefix split over fragments", TestCase {
            fragments: vec!["x da", "ta:y"],
            answer: "x y",
            ..Default::default()
        }),
        ("stream prefix inside fragments", TestCase {
            fragments: vec!["data:data:Hi", "data: there"],
            answer: "Hi there",
            ..Default::default()
        }),
        ("custom markers", TestCase {
            accumulator: Accumulator::new(
                Normalizer::default(),
                Extractor::new(Markers::new("[[", "]]")),
            ),
            fragments: vec!["a[", "[b]", "]c"],
            answer: "ac",
            reasoning: Some("b"),
            ..Default::default()
        }),
    ];

    for (name, case) in cases {
        run_test(name, case);
    }
}

#[test]
fn test_control_characters() {
    let cases = vec![
        ("dropped from answer", TestCase {
            fragments: vec!["a\u{7}b\u{85}c\td", "\n"],
            answer: "abcd",
            ..Default::default()
        }),
        ("non-ascii kept", TestCase {
            fragments: vec!["héllo 😀 wörld"],
            answer: "héllo 😀 wörld",
            ..Default::default()
        }),
        ("line breaks kept when asked", TestCase {
            accumulator: Accumulator::default().with_keep_line_breaks(true),
            fragments: vec!["one\r\ntwo\u{0}\n"],
            answer: "one\r\ntwo\n",
            ..Default::default()
        }),
        ("kept in reasoning", TestCase {
            fragments: vec!["<think>a\nb</think>c\n"],
            answer: "c",
            reasoning: Some("a\nb"),
            ..Default::default()
        }),
    ];

    for (name, case) in cases {
        run_test(name, case);
    }
}

#[test]
fn test_possible_partial_token_is_held_back() {
    let accumulator = Accumulator::default();
    let mut state = StreamState::new();
    let mut message = Message::assistant();

    let delta = accumulator.apply_chunk(&mut state, &mut message, "Hello world");
    assert_eq!(delta.answer, "Hello worl");
    assert_eq!(state.pending(), "d");
    assert_eq!(message.answer_text, "Hello worl");

    let delta = accumulator.finish(&mut state, &mut message);
    assert_eq!(delta, Delta {
        reasoning: String::new(),
        answer: "d".to_owned(),
    });
    assert_eq!(state.pending(), "");
    assert_eq!(message.answer_text, "Hello world");

    // Nothing left to flush.
    assert!(accumulator.finish(&mut state, &mut message).is_empty());
}

#[test]
fn test_delta_reports_appended_text() {
    let mut state = StreamState::new();
    let mut message = Message::assistant();

    let delta = apply_chunk(&mut state, &mut message, "pre<think>mid</think>post!");
    assert_eq!(delta, Delta {
        reasoning: "mid".to_owned(),
        answer: "prepost!".to_owned(),
    });
    assert_eq!(state.accumulated_reasoning(), "mid");

    let delta = apply_chunk(&mut state, &mut message, "");
    assert!(delta.is_empty());
}

#[test]
fn test_reasoning_stays_unset_without_markers() {
    let mut state = StreamState::new();
    let mut message = Message::assistant();

    apply_chunk(&mut state, &mut message, "plain");
    finish(&mut state, &mut message);

    assert_eq!(message.reasoning_text, None);
    assert_eq!(state.accumulated_reasoning(), "");
}

#[test]
fn test_partial_suffix_len() {
    assert_eq!(partial_suffix_len("abc<thi", "<think>"), 4);
    assert_eq!(partial_suffix_len("abc<", "<think>"), 1);
    assert_eq!(partial_suffix_len("abc", "<think>"), 0);

    // Multi-byte tokens are only cut at char boundaries.
    assert_eq!(partial_suffix_len("x«th", "«think»"), 4);
    assert_eq!(partial_suffix_len("x«", "«think»"), 2);

    // A complete token is not a partial one.
    assert_eq!(partial_suffix_len("abc<think>", "<think>"), 0);
    assert_eq!(partial_suffix_len("", "<think>"), 0);
}

#[test]
fn test_held_back_run_of_partial_tokens() {
    let accumulator = Accumulator::default();
    let mut state = StreamState::new();
    let mut message = Message::assistant();

    accumulator.apply_chunk(&mut state, &mut message, "<think>hmm&lt;/think&g");
    assert_eq!(state.pending(), "&lt;/think&g");
    assert_eq!(message.reasoning(), Some("hmm"));

    accumulator.apply_chunk(&mut state, &mut message, "t;done");
    assert_eq!(state.mode(), Mode::Answer);
    assert_eq!(message.answer_text, "done");
}

#[test]
fn test_split_entities_decode_like_whole_text() {
    let cases = vec![
        ("double escaped ampersand", vec!["&amp;amp;"], vec!["&amp;", "amp;"]),
        ("decoded ampersand starts entity", vec!["x &amp;lt; y"], vec![
            "x &amp;l",
            "t; y",
        ]),
        ("decoded entity completes marker", vec!["<think>a&lt;/think&gt;b"], vec![
            "<think>a&lt;/thi",
            "nk&g",
            "t;b",
        ]),
        ("prefix split by entity", vec!["da&amp;data:ta:x"], vec!["da&amp;da", "ta:ta:x"]),
    ];

    let run = |fragments: &[&str]| {
        let accumulator = Accumulator::default();
        let mut state = StreamState::new();
        let mut message = Message::assistant();
        for fragment in fragments {
            accumulator.apply_chunk(&mut state, &mut message, fragment);
        }
        accumulator.finish(&mut state, &mut message);
        (message.answer_text, message.reasoning_text)
    };

    for (name, whole, split) in cases {
        assert_eq!(run(split.as_slice()), run(whole.as_slice()), "failed case: {name}");
    }
}

#[test]
fn test_double_escaped_ampersand_is_held_whole() {
    let accumulator = Accumulator::default();
    let mut state = StreamState::new();
    let mut message = Message::assistant();

    let delta = accumulator.apply_chunk(&mut state, &mut message, "&amp;");
    assert!(delta.is_empty());
    assert_eq!(state.pending(), "&amp;");

    accumulator.apply_chunk(&mut state, &mut message, "amp;");
    accumulator.finish(&mut state, &mut message);
    assert_eq!(message.answer_text, normalize("&amp;amp;"));
    assert_eq!(message.answer_text, "&amp&");
}
