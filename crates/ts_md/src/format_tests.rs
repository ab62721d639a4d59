use pretty_assertions::assert_eq;
use test_log::test;

use super::*;

struct TestCase {
    input: &'static str,
    output: &'static str,
}

#[expect(clippy::needless_pass_by_value)]
fn run_test(name: &str, target: Target, case: TestCase) {
    let actual = Formatter::new().format(case.input, target, false);
    assert_eq!(actual, case.output, "failed case: {name}");
}

#[test]
fn test_html() {
    let cases = vec![
        ("strong", TestCase {
            input: "Hello **World**!",
            output: "Hello <strong>World</strong>!",
        }),
        ("emphasis", TestCase {
            input: "Hi *One* and *Two*",
            output: "Hi <em>One</em> and <em>Two</em>",
        }),
        ("strikethrough", TestCase {
            input: "~~old~~ new",
            output: "<del>old</del> new",
        }),
        ("code", TestCase {
            input: "run `cargo`",
            output: "run <code>cargo</code>",
        }),
        ("all styles", TestCase {
            input: "**a** *b* ~~c~~ `d`",
            output: "<strong>a</strong> <em>b</em> <del>c</del> <code>d</code>",
        }),
        ("strong before emphasis", TestCase {
            input: "***both***",
            output: "<strong><em>both</strong></em>",
        }),
        ("shortest span", TestCase {
            input: "*a* b *c*",
            output: "<em>a</em> b <em>c</em>",
        }),
        ("empty span", TestCase {
            input: "a****b",
            output: "a<strong></strong>b",
        }),
        ("unmatched delimiter", TestCase {
            input: "2 * 3 = 6",
            output: "2 * 3 = 6",
        }),
        ("span does not cross lines", TestCase {
            input: "*one\ntwo*",
            output: "*one\ntwo*",
        }),
        ("one span per line", TestCase {
            input: "*one*\n*two*",
            output: "<em>one</em>\n<em>two</em>",
        }),
        ("html is not escaped by default", TestCase {
            input: "<b>**x**</b>",
            output: "<b><strong>x</strong></b>",
        }),
    ];

    for (name, case) in cases {
        run_test(name, Target::Html, case);
    }
}

#[test]
fn test_terminal() {
    let cases = vec![
        ("strong", TestCase {
            input: "Hello **World**!",
            output: "Hello \u{1b}[1mWorld\u{1b}[22m!",
        }),
        ("emphasis", TestCase {
            input: "*Hi*",
            output: "\u{1b}[3mHi\u{1b}[23m",
        }),
        ("strikethrough", TestCase {
            input: "~~old~~",
            output: "\u{1b}[9mold\u{1b}[29m",
        }),
        ("code", TestCase {
            input: "`x`",
            output: "\u{1b}[7mx\u{1b}[27m",
        }),
        ("unmatched", TestCase {
            input: "a ~~ b",
            output: "a ~~ b",
        }),
    ];

    for (name, case) in cases {
        run_test(name, Target::Terminal, case);
    }
}

#[test]
fn test_plain_is_unchanged() {
    let text = "**a** *b* ~~c~~ `d` <e>";
    assert_eq!(Formatter::new().format(text, Target::Plain, false), text);
}

#[test]
fn test_escape_html() {
    let formatter = Formatter::new().with_escape_html(true);

    assert_eq!(
        formatter.format("<script>**&**</script>", Target::Html, false),
        "&lt;script&gt;<strong>&amp;</strong>&lt;/script&gt;"
    );

    // Only applies to HTML.
    assert_eq!(formatter.format("<b>", Target::Plain, false), "<b>");
}

#[test]
fn test_cursor() {
    let formatter = Formatter::new();
    assert_eq!(formatter.format("**Hi**", Target::Html, true), "<strong>Hi</strong>▎");
    assert_eq!(formatter.format("", Target::Plain, true), "▎");
    assert_eq!(formatter.format("Hi", Target::Plain, false), "Hi");

    let formatter = Formatter::new().with_cursor("_");
    assert_eq!(formatter.format("Hi", Target::Terminal, true), "Hi_");
}

#[test]
fn test_multibyte_text() {
    assert_eq!(
        Formatter::new().format("héllo *wörld* 😀 * ok", Target::Html, false),
        "héllo <em>wörld</em> 😀 * ok"
    );
}
