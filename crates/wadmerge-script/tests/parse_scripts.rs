use strum::IntoEnumIterator;
use wadmerge_script::{ParseErrorKind, ParseOptions, parse, parse_with};
use wadmerge_types::{Keyword, Line, Symbol, Trailer};

const MERGE_SCRIPT: &str = r#"# Build the episode wads
clear out
CLEAR "work area"

create out iwad
end

Create "work area" base.wad maps/
ECHO Building   "work area" now...
END flush

echo
"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn lines(src: &str) -> Vec<Line> {
    parse(src)
        .unwrap_or_else(|e| panic!("parse {src:?}: {e}"))
        .into_iter()
        .map(|l| l.value)
        .collect()
}

fn case_variants(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    (0..1u32 << chars.len())
        .map(|mask| {
            chars
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    if mask & (1 << i) != 0 {
                        c.to_ascii_lowercase()
                    } else {
                        c.to_ascii_uppercase()
                    }
                })
                .collect()
        })
        .collect()
}

#[test]
fn merge_script_structure() {
    init_logging();
    let doc = parse(MERGE_SCRIPT).expect("parse merge script");
    let kinds: Vec<Option<Keyword>> = doc.lines().iter().map(|l| l.value.keyword()).collect();
    assert_eq!(
        kinds,
        [
            None,
            Some(Keyword::Clear),
            Some(Keyword::Clear),
            Some(Keyword::Create),
            Some(Keyword::End),
            Some(Keyword::Create),
            Some(Keyword::Echo),
            Some(Keyword::End),
            Some(Keyword::Echo),
        ]
    );
    assert_eq!(doc.commands().count(), 8);
}

#[test]
fn merge_script_fields() {
    init_logging();
    let doc = parse(MERGE_SCRIPT).expect("parse merge script");
    let values: Vec<&Line> = doc.lines().iter().map(|l| &l.value).collect();

    assert_eq!(
        values[2],
        &Line::Clear {
            symbol: Symbol::StringLiteral("work area".into())
        }
    );
    assert_eq!(
        values[3],
        &Line::Create {
            symbol: Symbol::Bare("out".into()),
            is_iwad: true,
            trailers: vec![],
        }
    );
    assert_eq!(
        values[5],
        &Line::Create {
            symbol: Symbol::StringLiteral("work area".into()),
            is_iwad: false,
            trailers: vec![Trailer::from("base.wad"), Trailer::from("maps/")],
        }
    );
    assert_eq!(
        values[6],
        &Line::Echo {
            text: "Building   \"work area\" now...".into()
        }
    );
    assert_eq!(
        values[7],
        &Line::End {
            trailers: vec![Trailer::from("flush")]
        }
    );
    assert_eq!(values[8], &Line::Echo { text: String::new() });

    let create = &doc.lines()[3];
    assert_eq!((create.pos.line, create.pos.col), (5, 1));
}

#[test]
fn engine_directives_are_not_commands() {
    // Directive lines between CREATE and END belong to the build engine's
    // language, which this grammar does not know.
    let err = parse("CREATE out\nMERGEFILE base.wad\nEND\n").expect_err("unknown directive");
    assert_eq!(err.kind, ParseErrorKind::UnrecognizedLine);
    assert_eq!(err.line(), 2);
}

#[test]
fn keywords_match_in_every_case() {
    for kw in Keyword::iter() {
        for spelling in case_variants(kw.spelling()) {
            assert!(kw.matches(&spelling));
            let (src, expect_kw) = match kw {
                Keyword::Iwad => (format!("CREATE x {spelling}"), Keyword::Create),
                Keyword::End => (spelling.clone(), Keyword::End),
                _ => (format!("{spelling} x"), kw),
            };
            let parsed = lines(&src);
            assert_eq!(parsed.len(), 1, "{src:?}");
            assert_eq!(parsed[0].keyword(), Some(expect_kw), "{src:?}");
            if kw == Keyword::Iwad {
                assert!(
                    matches!(parsed[0], Line::Create { is_iwad: true, .. }),
                    "{src:?}"
                );
            }
        }
    }
}

#[test]
fn line_endings_do_not_change_structure() {
    init_logging();
    let lf = lines(MERGE_SCRIPT);
    let crlf = lines(&MERGE_SCRIPT.replace('\n', "\r\n"));
    let cr = lines(&MERGE_SCRIPT.replace('\n', "\r"));
    assert_eq!(lf, crlf);
    assert_eq!(lf, cr);
}

#[test]
fn line_numbers_agree_across_line_endings() {
    for nl in ["\n", "\r\n", "\r"] {
        let src = ["# c", "", "CLEAR x", "END"].join(nl);
        let doc = parse(&src).expect("parse");
        let nums: Vec<usize> = doc.lines().iter().map(|l| l.pos.line).collect();
        assert_eq!(nums, [1, 3, 4], "{nl:?}");
    }
}

#[test]
fn parsing_is_repeatable() {
    assert_eq!(parse(MERGE_SCRIPT), parse(MERGE_SCRIPT));
    let bad = "CREATE ok\nCLEAR\n";
    assert_eq!(parse(bad), parse(bad));
}

#[test]
fn unicode_extras_separate_tokens() {
    let src = "\u{3000}CREATE\u{2003}name\u{205F}IWAD\u{1680}extra\u{85}\u{2028}more";
    assert_eq!(
        lines(src),
        [Line::Create {
            symbol: Symbol::Bare("name".into()),
            is_iwad: true,
            trailers: vec![Trailer::from("extra"), Trailer::from("more")],
        }]
    );
}

#[test]
fn non_breaking_space_is_token_material() {
    assert_eq!(
        lines("CLEAR a\u{A0}b"),
        [Line::Clear {
            symbol: Symbol::Bare("a\u{A0}b".into())
        }]
    );
}

#[test]
fn string_literal_cannot_span_lines() {
    let err = parse("CLEAR ok\nCREATE \"two\nlines\"\n").expect_err("unterminated");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    assert_eq!((err.line(), err.col()), (2, 8));
    assert_eq!(err.to_string(), "line 2, col 8: unterminated string literal");
}

#[test]
fn first_error_wins() {
    let err = parse("CLEAR\nBOGUS\n").expect_err("missing symbol");
    assert_eq!(err.kind, ParseErrorKind::MissingSymbol(Keyword::Clear));
    assert_eq!(err.to_string(), "line 1, col 1: missing symbol for clear");
}

#[test]
fn options_from_toml_drive_parse() {
    let opts = ParseOptions::from_toml_str("keep_comments = false").expect("options");
    let doc = parse_with(MERGE_SCRIPT, &opts).expect("parse");
    assert!(doc.lines().iter().all(|l| l.value.keyword().is_some()));
    assert_eq!(doc.len(), doc.commands().count());
}
