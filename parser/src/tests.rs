use lexer::{FailureKind, RESERVED_WORDS};

use crate::{
    DEFAULT_MAX_DEPTH, Diagnostic, Expected, ParseError, ParseOptions,
    cst::*,
    parse_nix, parse_nix_with,
};

fn parse(input: &str) -> Root<'_> {
    match parse_nix(input.as_bytes()) {
        Ok(root) => root,
        Err(e) => panic!("{input:?} should parse, got:\n{e}"),
    }
}

fn expr(input: &str) -> Expr<'_> {
    parse(input).expr.expect("an expression")
}

fn outline(input: &str) -> String {
    parse(input).outline().to_string()
}

fn syntax_error(input: &str) -> Diagnostic {
    match parse_nix(input.as_bytes()) {
        Err(ParseError::Syntax(diagnostic)) => diagnostic,
        other => panic!("{input:?} should be a syntax error, got {other:?}"),
    }
}

fn space(text: &str) -> Trivia<'_> {
    Trivia {
        pieces: vec![TriviaPiece::HorizontalSpace(text)],
    }
}

#[test]
fn test_parse_destructured_function() {
    let expr = expr("{a}: 1");
    assert_eq!(Span::new(0, 6), expr.span);
    let ExprKind::Function(function) = expr.kind else {
        panic!("not a function: {expr:?}");
    };
    assert_eq!(
        Pattern::Destructured(Destructured {
            alias: None,
            after_open: Trivia::empty(),
            fields: vec![PatternField {
                name: "a",
                after_name: Trivia::empty(),
                default: None,
                comma: None,
            }],
            ellipsis: None,
        }),
        function.pattern
    );
    assert_eq!(space(" "), function.after_colon);
    assert_eq!(ExprKind::Number(Number::Integer("1")), function.body.kind);
}

#[test]
fn test_parse_let() {
    assert_eq!("(let (= a 1) a)", outline("let a = 1; in a"));
    let ExprKind::Let(let_expr) = expr("let a = 1; in a").kind else {
        panic!("not a let expression");
    };
    assert_eq!(1, let_expr.bindings.len());
    assert_eq!(ExprKind::Identifier("a"), let_expr.body.kind);
}

#[test]
fn test_parse_select() {
    assert_eq!(
        Expr {
            span: Span::new(0, 3),
            kind: ExprKind::Binary(BinaryOp {
                op: BinaryOperator::Select,
                left: Box::new(Expr {
                    span: Span::new(0, 1),
                    kind: ExprKind::Identifier("a"),
                }),
                before_op: Trivia::empty(),
                after_op: Trivia::empty(),
                right: Box::new(Expr {
                    span: Span::new(2, 3),
                    kind: ExprKind::Identifier("b"),
                }),
            }),
        },
        expr("a.b")
    );
    assert_eq!("(. (. a b) c)", outline("a.b.c"));
    assert_eq!("(. x \"y\")", outline("x.\"y\""));
    assert_eq!("(. x ${y})", outline("x.${y}"));
}

#[test]
fn test_parse_list_keeps_trivia() {
    let ExprKind::List(list) = expr("[ null null ]").kind else {
        panic!("not a list");
    };
    assert_eq!(space(" "), list.after_open);
    assert_eq!(
        vec![ExprKind::Null, ExprKind::Null],
        list.elements
            .iter()
            .map(|element| element.expr.kind.clone())
            .collect::<Vec<_>>()
    );
    assert!(list.elements.iter().all(|element| element.trailing == space(" ")));
    assert_eq!("[]", outline("[]"));
    assert_eq!("[a b (call f x)]", outline("[a b (f x)]"));
}

#[test]
fn test_parse_inherit_from() {
    let ExprKind::Set(set) = expr("{inherit (a) a;}").kind else {
        panic!("not a set");
    };
    assert!(!set.is_recursive());
    assert_eq!(
        vec![Terminated {
            binding: Binding::Inherit(Inherit {
                source: Some(InheritSource {
                    before_open: space(" "),
                    after_open: Trivia::empty(),
                    expr: Box::new(Expr {
                        span: Span::new(10, 11),
                        kind: ExprKind::Identifier("a"),
                    }),
                    before_close: Trivia::empty(),
                }),
                names: vec![InheritName {
                    leading: space(" "),
                    name: "a",
                }],
            }),
            before_semicolon: Trivia::empty(),
            after_semicolon: Trivia::empty(),
        }],
        set.bindings
    );
    assert_eq!("(set (inherit))", outline("{ inherit; }"));
    assert_eq!("(set (inherit a b))", outline("{ inherit a b; }"));
}

#[test]
fn test_parse_not_has_attr() {
    assert_eq!("(! (? (set (= a 1)) a))", outline("! {a = 1;} ? a"));
}

#[test]
fn test_precedence() {
    assert_eq!("(> (+ 1 1) 2)", outline("1+1>2"));
    assert_eq!("(+ 1 (* 1 2))", outline("1+1*2"));
    assert_eq!("(* (+ 1 1) 2)", outline("(1 + 1) * 2"));
    assert_eq!("(|| (&& a b) c)", outline("a && b || c"));
    assert_eq!("(-> (|| a b) c)", outline("a || b -> c"));
    assert_eq!("(== (< a b) c)", outline("a < b == c"));
    assert_eq!("(// (+ a b) c)", outline("a + b // c"));
    assert_eq!("(+ a (++ b c))", outline("a + b ++ c"));
    assert_eq!("(++ (? a b) c)", outline("a ? b ++ c"));
    assert_eq!("(? a (. b c))", outline("a ? b.c"));
}

#[test]
fn test_associativity() {
    assert_eq!("(- (- a b) c)", outline("a - b - c"));
    assert_eq!("(/ (* a b) c)", outline("a * b / c"));
    assert_eq!("(-> a (-> b c))", outline("a -> b -> c"));
    assert_eq!("(++ a (++ b c))", outline("a ++ b ++ c"));
    assert_eq!("(// a (// b c))", outline("a // b // c"));
    assert_eq!("(&& (&& a b) c)", outline("a && b && c"));
}

#[test]
fn test_non_associative_operators_do_not_chain() {
    for (input, op) in [
        ("a < b < c", "<"),
        ("a <= b > c", ">"),
        ("a == b != c", "!="),
        ("a ? b ? c", "?"),
    ] {
        let diagnostic = syntax_error(input);
        assert!(
            diagnostic.expected().contains(&Expected::Unchained(op)),
            "{input:?}: {diagnostic}"
        );
        assert_eq!(FailureKind::Ambiguity, diagnostic.kind());
    }
    assert_eq!("(< (< a b) c)", outline("(a < b) < c"));
}

#[test]
fn test_inequality_is_not_triple() {
    assert_eq!("(!= a b)", outline("a != b"));
    syntax_error("a !== b");
}

#[test]
fn test_unary_operators() {
    assert_eq!("(- 1)", outline("-1"));
    assert_eq!("(! (! a))", outline("!!a"));
    assert_eq!("(- (- 1))", outline("- -1"));
    assert_eq!("(== (! a) b)", outline("!a == b"));
    assert_eq!("(&& (! a) b)", outline("!a && b"));
    assert_eq!("(? (- a) b)", outline("-a ? b"));
    assert_eq!("(- (call f x))", outline("-f x"));
    assert_eq!("(* a (- b))", outline("a * -b"));
    assert_eq!("(- f 1)", outline("f -1"));
}

#[test]
fn test_calls() {
    assert_eq!("(call (call f x) y)", outline("f x y"));
    assert_eq!("(call f (. a b))", outline("f a.b"));
    assert_eq!("(+ (call f x) 1)", outline("f x + 1"));
    assert_eq!("(call f <nixpkgs>)", outline("f <nixpkgs>"));

    let ExprKind::Call(call) = expr("f(x)").kind else {
        panic!("not a call");
    };
    assert!(call.gap.is_empty());
    assert_eq!("(call f x)", outline("f(x)"));
}

#[test]
fn test_or_default() {
    assert_eq!("(or (. a b) c)", outline("a.b or c"));
    assert_eq!("(or (. (set) foo) false)", outline("{}.foo or false"));
    assert_eq!("(call f (or (. a b) c))", outline("f a.b or c"));
    assert_eq!("(or (. a b) (. c d))", outline("a.b or c.d"));
    syntax_error("a or b");
}

#[test]
fn test_strings() {
    let ExprKind::String(string) = expr(r#""a${b}c\n""#).kind else {
        panic!("not a string");
    };
    assert_eq!(4, string.parts.len());
    assert_eq!(StringPart::Literal("a"), string.parts[0]);
    assert!(matches!(&string.parts[1], StringPart::Splice(_)));
    assert_eq!(StringPart::Literal("c"), string.parts[2]);
    assert_eq!(StringPart::Escape('n'), string.parts[3]);

    let ExprKind::String(string) = expr(r#""$${a}""#).kind else {
        panic!("not a string");
    };
    assert_eq!(vec![StringPart::Literal("$${a}")], string.parts);

    let ExprKind::String(string) = expr(r#""""#).kind else {
        panic!("not a string");
    };
    assert!(string.parts.is_empty());
}

#[test]
fn test_indented_strings() {
    let input = "''\n  foo ''' bar\n    ''${x}\n  ${y}\n''";
    let ExprKind::IndentedString(string) = expr(input).kind else {
        panic!("not an indented string");
    };
    assert_eq!(IndentedPart::Literal("\n  foo "), string.parts[0]);
    assert_eq!(IndentedPart::EscapedQuote, string.parts[1]);
    assert_eq!(IndentedPart::Literal(" bar\n    "), string.parts[2]);
    assert_eq!(IndentedPart::EscapedDollar, string.parts[3]);
    assert_eq!(IndentedPart::Literal("{x}\n  "), string.parts[4]);
    assert!(matches!(&string.parts[5], IndentedPart::Splice(_)));
    assert_eq!(IndentedPart::Literal("\n"), string.parts[6]);
    assert_eq!(2, string.indentation());

    let ExprKind::IndentedString(string) = expr("''a''\\nb''").kind else {
        panic!("not an indented string");
    };
    assert_eq!(
        vec![
            IndentedPart::Literal("a"),
            IndentedPart::Escape('n'),
            IndentedPart::Literal("b"),
        ],
        string.parts
    );
    assert_eq!(0, string.indentation());
}

#[test]
fn test_uri_and_paths() {
    assert!(matches!(expr("http://google.com/a.b.c").kind, ExprKind::Uri(_)));
    assert!(matches!(expr("x:x").kind, ExprKind::Uri(_)));

    for (input, kind) in [
        ("<nixpkgs/lib>", PathKind::Search),
        ("./foo.nix", PathKind::Plain),
        ("/etc/nixos", PathKind::Plain),
        ("a/b", PathKind::Plain),
        ("2/4", PathKind::Plain),
        ("~/a/b/", PathKind::Home),
    ] {
        match expr(input).kind {
            ExprKind::Path(path) => assert_eq!(kind, path.kind, "{input:?}"),
            other => panic!("{input:?} should be a path, got {other:?}"),
        }
    }

    assert_eq!("(/ 1 2)", outline("1 / 2"));
    assert_eq!("(< a b)", outline("a <b"));
}

#[test]
fn test_invalid_paths_point_at_the_segment() {
    assert_eq!(11, syntax_error("<nixpkgs/./>").offset);
    assert_eq!(1, syntax_error("<>").offset);
}

#[test]
fn test_numbers() {
    assert_eq!(
        ExprKind::Number(Number::Float {
            integer_part: "1",
            fraction: "5e3"
        }),
        expr("1.5e3").kind
    );
    assert_eq!(
        ExprKind::Number(Number::Float {
            integer_part: "",
            fraction: "5"
        }),
        expr(".5").kind
    );
    assert_eq!(ExprKind::Number(Number::Integer("42")), expr("42").kind);
}

#[test]
fn test_functions() {
    assert_eq!("(fn x x)", outline("x: x"));
    assert_eq!("(fn x (fn y (+ x y)))", outline("x: y: x + y"));
    assert_eq!("(fn x@{a b?1 ...} a)", outline("x@{ a, b ? 1, ... }: a"));
    assert_eq!("(fn {a ...}@args a)", outline("{ a, ... }@args: a"));
    assert_eq!("(fn x@{} x)", outline("x @ {}: x"));
    assert_eq!("(fn args@{a} 1)", outline("args @ {a}: 1"));
    assert_eq!("(fn {a}@args 1)", outline("{a} @ args: 1"));
    assert_eq!("(fn {} 1)", outline("{}: 1"));
    assert_eq!("(fn {...} 1)", outline("{ ... }: 1"));
    assert_eq!("(fn {a} a)", outline("{ a, }: a"));
    assert_eq!("(fn {a?1} a)", outline("{ a ? 1 }: a"));
    assert_eq!("(call map (fn x x))", outline("map (x: x)"));
}

#[test]
fn test_malformed_patterns() {
    syntax_error("{ a , b, ..., c }: 1");
    syntax_error("{ ..., a }: 1");
    syntax_error("{ a b }: 1");
    syntax_error("a@{ }@b: 1");
}

#[test]
fn test_control_flow() {
    assert_eq!("(if a b c)", outline("if a then b else c"));
    assert_eq!("(assert a b)", outline("assert a; b"));
    assert_eq!("(with a (call b c))", outline("with a; b c"));
    assert_eq!(
        "(if (== a 1) (let (= b 2) b) (with c d))",
        outline("if a == 1 then let b = 2; in b else with c; d")
    );
    assert_eq!("(fn x (assert x x))", outline("x: assert x; x"));
}

#[test]
fn test_keyword_forms_are_not_operands() {
    syntax_error("! let a = 1; in a");
    syntax_error("1 + if a then b else c");
    syntax_error("f with a; b");
}

#[test]
fn test_sets() {
    assert_eq!(
        "(rec-set (= a 1) (= b.c a) (= \"d\" 2) (= ${e} 3) (inherit f))",
        outline("rec { a = 1; b.c = a; \"d\" = 2; ${e} = 3; inherit f; }")
    );
    assert_eq!("(set)", outline("{ }"));
    assert_eq!(
        "(let (inherit (a) b) (= c 1) c)",
        outline("let inherit (a) b; c = 1; in c")
    );

    let ExprKind::Set(set) = expr("{ a . b = 1; }").kind else {
        panic!("not a set");
    };
    let Binding::Pair(pair) = &set.bindings[0].binding else {
        panic!("not a pair");
    };
    assert_eq!(
        vec![Some("a"), Some("b")],
        pair.path.names().map(AttrName::get_literal).collect::<Vec<_>>()
    );
}

#[test]
fn test_set_errors() {
    let diagnostic = syntax_error("{ a = 1 }");
    assert_eq!(8, diagnostic.offset);
    assert_eq!(Some('}'), diagnostic.found);
    assert_eq!(vec![Expected::Token(";")], diagnostic.expected());
    assert_eq!(FailureKind::Structural, diagnostic.kind());
    assert!(
        diagnostic
            .to_string()
            .starts_with("expected `;`, found '}' at 1:9"),
        "{diagnostic}"
    );

    syntax_error("{ a = 1; b }");
    syntax_error("{ a = 1;");
}

#[test]
fn test_unterminated_forms() {
    let diagnostic = syntax_error("[ 1 2");
    assert_eq!(5, diagnostic.offset);
    assert_eq!(None, diagnostic.found);
    let expected = diagnostic.expected();
    assert!(expected.contains(&Expected::Token("]")), "{diagnostic}");
    assert!(expected.contains(&Expected::Class("expression")), "{diagnostic}");

    let diagnostic = syntax_error("\"abc");
    assert_eq!(4, diagnostic.offset);
    assert!(diagnostic.expected().contains(&Expected::Token("\"")));

    syntax_error("''abc");
    syntax_error("(a");
    syntax_error("\"${a\"");
}

#[test]
fn test_reserved_words() {
    for word in RESERVED_WORDS {
        syntax_error(word);
        for suffix in ["a", "1", "_", "'", "-"] {
            let longer = format!("{word}{suffix}");
            assert_eq!(ExprKind::Identifier(longer.as_str()), expr(&longer).kind);
        }
    }
    let diagnostic = syntax_error("let a = 1; in then");
    assert!(diagnostic.expected().contains(&Expected::NotReserved("then")));
    assert_eq!("(let (= ina 1) ina)", outline("let ina = 1; in ina"));
}

#[test]
fn test_keyword_literals() {
    assert_eq!(ExprKind::Boolean(true), expr("true").kind);
    assert_eq!(ExprKind::Boolean(false), expr("false").kind);
    assert_eq!(ExprKind::Null, expr("null").kind);
    assert_eq!(ExprKind::Identifier("nullable"), expr("nullable").kind);
}

#[test]
fn test_empty_input() {
    let root = parse("");
    assert_eq!(None, root.expr);
    assert!(root.leading.is_empty() && root.trailing.is_empty());

    let root = parse("  # nothing here\n");
    assert_eq!(None, root.expr);
    assert_eq!(3, root.leading.pieces.len());
    assert!(root.trailing.is_empty());
}

#[test]
fn test_root_owns_surrounding_trivia() {
    let root = parse("# leading\n1 # trailing\n");
    assert_eq!(2, root.leading.pieces.len());
    assert_eq!(
        vec![
            TriviaPiece::HorizontalSpace(" "),
            TriviaPiece::LineComment(" trailing"),
            TriviaPiece::VerticalSpace("\n"),
        ],
        root.trailing.pieces
    );
    assert_eq!(Some(Span::new(10, 11)), root.expr.map(|expr| expr.span));
}

#[test]
fn test_spans_and_positions() {
    let source = "a +\n  bc";
    let expr = expr(source);
    assert_eq!(Span::new(0, 8), expr.span);
    let ExprKind::Binary(op) = &expr.kind else {
        panic!("not a binary operation");
    };
    assert_eq!(Span::new(6, 8), op.right.span);
    assert_eq!(SourcePosition { line: 2, column: 3 }, op.right.position(source));
}

#[test]
fn test_round_trip() {
    let inputs = [
        "1",
        "  1  ",
        "a.b or c",
        "[ 1 2 /* x */ 3 ]",
        "{ a = 1; /* c */ b . c = 2 ; inherit ( x ) y z ; }",
        "rec { a = 1; }",
        "x @ { a ? 1 , b , ... }: 1",
        "{ a ? 1 , ... } @ y: y",
        "{ a , ... }: a",
        "f(x)",
        "f x\n  y",
        "if a then b else c",
        "assert a ; b",
        "with a;b",
        "let\n  a = 1;\nin\n  a",
        "\"a${ b }c\\\"d\"",
        "''\n  a ''' ''$ ''\\t ${b}\n''",
        "a\r\n+ b",
        "- ( ! a )",
        "a ? b . c",
        "<nixpkgs> ~/a/ ./b http://c/d",
        "/* unterminated",
        "# only a comment",
        "1 # comment at the end",
    ];
    for input in inputs {
        assert_eq!(input, parse(input).to_string());
    }
}

#[test]
fn test_round_trip_comments() {
    let input = r#"# leading comment
let
  /* block */ a = 1; # trailing
  b = [ 1 2 /* x */ 3 ];
  c = { inherit a; d.e = "${b}"; };
in
  a + b # end
"#;
    let root = parse(input);
    assert_eq!(input, root.to_string());
    assert_eq!(
        "(let (= a 1) (= b [1 2 3]) (= c (set (inherit a) (= d.e \"${b}\"))) (+ a b))",
        root.outline().to_string()
    );
}

#[test]
fn test_nesting_limit() {
    assert_eq!(
        Err(ParseError::NestedTooDeep {
            limit: 3,
            offset: 3
        }),
        parse_nix_with(b"((((1))))", ParseOptions { max_depth: 3 })
    );

    let nested = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    assert_eq!("1", outline(&nested));
}

fn nest(open: &str, inner: &str, close: &str, levels: usize) -> String {
    format!("{}{inner}{}", open.repeat(levels), close.repeat(levels))
}

#[test]
fn test_nesting_up_to_the_default_limit() {
    let forms = [
        ("parentheses", "(", ")"),
        ("lists", "[", "]"),
        ("sets", "{a=", ";}"),
        ("let bodies", "let a=1; in ", ""),
        ("splices", "\"${", "}\""),
        ("pattern defaults", "{a ? ", "}: a"),
        ("inherit sources", "{inherit (", ") a;}"),
        ("concatenations", "a ++ ", ""),
        ("implications", "a -> ", ""),
    ];
    for (name, open, close) in forms {
        let deepest = nest(open, "1", close, DEFAULT_MAX_DEPTH - 1);
        if let Err(e) = parse_nix(deepest.as_bytes()) {
            panic!("{name} at depth {}: {e}", DEFAULT_MAX_DEPTH - 1);
        }

        let too_deep = nest(open, "1", close, DEFAULT_MAX_DEPTH);
        assert!(
            matches!(
                parse_nix(too_deep.as_bytes()),
                Err(ParseError::NestedTooDeep {
                    limit: DEFAULT_MAX_DEPTH,
                    ..
                })
            ),
            "{name} at depth {DEFAULT_MAX_DEPTH}"
        );
    }
}

#[test]
fn test_nesting_limit_follows_options() {
    let options = ParseOptions { max_depth: 300 };
    let deep = nest("{a=", "1", ";}", 299);
    assert!(parse_nix_with(deep.as_bytes(), options).is_ok());
    assert!(matches!(
        parse_nix(deep.as_bytes()),
        Err(ParseError::NestedTooDeep { .. })
    ));
}

#[test]
fn test_division_after_word_reports_only_the_operand() {
    for input in ["a/)", "1/)"] {
        assert_eq!(
            vec![Expected::Class("expression")],
            syntax_error(input).expected(),
            "{input:?}"
        );
    }
    assert_eq!("(/ a b)", outline("a/ b"));
    assert_eq!("(/ 1 2)", outline("1/ 2"));
}

#[test]
fn test_invalid_utf8() {
    assert!(matches!(
        parse_nix(&[b'"', 0xff, b'"']),
        Err(ParseError::InvalidUtf8(_))
    ));
}
