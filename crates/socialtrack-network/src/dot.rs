//! Parser for the DOT subset used to describe social networks.
//!
//! Accepted input is a single `graph` or `digraph` block:
//!
//! ```text
//! graph socialnetwork {
//!     "user0" -- "user1";
//!     "user1" -- "user2" [weight=2.5];
//!     "user3";
//! }
//! ```
//!
//! Statements are separated by newlines or `;`. Ids may be quoted or bare.
//! Edge chains (`a -- b -- c`) expand to one statement per hop. The only
//! attribute read is `weight`; others are ignored, as are `node [...]`,
//! `edge [...]`, `graph [...]` and `key = value` statements. Lines starting
//! with `//` or `#` are comments.
//!
//! Parsing is pure: it produces a [`DotGraph`] and never touches a store, so
//! a malformed file is rejected before anything is inserted.

use crate::error::LoadError;

/// Weight used when an edge statement carries no `weight` attribute.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A parsed DOT document.
#[derive(Debug, Clone, PartialEq)]
pub struct DotGraph {
    pub name: Option<String>,
    /// `digraph` rather than `graph`.
    pub directed: bool,
    pub statements: Vec<Statement>,
}

/// One statement from the graph body, tagged with its 1-based line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A bare node declaration.
    Node { line: usize, id: String },
    Edge(EdgeStatement),
}

/// A single edge hop.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStatement {
    pub line: usize,
    pub from: String,
    pub to: String,
    pub weight: f64,
    /// Written with `--`: the relation holds in both directions.
    pub undirected: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Bare(String),
    Quoted(String),
    Undirected,
    Directed,
    Equals,
    Comma,
    Attrs(String),
}

impl Token {
    fn id(&self) -> Option<&str> {
        match self {
            Token::Bare(s) | Token::Quoted(s) => Some(s),
            _ => None,
        }
    }
}

/// Parses DOT text into a [`DotGraph`].
pub fn parse(text: &str) -> Result<DotGraph, LoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !is_skippable(l));

    let (header_line, header) = lines.next().ok_or(LoadError::Empty)?;
    let open = find_unquoted(header, '{').ok_or_else(|| {
        LoadError::syntax(header_line, header, "expected `graph` or `digraph` header ending in `{`")
    })?;
    let (directed, name) = parse_header(header_line, &header[..open])?;

    let mut graph = DotGraph {
        name,
        directed,
        statements: Vec::new(),
    };

    let mut closed = false;
    let body = std::iter::once((header_line, &header[open + 1..])).chain(lines);
    for (line, text) in body {
        if closed {
            if text.trim().is_empty() {
                continue;
            }
            return Err(LoadError::syntax(line, text, "content after closing brace"));
        }
        let (statements, rest) = split_statements(line, text)?;
        for stmt in statements {
            parse_statement(line, stmt, directed, &mut graph.statements)?;
        }
        if let Some(rest) = rest {
            closed = true;
            if !rest.trim().is_empty() {
                return Err(LoadError::syntax(line, text, "content after closing brace"));
            }
        }
    }

    if !closed {
        return Err(LoadError::Unterminated);
    }
    Ok(graph)
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#')
}

fn parse_header(line: usize, header: &str) -> Result<(bool, Option<String>), LoadError> {
    let mut words = header.split_whitespace().peekable();
    if words.peek().is_some_and(|w| w.eq_ignore_ascii_case("strict")) {
        words.next();
    }
    let directed = match words.next() {
        Some(w) if w.eq_ignore_ascii_case("graph") => false,
        Some(w) if w.eq_ignore_ascii_case("digraph") => true,
        _ => return Err(LoadError::syntax(line, header, "expected `graph` or `digraph`")),
    };
    let name = words.next().map(|w| w.trim_matches('"').to_string());
    if words.next().is_some() {
        return Err(LoadError::syntax(line, header, "unexpected text in graph header"));
    }
    Ok((directed, name))
}

fn find_unquoted(text: &str, target: char) -> Option<usize> {
    let mut in_quote = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quote = false,
                _ => {}
            }
        } else if c == '"' {
            in_quote = true;
        } else if c == target {
            return Some(i);
        }
    }
    None
}

/// Splits one line into `;`-separated statements. If the line holds the
/// closing brace, also returns the text after it.
fn split_statements(line: usize, text: &str) -> Result<(Vec<&str>, Option<&str>), LoadError> {
    let mut statements = Vec::new();
    let mut start = 0;
    let mut in_quote = false;
    let mut escaped = false;
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        if in_quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quote = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quote = true,
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                statements.push(&text[start..i]);
                start = i + 1;
            }
            '/' if depth == 0 && text[i + 1..].starts_with('/') => {
                statements.push(&text[start..i]);
                return Ok((statements, None));
            }
            '}' if depth == 0 => {
                statements.push(&text[start..i]);
                return Ok((statements, Some(&text[i + 1..])));
            }
            _ => {}
        }
    }
    if in_quote {
        return Err(LoadError::syntax(line, text, "unterminated quoted id"));
    }
    statements.push(&text[start..]);
    Ok((statements, None))
}

fn tokenize(line: usize, stmt: &str) -> Result<Vec<Token>, LoadError> {
    let mut tokens = Vec::new();
    let mut chars = stmt.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '"' => {
                let mut id = String::new();
                let mut escaped = false;
                let mut terminated = false;
                for (_, c) in chars.by_ref() {
                    match c {
                        _ if escaped => {
                            id.push(c);
                            escaped = false;
                        }
                        '\\' => escaped = true,
                        '"' => {
                            terminated = true;
                            break;
                        }
                        _ => id.push(c),
                    }
                }
                if !terminated {
                    return Err(LoadError::syntax(line, stmt, "unterminated quoted id"));
                }
                tokens.push(Token::Quoted(id));
            }
            '[' => {
                let mut attrs = String::new();
                let mut terminated = false;
                for (_, c) in chars.by_ref() {
                    if c == ']' {
                        terminated = true;
                        break;
                    }
                    attrs.push(c);
                }
                if !terminated {
                    return Err(LoadError::syntax(line, stmt, "unterminated attribute list"));
                }
                tokens.push(Token::Attrs(attrs));
            }
            '=' => tokens.push(Token::Equals),
            ',' => tokens.push(Token::Comma),
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                chars.next();
                tokens.push(Token::Undirected);
            }
            '-' if matches!(chars.peek(), Some((_, '>'))) => {
                chars.next();
                tokens.push(Token::Directed);
            }
            c if is_bare_start(c) => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, next)) = chars.peek() {
                    if !is_bare_char(next) {
                        break;
                    }
                    end = j + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Bare(stmt[i..end].to_string()));
            }
            other => {
                return Err(LoadError::syntax(line, stmt, format!("unexpected character `{}`", other)));
            }
        }
    }
    Ok(tokens)
}

fn is_bare_start(c: char) -> bool {
    c == '-' || is_bare_char(c)
}

fn is_bare_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn parse_statement(line: usize, stmt: &str, directed: bool, out: &mut Vec<Statement>) -> Result<(), LoadError> {
    let tokens = tokenize(line, stmt)?;
    let Some(first) = tokens.first() else {
        return Ok(());
    };

    // `node [...]`, `edge [...]`, `graph [...]` defaults and `key = value`.
    if let Token::Bare(word) = first {
        let keyword = ["node", "edge", "graph"].iter().any(|k| word.eq_ignore_ascii_case(k));
        if keyword && matches!(tokens.get(1), Some(Token::Attrs(_))) && tokens.len() == 2 {
            return Ok(());
        }
    }
    if tokens.len() == 3 && tokens[1] == Token::Equals && tokens[2].id().is_some() {
        return Ok(());
    }

    let (body, attrs) = match tokens.last() {
        Some(Token::Attrs(attrs)) => (&tokens[..tokens.len() - 1], Some(attrs.as_str())),
        _ => (&tokens[..], None),
    };
    let weight = match attrs {
        Some(attrs) => parse_weight(line, stmt, attrs)?,
        None => DEFAULT_WEIGHT,
    };

    let mut ids = Vec::new();
    let mut undirected = None;
    for (pos, token) in body.iter().enumerate() {
        if pos % 2 == 0 {
            match token.id() {
                Some(id) if !id.trim().is_empty() => ids.push(id.to_string()),
                Some(_) => return Err(LoadError::syntax(line, stmt, "empty node id")),
                None => return Err(LoadError::syntax(line, stmt, "expected a node id")),
            }
            continue;
        }
        let op_undirected = match token {
            Token::Undirected => true,
            Token::Directed => false,
            _ => return Err(LoadError::syntax(line, stmt, "expected `--` or `->`")),
        };
        if op_undirected == directed {
            let reason = if directed {
                "`--` used in a digraph"
            } else {
                "`->` used in an undirected graph"
            };
            return Err(LoadError::syntax(line, stmt, reason));
        }
        undirected = Some(op_undirected);
    }
    if body.len() % 2 == 0 {
        return Err(LoadError::syntax(line, stmt, "edge is missing its target"));
    }

    match undirected {
        None => {
            out.push(Statement::Node {
                line,
                id: ids.remove(0),
            });
        }
        Some(undirected) => {
            for pair in ids.windows(2) {
                out.push(Statement::Edge(EdgeStatement {
                    line,
                    from: pair[0].clone(),
                    to: pair[1].clone(),
                    weight,
                    undirected,
                }));
            }
        }
    }
    Ok(())
}

fn parse_weight(line: usize, stmt: &str, attrs: &str) -> Result<f64, LoadError> {
    let tokens: Vec<Token> = tokenize(line, attrs)?
        .into_iter()
        .filter(|t| *t != Token::Comma)
        .collect();
    if tokens.len() % 3 != 0 {
        return Err(LoadError::syntax(line, stmt, "malformed attribute list"));
    }

    let mut weight = DEFAULT_WEIGHT;
    for chunk in tokens.chunks(3) {
        let (Some(key), Token::Equals, Some(value)) = (chunk[0].id(), &chunk[1], chunk[2].id()) else {
            return Err(LoadError::syntax(line, stmt, "malformed attribute list"));
        };
        if key != "weight" {
            continue;
        }
        weight = match value.trim().parse::<f64>() {
            Ok(w) if w.is_finite() && w >= 0.0 => w,
            _ => {
                return Err(LoadError::syntax(
                    line,
                    stmt,
                    format!("weight must be a non-negative number, got `{}`", value),
                ))
            }
        };
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(graph: &DotGraph) -> Vec<(&str, &str, f64, bool)> {
        graph
            .statements
            .iter()
            .filter_map(|s| match s {
                Statement::Edge(e) => Some((e.from.as_str(), e.to.as_str(), e.weight, e.undirected)),
                Statement::Node { .. } => None,
            })
            .collect()
    }

    #[test]
    fn parses_quoted_friendships() {
        let text = "graph socialnetwork {\n    \"user0\" -- \"user1\";\n    \"user1\" -- \"user2\";\n}\n";
        let graph = parse(text).unwrap();
        assert_eq!(graph.name.as_deref(), Some("socialnetwork"));
        assert!(!graph.directed);
        assert_eq!(
            edges(&graph),
            vec![("user0", "user1", 1.0, true), ("user1", "user2", 1.0, true)]
        );
        match &graph.statements[1] {
            Statement::Edge(e) => assert_eq!(e.line, 3),
            other => panic!("expected edge, got {:?}", other),
        }
    }

    #[test]
    fn parses_digraph_with_weights_and_bare_ids() {
        let text = "digraph {\n  a -> b [weight=2.5]\n  b -> c [color=red, weight=\"4\"];\n}";
        let graph = parse(text).unwrap();
        assert!(graph.directed);
        assert_eq!(graph.name, None);
        assert_eq!(edges(&graph), vec![("a", "b", 2.5, false), ("b", "c", 4.0, false)]);
    }

    #[test]
    fn expands_edge_chains() {
        let graph = parse("graph { x -- y -- z [weight=3] }").unwrap();
        assert_eq!(edges(&graph), vec![("x", "y", 3.0, true), ("y", "z", 3.0, true)]);
    }

    #[test]
    fn node_statements_and_ignored_statements() {
        let text = "strict graph g {\n  node [shape=circle];\n  rankdir = LR\n  \"loner\";\n  a -- b; // trailing comment\n  # full-line comment\n}\n";
        let graph = parse(text).unwrap();
        assert_eq!(
            graph.statements,
            vec![
                Statement::Node {
                    line: 4,
                    id: "loner".into()
                },
                Statement::Edge(EdgeStatement {
                    line: 5,
                    from: "a".into(),
                    to: "b".into(),
                    weight: 1.0,
                    undirected: true,
                }),
            ]
        );
    }

    #[test]
    fn comment_after_opening_brace_is_ignored() {
        let graph = parse("graph friends { // header note\n  a -- b; // inline\n}\n").unwrap();
        assert_eq!(graph.name.as_deref(), Some("friends"));
        assert_eq!(edges(&graph), vec![("a", "b", 1.0, true)]);
    }

    #[test]
    fn quoted_ids_keep_spaces_and_escapes() {
        let graph = parse("graph {\n \"Ada Lovelace\" -- \"say \\\"hi\\\"\";\n}").unwrap();
        assert_eq!(edges(&graph), vec![("Ada Lovelace", "say \"hi\"", 1.0, true)]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse(""), Err(LoadError::Empty)));
        assert!(matches!(parse("\n// only a comment\n"), Err(LoadError::Empty)));
    }

    #[test]
    fn missing_header_is_a_syntax_error() {
        let err = parse("a -- b;\n").unwrap_err();
        assert!(matches!(err, LoadError::Syntax { line: 1, .. }));
    }

    #[test]
    fn missing_closing_brace_is_unterminated() {
        assert!(matches!(parse("graph {\n a -- b;\n"), Err(LoadError::Unterminated)));
    }

    #[test]
    fn wrong_operator_for_graph_kind() {
        let err = parse("graph {\n a -> b;\n}").unwrap_err();
        match err {
            LoadError::Syntax { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("undirected"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(parse("digraph {\n a -- b;\n}"), Err(LoadError::Syntax { line: 2, .. })));
    }

    #[test]
    fn dangling_edge_is_rejected() {
        assert!(matches!(parse("graph {\n a -- ;\n}"), Err(LoadError::Syntax { line: 2, .. })));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = parse("graph {\n a -- b [weight=-1];\n}").unwrap_err();
        match err {
            LoadError::Syntax { reason, .. } => assert!(reason.contains("non-negative")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse("graph {\n a -- b [weight=lots];\n}").is_err());
    }

    #[test]
    fn content_after_closing_brace_is_rejected() {
        assert!(matches!(
            parse("graph {\n a -- b;\n}\nextra -- stuff;\n"),
            Err(LoadError::Syntax { line: 4, .. })
        ));
        assert!(parse("graph {\n a -- b;\n}\n\n").is_ok());
    }

    #[test]
    fn unexpected_characters_are_reported() {
        let err = parse("graph {\n a -- b!;\n}").unwrap_err();
        assert!(err.to_string().contains("unexpected character `!`"));
    }
}
