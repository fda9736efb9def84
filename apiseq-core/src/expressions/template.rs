/// A string split into literal text and `{{ ... }}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The token exactly as written, braces included.
    pub raw: String,
    pub kind: PlaceholderKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
    Guid,
    Timestamp,
    Var(String),
    Input(String),
    Response { id: String, path: String },
}

impl PlaceholderKind {
    pub fn label(&self) -> &'static str {
        match self {
            PlaceholderKind::Guid => "guid",
            PlaceholderKind::Timestamp => "timestamp",
            PlaceholderKind::Var(_) => "variable",
            PlaceholderKind::Input(_) => "input",
            PlaceholderKind::Response { .. } => "response",
        }
    }
}

impl Template {
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }
}

/// Split `input` into segments. Tokens that do not match a known placeholder form, and
/// an unclosed `{{`, are kept as literal text.
pub fn parse_template(input: &str) -> Template {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut rest = input;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };

        let raw = &rest[open..open + 2 + close + 2];
        buf.push_str(&rest[..open]);
        match classify(after_open[..close].trim()) {
            Some(kind) => {
                if !buf.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut buf)));
                }
                segments.push(Segment::Placeholder(Placeholder {
                    raw: raw.to_string(),
                    kind,
                }));
            }
            None => buf.push_str(raw),
        }
        rest = &after_open[close + 2..];
    }

    buf.push_str(rest);
    if !buf.is_empty() {
        segments.push(Segment::Literal(buf));
    }

    Template { segments }
}

fn classify(inner: &str) -> Option<PlaceholderKind> {
    match inner {
        "$guid" => return Some(PlaceholderKind::Guid),
        "$timestamp" => return Some(PlaceholderKind::Timestamp),
        _ => {}
    }

    if let Some(name) = inner.strip_prefix(".vars.") {
        return valid_name(name).then(|| PlaceholderKind::Var(name.to_string()));
    }
    if let Some(name) = inner.strip_prefix(".input.") {
        return valid_name(name).then(|| PlaceholderKind::Input(name.to_string()));
    }
    if let Some(rest) = inner.strip_prefix(".responses.") {
        let split = rest.find(|c: char| c == '.' || c == '[').unwrap_or(rest.len());
        let (id, tail) = rest.split_at(split);
        if !valid_name(id) {
            return None;
        }
        let path = match tail.strip_prefix('.') {
            Some(p) => format!(".{p}"),
            None => format!(".{tail}"),
        };
        return Some(PlaceholderKind::Response {
            id: id.to_string(),
            path,
        });
    }

    None
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(t: &Template) -> Vec<PlaceholderKind> {
        t.placeholders().map(|p| p.kind.clone()).collect()
    }

    #[test]
    fn literal_only() {
        let t = parse_template("plain text");
        assert!(t.is_literal());
        assert_eq!(t.segments, vec![Segment::Literal("plain text".to_string())]);
    }

    #[test]
    fn recognises_every_placeholder_kind() {
        let t = parse_template(
            "{{ $guid }}-{{$timestamp}}-{{ .vars.host }}-{{ .input.code }}-{{ .responses.login.data.token }}",
        );
        assert_eq!(
            kinds(&t),
            vec![
                PlaceholderKind::Guid,
                PlaceholderKind::Timestamp,
                PlaceholderKind::Var("host".to_string()),
                PlaceholderKind::Input("code".to_string()),
                PlaceholderKind::Response {
                    id: "login".to_string(),
                    path: ".data.token".to_string()
                },
            ]
        );
    }

    #[test]
    fn response_reference_paths() {
        let t = parse_template("{{ .responses.a }}{{ .responses.b[0].id }}");
        assert_eq!(
            kinds(&t),
            vec![
                PlaceholderKind::Response { id: "a".to_string(), path: ".".to_string() },
                PlaceholderKind::Response { id: "b".to_string(), path: ".[0].id".to_string() },
            ]
        );
    }

    #[test]
    fn raw_text_is_preserved() {
        let t = parse_template("Bearer {{  .vars.token  }}!");
        assert_eq!(t.segments.len(), 3);
        let p = t.placeholders().next().unwrap();
        assert_eq!(p.raw, "{{  .vars.token  }}");
    }

    #[test]
    fn unknown_and_unclosed_tokens_stay_literal() {
        let t = parse_template("{{ .other.x }} and {{ .vars.y");
        assert!(t.is_literal());
        assert_eq!(
            t.segments,
            vec![Segment::Literal("{{ .other.x }} and {{ .vars.y".to_string())]
        );
    }

    #[test]
    fn json_braces_are_not_placeholders() {
        let t = parse_template(r#"{"a": {"b": 1}}"#);
        assert!(t.is_literal());
    }
}
