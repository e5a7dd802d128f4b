use serde_json::Value;

/// One step of a JSON path such as `orders[0].bill` or `orders.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
    Len,
}

/// Split a dotted path into segments.
///
/// Panics on a malformed index, which is a bug in the test itself.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    for part in path.split('.').filter(|p| !p.is_empty()) {
        if part == "len()" || part == "size()" {
            segments.push(PathSegment::Len);
            continue;
        }
        let (field, mut indexes) = match part.split_once('[') {
            Some((field, rest)) => (field, Some(rest)),
            None => (part, None),
        };
        if !field.is_empty() {
            segments.push(PathSegment::Field(field.to_string()));
        }
        while let Some(rest) = indexes {
            let (index, tail) = rest
                .split_once(']')
                .unwrap_or_else(|| panic!("unclosed bracket in JSON path {path:?}"));
            let index = index
                .parse()
                .unwrap_or_else(|_| panic!("non-numeric index {index:?} in JSON path {path:?}"));
            segments.push(PathSegment::Index(index));
            indexes = tail.strip_prefix('[');
        }
    }
    segments
}

/// Resolve `path` against `root`. Missing fields and indexes yield `Null`.
pub fn resolve_path(root: &Value, path: &str) -> Value {
    parse_path(path)
        .iter()
        .fold(root.clone(), |current, segment| match segment {
            PathSegment::Field(name) => current.get(name).cloned().unwrap_or(Value::Null),
            PathSegment::Index(i) => current.get(*i).cloned().unwrap_or(Value::Null),
            PathSegment::Len => {
                let len = match &current {
                    Value::Array(items) => items.len(),
                    Value::Object(fields) => fields.len(),
                    Value::String(s) => s.len(),
                    other => panic!("len() applied to non-collection {other} in JSON path {path:?}"),
                };
                Value::from(len)
            }
        })
}
