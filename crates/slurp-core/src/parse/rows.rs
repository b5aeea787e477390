use crate::ir::Parameter;
use crate::transform::TypeMap;

const REQUIRED_MARKER: &str = "Required.";

/// Whether `line` is a two-column table header such as `Name \tDescription`.
pub fn is_table_header(line: &str, first: &str, second: &str) -> bool {
    line.split_once('\t')
        .is_some_and(|(a, b)| a.trim() == first && b.trim() == second)
}

/// Whether a would-be title line is really a row of a responses table.
pub fn looks_like_response_row(line: &str) -> bool {
    let columns: Vec<&str> = line.split('\t').collect();
    let [code, desc] = columns.as_slice() else {
        return false;
    };
    let code = code.trim();
    (code == "Code" && desc.trim() == "Description")
        || (!code.is_empty() && code.chars().all(|c| c.is_ascii_digit()))
}

/// Parse a `name Type<TAB>description` parameter row.
///
/// Returns `None` for rows that do not have that shape.
pub fn parse_param_row(line: &str, body_param: bool, types: &TypeMap) -> Option<Parameter> {
    let (head, desc) = line.split_once('\t')?;
    let (name, documented_type) = head.trim_start().split_once(' ')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let desc = desc.trim();

    Some(Parameter {
        name: name.to_string(),
        type_name: types.normalize_param_type(documented_type),
        desc: desc.to_string(),
        required: desc.starts_with(REQUIRED_MARKER),
        body_param,
    })
}

/// Parse a `code<TAB>type` response row.
///
/// `None` means the row has no tab; `Some(None)` means it is not a 2xx row.
pub fn parse_response_row(line: &str, types: &TypeMap) -> Option<Option<String>> {
    let (code, text) = line.split_once('\t')?;
    if !code.trim().starts_with('2') {
        return Some(None);
    }
    Some(Some(types.normalize_response(text.trim())))
}
