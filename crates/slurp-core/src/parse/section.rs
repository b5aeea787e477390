/// The part of a documentation snippet the parser is currently reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Title,
    Description,
    Endpoint,
    Skip,
    UrlParams,
    BodyParams,
    Responses,
}

/// Lines that switch sections. Matched against the untrimmed line.
const MARKERS: &[(&str, Section)] = &[
    ("    Definition", Section::Endpoint),
    ("Definition", Section::Endpoint),
    ("    Example Request", Section::Skip),
    ("Example Request", Section::Skip),
    ("    Example Response", Section::Skip),
    ("Example Response", Section::Skip),
    ("URL Parameters", Section::UrlParams),
    ("Body Parameters", Section::BodyParams),
    ("Responses", Section::Responses),
];

/// The section a marker line switches to, if `line` is a marker.
pub fn section_for_marker(line: &str) -> Option<Section> {
    MARKERS
        .iter()
        .find(|(marker, _)| *marker == line)
        .map(|(_, section)| *section)
}
