/// Upper bound on technologies taken from one answer.
pub const MAX_TECHS: usize = 10;

/// Splits a free-text technology list on `,` `;` `/` and newlines.
/// Pieces are trimmed, blanks dropped, and only the first `MAX_TECHS` kept.
pub fn parse_tech_stack(input: &str) -> Vec<String> {
    input
        .split([',', '\n', ';', '/'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .take(MAX_TECHS)
        .map(str::to_string)
        .collect()
}
