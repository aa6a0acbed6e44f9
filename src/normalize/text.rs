/// Escape the five XML-special characters.
///
/// `&` is replaced first so the entities introduced by the later
/// substitutions are not escaped a second time. Missing or empty input
/// yields an empty string.
pub fn sanitize(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
        _ => String::new(),
    }
}
