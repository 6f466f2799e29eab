/// Line separator used inside conflict blocks.
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

const OURS_MARKER: &str = "<<<<<<< HEAD";
const DIVIDER: &str = "=======";
const THEIRS_MARKER: &str = ">>>>>>>";

/// Render one conflict block holding both sides verbatim.
///
/// An absent side contributes nothing. A non-empty side that does not end in
/// a newline gets `sep` appended so each marker starts its own line.
pub fn render_conflict(current: Option<&[u8]>, given: Option<&[u8]>, sep: &str) -> Vec<u8> {
    let mut out = Vec::new();
    push_line(&mut out, OURS_MARKER, sep);
    push_side(&mut out, current, sep);
    push_line(&mut out, DIVIDER, sep);
    push_side(&mut out, given, sep);
    push_line(&mut out, THEIRS_MARKER, sep);
    out
}

fn push_line(out: &mut Vec<u8>, marker: &str, sep: &str) {
    out.extend_from_slice(marker.as_bytes());
    out.extend_from_slice(sep.as_bytes());
}

fn push_side(out: &mut Vec<u8>, side: Option<&[u8]>, sep: &str) {
    let Some(bytes) = side else { return };
    out.extend_from_slice(bytes);
    if !bytes.is_empty() && !bytes.ends_with(b"\n") {
        out.extend_from_slice(sep.as_bytes());
    }
}
