//! Paste safety check

/// Bracketed-paste end marker
const BRACKETED_PASTE_END: &[u8] = b"\x1b[201~";

/// Whether `data` can be pasted without confirmation.
///
/// A newline would execute a command in most shells, and the
/// bracketed-paste end marker would let the pasted text escape the paste.
pub fn is_safe(data: &[u8]) -> bool {
    !data.contains(&b'\n')
        && !data
            .windows(BRACKETED_PASTE_END.len())
            .any(|window| window == BRACKETED_PASTE_END)
}
