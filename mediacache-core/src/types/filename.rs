//! Sanitized cache lookup keys.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// The final path component of an untrusted request, safe to append to a
/// cache root.
///
/// Construction is the only place a request string is interpreted, so every
/// value of this type upholds the same invariant: no `/`, no `\`, never `.`
/// or `..`, never empty, no NUL byte. Joining it onto a directory always
/// yields a direct child of that directory.
///
/// Names are taken verbatim. In particular a historical link such as
/// `foo-bar-clip.mp4` is *not* turned back into `foo/bar/clip.mp4`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SafeFileName(String);

impl SafeFileName {
    /// Extracts the filename from an arbitrary request path.
    ///
    /// Backslashes are treated as forward slashes. Empty and `.` segments
    /// are skipped, so `a/b/` and `a/b/.` both yield `b`. Returns `None`
    /// when nothing usable is left (empty input, only separators, a
    /// trailing `..`, or an embedded NUL).
    pub fn from_request(requested: &str) -> Option<Self> {
        let normalized = requested.replace('\\', "/");
        let name = normalized
            .rsplit('/')
            .find(|segment| !segment.is_empty() && *segment != ".")?;

        if name == ".." || name.contains('\0') {
            return None;
        }

        Some(Self(name.to_string()))
    }

    /// Returns the filename as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for SafeFileName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl AsRef<str> for SafeFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn name(input: &str) -> Option<String> {
        SafeFileName::from_request(input).map(|n| n.as_str().to_string())
    }

    #[test_case("abc123.jpg", "abc123.jpg" ; "bare name")]
    #[test_case("users/42/abc123.jpg", "abc123.jpg" ; "nested segments")]
    #[test_case("../../etc/passwd", "passwd" ; "parent traversal")]
    #[test_case("..\\..\\windows\\win.ini", "win.ini" ; "backslash traversal")]
    #[test_case("a\\b/c", "c" ; "mixed separators")]
    #[test_case("/abs/path/file.png", "file.png" ; "absolute path")]
    #[test_case("some/prefix-clip1.mp4", "prefix-clip1.mp4" ; "dash kept verbatim")]
    #[test_case("dir/file.jpg/", "file.jpg" ; "trailing separator")]
    #[test_case("dir/file.jpg/.", "file.jpg" ; "trailing current dir")]
    #[test_case("dir//file.jpg", "file.jpg" ; "doubled separator")]
    #[test_case("...", "..." ; "three dots is a plain name")]
    #[test_case("%2e%2e%2fsecret", "%2e%2e%2fsecret" ; "encoded text is not decoded")]
    fn test_extracts_final_component(input: &str, expected: &str) {
        assert_eq!(name(input).as_deref(), Some(expected));
    }

    #[test_case("" ; "empty")]
    #[test_case("/" ; "single slash")]
    #[test_case("\\" ; "single backslash")]
    #[test_case("///\\\\/" ; "only separators")]
    #[test_case("." ; "current dir")]
    #[test_case(".." ; "parent dir")]
    #[test_case("a/b/.." ; "trailing parent dir")]
    #[test_case("a\\.." ; "trailing parent dir with backslash")]
    #[test_case("bad\0name.jpg" ; "nul byte")]
    fn test_rejects_unusable_input(input: &str) {
        assert_eq!(name(input), None);
    }

    #[test]
    fn test_backslash_equivalent_to_slash() {
        assert_eq!(
            SafeFileName::from_request("a\\b\\c"),
            SafeFileName::from_request("a/b/c")
        );
    }

    #[test]
    fn test_display_and_path() {
        let n = SafeFileName::from_request("x/y/z.webm").unwrap();
        assert_eq!(n.to_string(), "z.webm");
        let p: &Path = n.as_ref();
        assert_eq!(p, Path::new("z.webm"));
    }
}
