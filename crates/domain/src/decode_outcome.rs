/// Result of running one decoder over a name.
///
/// `NoMatch` means the name is simply not in this decoder's format and the
/// next decoder should be tried. `Malformed` means the name claimed the
/// format (right prefix, right shape) but its content is unusable; the
/// message is for logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome<T> {
    Matched(T),
    NoMatch,
    Malformed(String),
}

impl<T> DecodeOutcome<T> {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DecodeOutcome::Malformed(reason.into())
    }
}
