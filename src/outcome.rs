// Tagged result shared by the searches and the evaluation-function registry

/// Result of a lookup or search that may legitimately come back empty
///
/// `NotFound` is an ordinary outcome (the caller idles or reports a bad name).
/// `NotImplemented` marks a declared policy path with no implementation and
/// must never be confused with a no-op decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Found(T),
    NotFound,
    NotImplemented(&'static str),
}

impl<T> Outcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Found(value) => Outcome::Found(f(value)),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::NotImplemented(name) => Outcome::NotImplemented(name),
        }
    }
}
