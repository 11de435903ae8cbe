/// A module for providing error context

/// An error (E), and a description of what was being attempted when it happened.
#[derive(Debug)]
pub struct ErrorContext<E>(pub String, pub E);

/// Extends `Result` with a `context` method, wrapping the error with a description.
pub trait ErrorContextExt<T, E> {
    fn context<C: AsRef<str> + 'static>(self, c: C) -> Result<T, ErrorContext<E>>;
}

impl<T, E> ErrorContextExt<T, E> for Result<T, E> {
    fn context<C: AsRef<str> + 'static>(self, c: C) -> Result<T, ErrorContext<E>> {
        let s = c.as_ref();
        self.map_err(|e| ErrorContext(s.into(), e))
    }
}
