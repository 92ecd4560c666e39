/// Logging port used by use cases and the retry loop.
///
/// Messages must never carry credentials.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    /// Also used for per-retry notices the caller may surface to the user.
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
