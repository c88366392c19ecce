//! Application shutdown hooks

/// Callback run when the application shuts down
///
/// Listeners run in registration order, once per `Application::shutdown`
/// call. Closures taking no arguments are listeners.
pub trait ShutdownListener: Send + Sync {
    fn shutdown(&self);
}

impl<F> ShutdownListener for F
where
    F: Fn() + Send + Sync,
{
    fn shutdown(&self) {
        self()
    }
}
