use futures::future::BoxFuture;

/// Port for detaching a unit of work from the caller's control flow.
///
/// Spawn-and-forget: no ordering, cancellation, or backpressure, and the
/// task's outcome never propagates to the spawner. Implementations must
/// contain panics at the task boundary and hand them to the logging path
/// instead of letting them take the process down. The store spawns one
/// task per secondary backend per write/delete; an injected bounded
/// executor may cap how many run at once.
pub trait TaskRunner: Send + Sync + 'static {
    fn spawn(&self, task: BoxFuture<'static, ()>);
}
