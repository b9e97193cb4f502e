//! Collector trait: the population callback run on every refresh cycle.

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;
use crate::registry::Registry;

/// Type alias for boxed async return type (dyn-compatible).
///
/// Collectors are stored as trait objects in the refresher, so
/// [`Collector::collect`] returns a `BoxFuture` rather than being an
/// `async fn`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of values for one refresh cycle.
///
/// `collect` is called once per cycle and stages values through the
/// [`Registry`]. It may take as long as it needs: queries keep being answered
/// from the previous generation until the cycle is committed.
///
/// Returning an error does not roll anything back. Whatever the collector
/// staged before failing is committed with the rest of the cycle.
///
/// # Example
///
/// ```rust
/// use snmp_passpersist::{BoxFuture, Collector, Registry, Result};
///
/// struct Uptime {
///     started: std::time::Instant,
/// }
///
/// impl Collector for Uptime {
///     fn name(&self) -> &str {
///         "uptime"
///     }
///
///     fn collect<'a>(&'a self, registry: &'a Registry) -> BoxFuture<'a, Result<()>> {
///         Box::pin(async move { registry.add_timeticks(&[1, 0], self.started.elapsed()) })
///     }
/// }
/// ```
pub trait Collector: Send + Sync + 'static {
    /// Name used in log records.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Stage this cycle's values.
    fn collect<'a>(&'a self, registry: &'a Registry) -> BoxFuture<'a, Result<()>>;
}

/// [`Collector`] backed by a synchronous closure.
///
/// ```rust
/// use snmp_passpersist::FnCollector;
///
/// let collector = FnCollector::new("answer", |registry| registry.add_int(&[0], 42));
/// ```
pub struct FnCollector<F> {
    name: String,
    f: F,
}

impl<F> FnCollector<F>
where
    F: Fn(&Registry) -> Result<()> + Send + Sync + 'static,
{
    /// Wrap `f` under the given name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Collector for FnCollector<F>
where
    F: Fn(&Registry) -> Result<()> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn collect<'a>(&'a self, registry: &'a Registry) -> BoxFuture<'a, Result<()>> {
        let result = (self.f)(registry);
        Box::pin(async move { result })
    }
}

impl<F> std::fmt::Debug for FnCollector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCollector").field("name", &self.name).finish()
    }
}
