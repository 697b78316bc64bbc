// Traits module
//
// Trait definitions shared across the provider modules live here so the
// domain modules and the aggregating monitor do not depend on each other.

pub mod hardware;

pub use hardware::{
    DiskProvider, GraphicsProvider, MemoryProvider, MetricProvider, NetworkProvider, ProcessorProvider, ProviderKind,
};
