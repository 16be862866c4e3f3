//! Operation type definitions for PathBuilder

/// API operation a path is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// LIST the keys under a prefix (`?list=true`)
    List,

    /// Read a single record by id
    Read,

    /// Read mount metadata (`sys/internal/ui/mounts/{mount}`), no schema needed
    MountMetadata,
}
