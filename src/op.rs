/// What a load did to a single MIME type entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Update,
    Create,
    Noop,
}
