use std::time::Duration;

/// Options which influence how a [`Model`](super::Model) is built and solved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelOptions {
    /// Pass the rendered name of every variable to the solver. Useful when inspecting solver
    /// output, but costs a string per variable.
    pub named_variables: bool,
    /// Give up solving after this much time; `None` means no limit.
    pub time_limit: Option<Duration>,
}
