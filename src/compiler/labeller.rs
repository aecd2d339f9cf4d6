use tracing::trace;

/// Mints unique label names of the form `-<prefix>-<n>`.
///
/// Labels minted for one construct share a number: call `new_label` once,
/// then `same_number` for the rest.
#[derive(Debug, Default)]
pub struct Labeller {
    counter: u32,
}

impl Labeller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_label(&mut self, prefix: &str) -> String {
        self.counter += 1;
        self.same_number(prefix)
    }

    pub fn same_number(&self, prefix: &str) -> String {
        let label = format!("-{}-{}", prefix, self.counter);
        trace!(%label, "minted label");
        label
    }
}
