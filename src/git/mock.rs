use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;
use crate::git::{CommandOutput, CommandRunner, GitOperation};

/// Scripted runner for testing without a real repository.
///
/// Every operation succeeds with empty output unless a response has been
/// registered for it. All calls are recorded in order.
#[derive(Default)]
pub struct MockRunner {
    responses: HashMap<GitOperation, CommandOutput>,
    calls: RefCell<Vec<GitOperation>>,
}

impl MockRunner {
    /// Create a runner where every operation succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner whose `tag -l` returns the given tags, one per line
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let listing: Vec<String> = tags.into_iter().map(|t| t.as_ref().to_string()).collect();
        let mut runner = Self::new();
        runner.respond(GitOperation::ListTags, CommandOutput::ok(listing.join("\n")));
        runner
    }

    /// Register the output returned for an operation
    pub fn respond(&mut self, operation: GitOperation, output: CommandOutput) {
        self.responses.insert(operation, output);
    }

    /// Make an operation exit with `status` and `stderr`
    pub fn fail(&mut self, operation: GitOperation, status: i32, stderr: impl Into<String>) {
        self.respond(operation, CommandOutput::failed(status, stderr));
    }

    /// Operations run so far, in order
    pub fn calls(&self) -> Vec<GitOperation> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, operation: &GitOperation) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(operation.clone());
        Ok(self
            .responses
            .get(operation)
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok("")))
    }
}
